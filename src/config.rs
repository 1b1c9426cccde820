//! Connection parameters for both sides of the sync.
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// All connection parameters needed for one reconciliation pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
	/// Parameters for the Zabbix API session.
	pub zabbix: ZabbixConfig,
	/// Parameters for the directory bind and search.
	pub ldap: LdapConfig,
}

/// Parameters for the Zabbix API session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ZabbixConfig {
	/// Base address of the Zabbix frontend, e.g. `https://zabbix.example.org/`.
	pub server: String,
	/// Login name of the API account. This login is always reserved: the sync
	/// never creates or deletes it.
	pub user: String,
	/// Password of the API account.
	pub password: String,
}

/// Parameters for the directory bind and search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LdapConfig {
	/// URL of the directory server, e.g. `ldaps://dc01.example.org`.
	pub server: String,
	/// Bind DN or user principal name of the search account.
	pub user: String,
	/// Password of the search account.
	pub password: String,
	/// Base DN the member search starts from.
	pub base_dn: String,
	/// DN of the group whose members are the authoritative account set.
	pub member_of: String,
}

impl Config {
	/// Reads the eight parameters, one per line, in the order the tool has
	/// always expected them: Zabbix server, user and password, then directory
	/// server, user, password, base DN and group DN. Missing trailing lines
	/// are read as empty so [`Config::validate`] can name them.
	pub fn from_reader(input: impl BufRead) -> Result<Self, Error> {
		let mut lines = input.lines();
		let mut next = || lines.next().unwrap_or_else(|| Ok(String::new()));
		Ok(Self {
			zabbix: ZabbixConfig { server: next()?, user: next()?, password: next()? },
			ldap: LdapConfig {
				server: next()?,
				user: next()?,
				password: next()?,
				base_dn: next()?,
				member_of: next()?,
			},
		})
	}

	/// Checks that every parameter is present, naming the first missing one.
	pub fn validate(&self) -> Result<(), Error> {
		let parameters = [
			("zabbix_server", &self.zabbix.server),
			("zabbix_user", &self.zabbix.user),
			("zabbix_password", &self.zabbix.password),
			("ldap_server", &self.ldap.server),
			("ldap_user", &self.ldap.user),
			("ldap_password", &self.ldap.password),
			("ldap_basedn", &self.ldap.base_dn),
			("ldap_memberof", &self.ldap.member_of),
		];
		for (name, value) in parameters {
			if value.is_empty() {
				return Err(Error::MissingParameter(name));
			}
		}
		Ok(())
	}

	/// Returns an example configuration.
	#[allow(dead_code)]
	pub(crate) fn example() -> Self {
		Config {
			zabbix: ZabbixConfig {
				server: "https://zabbix.example.org/".to_owned(),
				user: "svcacct".to_owned(),
				password: "verysecret".to_owned(),
			},
			ldap: LdapConfig {
				server: "ldap://localhost:1389".to_owned(),
				user: "cn=admin,dc=example,dc=org".to_owned(),
				password: "adminpassword".to_owned(),
				base_dn: "ou=users,dc=example,dc=org".to_owned(),
				member_of: "cn=monitoring,ou=groups,dc=example,dc=org".to_owned(),
			},
		}
	}
}
