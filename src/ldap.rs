//! Client for fetching group members from the directory.

use std::time::Duration;

use ldap3::{LdapConnAsync, LdapConnSettings, Scope, SearchEntry};
use tracing::{debug, warn};

use crate::{config::LdapConfig, entry::SearchEntryExt, error::Error};

/// The attribute holding a member's login name.
const ATTR_LOGIN: &str = "sAMAccountName";
/// The attribute holding a member's given name.
const ATTR_GIVEN_NAME: &str = "givenName";
/// The attribute holding a member's surname.
const ATTR_SURNAME: &str = "sn";

/// Timeout for establishing the directory connection.
const CONN_TIMEOUT: Duration = Duration::from_secs(10);

/// A group member as read from the directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LdapUser {
	/// Login name, unique within one fetch.
	pub login: String,
	/// Given name.
	pub given_name: String,
	/// Surname.
	pub surname: String,
}

impl LdapUser {
	/// Converts a [`SearchEntry`] to an [`LdapUser`]. The login attribute is
	/// required; the name attributes default to empty when absent.
	pub fn from_entry(entry: &SearchEntry) -> Result<Self, Error> {
		let login = entry.attr_required(ATTR_LOGIN)?.to_owned();
		let given_name = entry.attr_first(ATTR_GIVEN_NAME).unwrap_or_default().to_owned();
		let surname = entry.attr_first(ATTR_SURNAME).unwrap_or_default().to_owned();
		Ok(Self { login, given_name, surname })
	}
}

/// Client for the directory side of the sync.
#[derive(Debug, Clone)]
pub struct LdapClient {
	/// Connection and search parameters.
	config: LdapConfig,
}

impl LdapClient {
	/// Creates a client for the given connection parameters.
	#[must_use]
	pub fn new(config: LdapConfig) -> Self {
		Self { config }
	}

	/// Returns the search filter selecting members of the configured group.
	fn member_filter(&self) -> String {
		format!("(&(objectClass=person)(memberOf={}))", self.config.member_of)
	}

	/// Binds to the directory and returns the members of the configured
	/// group. Opens a fresh connection, binds, searches once and unbinds;
	/// nothing is kept between passes.
	pub async fn fetch_members(&self) -> Result<Vec<LdapUser>, Error> {
		let settings = LdapConnSettings::new().set_conn_timeout(CONN_TIMEOUT);
		let (conn, mut ldap) =
			LdapConnAsync::with_settings(settings, &self.config.server).await?;
		let conn = tokio::spawn(async move {
			if let Err(err) = conn.drive().await {
				warn!("Ldap connection error {err}");
			}
		});

		ldap.simple_bind(&self.config.user, &self.config.password).await?.success()?;

		let filter = self.member_filter();
		debug!(base = %self.config.base_dn, %filter, "Searching for group members");
		let (entries, _result) = ldap
			.search(
				&self.config.base_dn,
				Scope::Subtree,
				&filter,
				vec![ATTR_LOGIN, ATTR_GIVEN_NAME, ATTR_SURNAME],
			)
			.await?
			.success()?;

		let mut members = Vec::with_capacity(entries.len());
		for entry in entries.into_iter().map(SearchEntry::construct) {
			match LdapUser::from_entry(&entry) {
				Ok(user) => members.push(user),
				Err(err) => warn!("Skipping entry {}: {err}", entry.dn),
			}
		}

		ldap.unbind().await?;
		if let Err(err) = conn.await {
			warn!("Failed to join background task: {err}");
		}

		debug!("Found {} group members", members.len());
		Ok(members)
	}
}
