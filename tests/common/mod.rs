use async_trait::async_trait;
use zabbix_ldap_sync::{error::Error, ldap::LdapUser, sync::AccountStore, zabbix::ZabbixUser};

/// One operation the store was asked to perform, in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
	Create { alias: String, name: String, surname: String },
	Delete { userid: String, name: String, surname: String },
}

/// In-memory account store. Creates and deletes are applied to its own
/// account list so a second pass can re-derive the Zabbix view from the
/// effects of the first.
#[derive(Debug)]
pub struct MemoryStore {
	pub users: Vec<ZabbixUser>,
	pub ops: Vec<Op>,
	/// Whether create/delete calls report success.
	pub accept: bool,
	next_id: u64,
}

impl MemoryStore {
	pub fn new(users: Vec<ZabbixUser>) -> Self {
		Self { users, ops: Vec::new(), accept: true, next_id: 100 }
	}

	pub fn rejecting(users: Vec<ZabbixUser>) -> Self {
		Self { accept: false, ..Self::new(users) }
	}

	pub fn creates(&self) -> Vec<&Op> {
		self.ops.iter().filter(|op| matches!(op, Op::Create { .. })).collect()
	}

	pub fn deletes(&self) -> Vec<&Op> {
		self.ops.iter().filter(|op| matches!(op, Op::Delete { .. })).collect()
	}
}

#[async_trait]
impl AccountStore for MemoryStore {
	async fn create_user(
		&mut self,
		alias: &str,
		name: &str,
		surname: &str,
	) -> Result<bool, Error> {
		self.ops.push(Op::Create {
			alias: alias.to_owned(),
			name: name.to_owned(),
			surname: surname.to_owned(),
		});
		if self.accept {
			self.next_id += 1;
			self.users.push(ZabbixUser {
				userid: self.next_id.to_string(),
				alias: alias.to_owned(),
				name: name.to_owned(),
				surname: surname.to_owned(),
			});
		}
		Ok(self.accept)
	}

	async fn delete_user(
		&mut self,
		userid: &str,
		name: &str,
		surname: &str,
	) -> Result<bool, Error> {
		self.ops.push(Op::Delete {
			userid: userid.to_owned(),
			name: name.to_owned(),
			surname: surname.to_owned(),
		});
		if self.accept {
			self.users.retain(|user| user.userid != userid);
		}
		Ok(self.accept)
	}
}

pub fn ldap_user(login: &str, given_name: &str, surname: &str) -> LdapUser {
	LdapUser {
		login: login.to_owned(),
		given_name: given_name.to_owned(),
		surname: surname.to_owned(),
	}
}

pub fn zabbix_user(userid: &str, alias: &str, name: &str, surname: &str) -> ZabbixUser {
	ZabbixUser {
		userid: userid.to_owned(),
		alias: alias.to_owned(),
		name: name.to_owned(),
		surname: surname.to_owned(),
	}
}
