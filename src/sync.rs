//! Reconciliation of directory group members against Zabbix accounts.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{error::Error, ldap::LdapUser, zabbix::ZabbixUser};

/// Built-in Zabbix accounts that must never be created or deleted.
const BUILTIN_LOGINS: [&str; 2] = ["Admin", "guest"];

/// The account operations the reconciler needs from the monitoring side.
///
/// [`crate::zabbix::ZabbixClient`] is the production implementation; tests
/// substitute an in-memory store.
#[async_trait]
pub trait AccountStore {
	/// Creates an account, returning whether the server reported success.
	async fn create_user(&mut self, alias: &str, name: &str, surname: &str)
		-> Result<bool, Error>;

	/// Deletes an account, returning whether the server reported success. The
	/// name and surname only serve diagnostics.
	async fn delete_user(&mut self, userid: &str, name: &str, surname: &str)
		-> Result<bool, Error>;
}

/// Counts of what one reconciliation pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncSummary {
	/// Accounts created on the Zabbix side.
	pub created: usize,
	/// Accounts deleted on the Zabbix side.
	pub removed: usize,
	/// Create or delete calls the server did not accept.
	pub failed: usize,
}

/// Whether a login is exempt from automated creation and deletion.
fn is_reserved(login: &str, bind_user: &str) -> bool {
	login == bind_user || BUILTIN_LOGINS.contains(&login)
}

/// Converges the Zabbix account list with the directory group membership.
///
/// Directory members without a Zabbix account are created, Zabbix accounts
/// without a directory member are deleted. Matching is by exact,
/// case-sensitive login name. The create pass runs to completion before the
/// delete pass starts. Reserved logins (the `bind_user` the session belongs
/// to, plus the built-in `Admin` and `guest` accounts) are never touched.
///
/// A call the server rejects is logged and counted in the summary; the pass
/// continues with the next account. Transport and API errors propagate.
pub async fn reconcile<S: AccountStore + Send>(
	store: &mut S,
	zabbix_users: &[ZabbixUser],
	ldap_users: &[LdapUser],
	bind_user: &str,
) -> Result<SyncSummary, Error> {
	let zabbix_logins: HashSet<&str> =
		zabbix_users.iter().map(|user| user.alias.as_str()).collect();
	let ldap_logins: HashSet<&str> = ldap_users.iter().map(|user| user.login.as_str()).collect();

	let mut summary = SyncSummary::default();

	for user in ldap_users {
		if is_reserved(&user.login, bind_user) || zabbix_logins.contains(user.login.as_str()) {
			continue;
		}
		if store.create_user(&user.login, &user.given_name, &user.surname).await? {
			info!("User {} {} added!", user.given_name, user.surname);
			summary.created += 1;
		} else {
			warn!("Could not add user {} {}", user.given_name, user.surname);
			summary.failed += 1;
		}
	}

	for user in zabbix_users {
		if is_reserved(&user.alias, bind_user) || ldap_logins.contains(user.alias.as_str()) {
			continue;
		}
		if store.delete_user(&user.userid, &user.name, &user.surname).await? {
			info!("User {} {} removed!", user.name, user.surname);
			summary.removed += 1;
		} else {
			warn!("Could not remove user {} {}", user.name, user.surname);
			summary.failed += 1;
		}
	}

	Ok(summary)
}
