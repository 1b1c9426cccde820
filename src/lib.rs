//! Reconcile user accounts between an LDAP directory group and a Zabbix
//! server.
//!
//! The tool runs one pass per invocation: it fetches the account list from
//! the Zabbix API and the member list of a directory group, creates a Zabbix
//! account for every member missing one, and deletes every Zabbix account
//! whose login is no longer in the group. Both lists are fetched fresh each
//! run and discarded afterwards; nothing is cached between passes.
//!
//! The service account the Zabbix session belongs to and the built-in
//! `Admin` and `guest` accounts are reserved and never touched, no matter
//! which list they appear in.
//!
//! # Getting started
//! Running a pass by hand looks like so:
//! ```no_run
//! # async fn run() -> Result<(), zabbix_ldap_sync::Error> {
//! use zabbix_ldap_sync::{reconcile, Config, LdapClient, ZabbixClient};
//!
//! // Parameters are read line by line, Zabbix side first. See
//! // [`Config::from_reader`] for the exact order.
//! let config = Config::from_reader(std::io::stdin().lock())?;
//! config.validate()?;
//!
//! let mut zabbix = ZabbixClient::connect(&config.zabbix).await?;
//! let accounts = zabbix.fetch_users().await?;
//! let members = LdapClient::new(config.ldap.clone()).fetch_members().await?;
//!
//! let summary = reconcile(&mut zabbix, &accounts, &members, &config.zabbix.user).await?;
//! zabbix.logout().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//! * Accounts are matched by login name only, case-sensitively. Two
//!   identities sharing a login are not detected.
//! * There is no update or disable flow; an account either exists or it
//!   doesn't.
//! * No retries: a rejected create or delete leaves that account
//!   unsynchronized until the next pass.
//! * No paging on either side; very large groups go through in one search
//!   and one `user.get`.

pub mod config;
pub mod entry;
pub mod error;
pub mod ldap;
pub mod logging;
pub mod sync;
pub mod zabbix;

pub use crate::{
	config::{Config, LdapConfig, ZabbixConfig},
	entry::SearchEntryExt,
	error::Error,
	ldap::{LdapClient, LdapUser},
	sync::{reconcile, AccountStore, SyncSummary},
	zabbix::{ZabbixClient, ZabbixUser},
};
