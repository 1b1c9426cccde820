//! Entry point: collects the connection parameters, wires the two clients
//! and runs one reconciliation pass.

use std::{io, process::ExitCode};

use tracing::{error, info};
use zabbix_ldap_sync::{
	config::Config,
	error::Error,
	ldap::LdapClient,
	logging,
	sync::{reconcile, SyncSummary},
	zabbix::ZabbixClient,
};

#[tokio::main]
async fn main() -> ExitCode {
	let config = match Config::from_reader(io::stdin().lock()) {
		Ok(config) => config,
		Err(err) => {
			eprintln!("Failed to read parameters: {err}");
			return ExitCode::FAILURE;
		}
	};

	if let Err(err) = logging::init(logging::LOG_FILE) {
		eprintln!("Failed to open {}: {err}", logging::LOG_FILE);
		return ExitCode::FAILURE;
	}

	if let Err(err) = config.validate() {
		error!("{err}");
		return ExitCode::FAILURE;
	}

	info!("Begin of the script.");
	match run(&config).await {
		Ok(summary) => {
			info!(
				"Pass finished: {} added, {} removed, {} failed",
				summary.created, summary.removed, summary.failed
			);
			info!("End of the script.");
			ExitCode::SUCCESS
		}
		Err(err) => {
			error!("Sync aborted: {err}");
			ExitCode::FAILURE
		}
	}
}

/// Runs one full fetch-diff-apply cycle.
async fn run(config: &Config) -> Result<SyncSummary, Error> {
	let mut zabbix = ZabbixClient::connect(&config.zabbix).await?;
	let accounts = zabbix.fetch_users().await?;
	let members = LdapClient::new(config.ldap.clone()).fetch_members().await?;

	let summary = reconcile(&mut zabbix, &accounts, &members, &config.zabbix.user).await?;
	zabbix.logout().await;
	Ok(summary)
}
