//! File logging for one reconciliation run.
use std::{fs::OpenOptions, path::Path, sync::Mutex};

use time::OffsetDateTime;
use tracing::{Event, Subscriber};
use tracing_subscriber::{
	fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
	registry::LookupSpan,
};

use crate::error::Error;

/// Name of the log file, created in the working directory.
pub const LOG_FILE: &str = "zabbix-ldap.log";

/// Format for log line timestamps.
pub const TIME_FORMAT: &[time::format_description::FormatItem] =
	time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Event formatter producing the tool's historical log line format:
/// `[2024-01-01 12:00:00] - INFO: message,`
struct LogLine;

impl<S, N> FormatEvent<S, N> for LogLine
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	N: for<'a> FormatFields<'a> + 'static,
{
	fn format_event(
		&self,
		ctx: &FmtContext<'_, S, N>,
		mut writer: Writer<'_>,
		event: &Event<'_>,
	) -> std::fmt::Result {
		let timestamp =
			OffsetDateTime::now_utc().format(TIME_FORMAT).map_err(|_| std::fmt::Error)?;
		write!(writer, "[{timestamp}] - {}: ", event.metadata().level())?;
		ctx.field_format().format_fields(writer.by_ref(), event)?;
		writeln!(writer, ",")
	}
}

/// Opens the log file in append mode and installs it as this run's log sink.
/// Events below INFO are dropped. Must be called at most once per process.
pub fn init(path: impl AsRef<Path>) -> Result<(), Error> {
	let file = OpenOptions::new().create(true).append(true).open(path)?;
	tracing_subscriber::fmt()
		.event_format(LogLine)
		.with_writer(Mutex::new(file))
		.with_max_level(tracing::Level::INFO)
		.init();
	Ok(())
}
