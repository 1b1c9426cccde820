//! Error codes

use crate::zabbix::RpcError;

/// Errors that can occur while running a reconciliation pass
#[derive(thiserror::Error, Debug)]
pub enum Error {
	/// A required connection parameter was empty.
	#[error("Missing \"{0}\" parameter to complete the connection.")]
	MissingParameter(&'static str),
	/// A required attribute in a search result was missing.
	#[error("Missing attribute {0}")]
	MissingAttribute(String),
	/// The Zabbix API answered with an error object.
	#[error("Zabbix API error {}: {} {}", .0.code, .0.message, .0.data)]
	Api(RpcError),
	/// The Zabbix API answered with neither a result nor an error.
	#[error("Unexpected Zabbix API response: {0}")]
	InvalidResponse(String),
	/// An underlying protocol error or similar occurred, or the LDAP library
	/// was used incorrectly.
	#[error(transparent)]
	Ldap(#[from] ldap3::LdapError),
	/// An HTTP transport error occurred while talking to the Zabbix API.
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	/// A server address could not be parsed as a URL.
	#[error(transparent)]
	Url(#[from] url::ParseError),
	/// An I/O error occurred.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
