//! Client for the Zabbix JSON-RPC API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{config::ZabbixConfig, error::Error, sync::AccountStore};

/// HTTP request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP connection timeout.
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Protocol version sent with every request.
const JSONRPC_VERSION: &str = "2.0";

/// A user account as known to Zabbix.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ZabbixUser {
	/// Internal account id.
	pub userid: String,
	/// Login name, unique per server.
	pub alias: String,
	/// Given name.
	#[serde(default)]
	pub name: String,
	/// Surname.
	#[serde(default)]
	pub surname: String,
}

/// One JSON-RPC request body.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
	/// Protocol version, always [`JSONRPC_VERSION`].
	jsonrpc: &'static str,
	/// Name of the API method, e.g. `user.get`.
	method: &'a str,
	/// Method parameters.
	params: Value,
	/// Session token. Absent only for `user.login`.
	#[serde(skip_serializing_if = "Option::is_none")]
	auth: Option<&'a str>,
	/// Request id, echoed back by the server.
	id: u64,
}

/// One JSON-RPC response body. Exactly one of `result` and `error` is set.
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
	/// The method's result on success.
	result: Option<T>,
	/// The error object on failure.
	error: Option<RpcError>,
}

/// The error member of a failed JSON-RPC response.
#[derive(Debug, Deserialize)]
pub struct RpcError {
	/// Numeric error code.
	pub code: i64,
	/// Short error message.
	pub message: String,
	/// Detailed error description.
	#[serde(default)]
	pub data: String,
}

/// The result of `user.create` and `user.delete`: the ids that were touched.
#[derive(Debug, Deserialize)]
struct UserIds {
	/// Ids of the accounts the call created or deleted.
	userids: Vec<Value>,
}

/// An authenticated session against one Zabbix server.
#[derive(Debug)]
pub struct ZabbixClient {
	/// HTTP client used for every call.
	http: Client,
	/// Full URL of the API endpoint.
	endpoint: url::Url,
	/// Session token obtained from `user.login`.
	auth: String,
	/// Running request id.
	next_id: u64,
}

/// Builds the full API endpoint URL from the configured server address.
fn endpoint_url(server: &str) -> Result<url::Url, Error> {
	let mut base = server.to_owned();
	if !base.ends_with('/') {
		base.push('/');
	}
	Ok(url::Url::parse(&base)?.join("api_jsonrpc.php")?)
}

impl ZabbixClient {
	/// Authenticates against the server's API and returns a session handle.
	/// Fails if the server rejects the credentials.
	pub async fn connect(config: &ZabbixConfig) -> Result<Self, Error> {
		let http = Client::builder()
			.timeout(HTTP_TIMEOUT)
			.connect_timeout(HTTP_CONNECT_TIMEOUT)
			.build()?;
		let endpoint = endpoint_url(&config.server)?;

		let mut client = Self { http, endpoint, auth: String::new(), next_id: 1 };
		debug!(endpoint = %client.endpoint, "Logging in to the Zabbix API");
		client.auth = client
			.call("user.login", json!({ "user": config.user, "password": config.password }), false)
			.await?;
		Ok(client)
	}

	/// Performs one JSON-RPC call and extracts its result.
	async fn call<T: DeserializeOwned>(
		&mut self,
		method: &str,
		params: Value,
		with_auth: bool,
	) -> Result<T, Error> {
		let request = RpcRequest {
			jsonrpc: JSONRPC_VERSION,
			method,
			params,
			auth: with_auth.then_some(self.auth.as_str()),
			id: self.next_id,
		};
		self.next_id += 1;

		let response: RpcResponse<T> = self
			.http
			.post(self.endpoint.clone())
			.json(&request)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		if let Some(error) = response.error {
			return Err(Error::Api(error));
		}
		response.result.ok_or_else(|| {
			Error::InvalidResponse(format!("{method} returned neither result nor error"))
		})
	}

	/// Lists the user accounts known to the server.
	pub async fn fetch_users(&mut self) -> Result<Vec<ZabbixUser>, Error> {
		let users: Vec<ZabbixUser> = self
			.call("user.get", json!({ "output": ["userid", "alias", "name", "surname"] }), true)
			.await?;
		debug!("Found {} Zabbix user accounts", users.len());
		Ok(users)
	}

	/// Ends the API session. Failures are logged and otherwise ignored.
	pub async fn logout(mut self) {
		if let Err(err) = self.call::<bool>("user.logout", json!([]), true).await {
			warn!("Zabbix logout failed: {err}");
		}
	}
}

#[async_trait]
impl AccountStore for ZabbixClient {
	async fn create_user(
		&mut self,
		alias: &str,
		name: &str,
		surname: &str,
	) -> Result<bool, Error> {
		debug!("Creating Zabbix account {alias} ({name} {surname})");
		let created: UserIds = self
			.call("user.create", json!({ "alias": alias, "name": name, "surname": surname }), true)
			.await?;
		Ok(!created.userids.is_empty())
	}

	async fn delete_user(
		&mut self,
		userid: &str,
		name: &str,
		surname: &str,
	) -> Result<bool, Error> {
		debug!("Deleting Zabbix account {userid} ({name} {surname})");
		let deleted: UserIds = self.call("user.delete", json!([userid]), true).await?;
		Ok(!deleted.userids.is_empty())
	}
}

#[cfg(test)]
mod tests {
	#![allow(clippy::unwrap_used)]

	use super::{endpoint_url, RpcResponse, UserIds, ZabbixUser};
	use crate::error::Error;

	#[test]
	fn test_endpoint_url() -> Result<(), Box<dyn std::error::Error>> {
		assert_eq!(
			endpoint_url("https://zabbix.example.org")?.as_str(),
			"https://zabbix.example.org/api_jsonrpc.php"
		);
		assert_eq!(
			endpoint_url("https://example.org/zabbix")?.as_str(),
			"https://example.org/zabbix/api_jsonrpc.php"
		);
		assert!(matches!(endpoint_url("not a url"), Err(Error::Url(_))));

		Ok(())
	}

	#[test]
	fn test_user_list_response() -> Result<(), Box<dyn std::error::Error>> {
		let body = r#"{
			"jsonrpc": "2.0",
			"result": [
				{"userid": "1", "alias": "Admin", "name": "Zabbix", "surname": "Administrator"},
				{"userid": "7", "alias": "jdoe", "name": "John", "surname": "Doe"}
			],
			"id": 2
		}"#;

		let response: RpcResponse<Vec<ZabbixUser>> = serde_json::from_str(body)?;
		let users = response.result.unwrap();

		assert_eq!(users.len(), 2);
		assert_eq!(
			users[1],
			ZabbixUser {
				userid: "7".to_owned(),
				alias: "jdoe".to_owned(),
				name: "John".to_owned(),
				surname: "Doe".to_owned(),
			}
		);

		Ok(())
	}

	#[test]
	fn test_error_response() -> Result<(), Box<dyn std::error::Error>> {
		let body = r#"{
			"jsonrpc": "2.0",
			"error": {
				"code": -32602,
				"message": "Invalid params.",
				"data": "Incorrect user name or password or account is temporarily blocked."
			},
			"id": 1
		}"#;

		let response: RpcResponse<String> = serde_json::from_str(body)?;
		let error = response.error.unwrap();

		assert!(response.result.is_none());
		assert_eq!(error.code, -32602);
		assert_eq!(error.message, "Invalid params.");

		Ok(())
	}

	#[test]
	fn test_created_userids_response() -> Result<(), Box<dyn std::error::Error>> {
		let created: UserIds = serde_json::from_str(r#"{"userids": ["12"]}"#)?;
		assert!(!created.userids.is_empty());

		let empty: UserIds = serde_json::from_str(r#"{"userids": []}"#)?;
		assert!(empty.userids.is_empty());

		Ok(())
	}
}
