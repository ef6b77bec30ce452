//! Fetches the roster JSON document over HTTP.

use log::info;
use thiserror::Error;

use super::types::Roster;

/// Why the roster could not be loaded. Every variant carries a readable message.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DataLoadError {
	/// The request never produced a response body.
	#[error("failed to fetch roster: {0}")]
	Network(String),

	/// The server answered with a non-success status.
	#[error("failed to load roster: HTTP {status} {status_text}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Reason phrase sent with the status.
		status_text: String,
	},

	/// The body is not a valid roster document.
	#[error("failed to parse roster: {0}")]
	Parse(String),
}

/// Fetch and parse the roster at `url`. One attempt, no retry.
pub async fn load_roster(url: &str) -> Result<Roster, DataLoadError> {
	let response = gloo_net::http::Request::get(url)
		.send()
		.await
		.map_err(|e| DataLoadError::Network(e.to_string()))?;
	let body = response
		.text()
		.await
		.map_err(|e| DataLoadError::Network(e.to_string()))?;

	let roster = parse_roster(
		response.ok(),
		response.status(),
		&response.status_text(),
		&body,
	)?;
	info!(
		"alumni-graph: loaded {} members, {} relations from {}",
		roster.members.len(),
		roster.relations.len(),
		url
	);
	Ok(roster)
}

/// Validate a fetched response and parse its body.
pub fn parse_roster(
	ok: bool,
	status: u16,
	status_text: &str,
	body: &str,
) -> Result<Roster, DataLoadError> {
	if !ok {
		return Err(DataLoadError::Status {
			status,
			status_text: status_text.to_string(),
		});
	}
	serde_json::from_str(body).map_err(|e| DataLoadError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	const BODY: &str = r#"{
		"members": [
			{"id": 1, "name": "Ada", "nick": "Countess", "class": "1990", "bio": "Analyst"},
			{"id": "b2", "name": "Grace", "class": "1991"}
		],
		"relations": [{"from": 1, "to": "b2"}]
	}"#;

	#[test]
	fn parses_a_successful_response() {
		let roster = parse_roster(true, 200, "OK", BODY).unwrap();
		assert_eq!(roster.members.len(), 2);
		assert_eq!(roster.relations.len(), 1);
		assert_eq!(roster.members[1].nick, None);
	}

	#[test]
	fn rejects_non_success_status_before_parsing() {
		let err = parse_roster(false, 404, "Not Found", BODY).unwrap_err();
		assert_eq!(
			err,
			DataLoadError::Status {
				status: 404,
				status_text: "Not Found".into()
			}
		);
		assert_eq!(err.to_string(), "failed to load roster: HTTP 404 Not Found");
	}

	#[test]
	fn float_and_large_ids_load() {
		let body = r#"{
			"members": [
				{"id": 1.5, "name": "Ada"},
				{"id": 18446744073709551615, "name": "Grace"}
			],
			"relations": [{"from": 1.5, "to": 18446744073709551615}]
		}"#;
		let roster = parse_roster(true, 200, "OK", body).unwrap();
		assert_eq!(roster.members[0].id.to_string(), "1.5");
		assert_eq!(roster.members[1].id.to_string(), "18446744073709551615");
		assert_eq!(roster.relations[0].from, roster.members[0].id);
		assert_eq!(roster.relations[0].to, roster.members[1].id);
	}

	#[test]
	fn malformed_json_is_a_load_error() {
		let err = parse_roster(true, 200, "OK", "{\"members\": [").unwrap_err();
		assert!(matches!(err, DataLoadError::Parse(_)));
	}

	#[test]
	fn missing_relations_key_is_a_load_error() {
		let err = parse_roster(true, 200, "OK", r#"{"members": []}"#).unwrap_err();
		assert!(err.to_string().contains("relations"));
	}
}
