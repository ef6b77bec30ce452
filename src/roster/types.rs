//! Roster data structures as they appear in the data file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a member. The data file may use either strings or numbers.
///
/// Comparison is strict: the number `1` and the string `"1"` are different ids,
/// and so are `1` and `1.0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MemberId {
	/// Any JSON number, integer or not.
	Number(serde_json::Number),
	/// A JSON string.
	Text(String),
}

impl fmt::Display for MemberId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MemberId::Number(n) => write!(f, "{n}"),
			MemberId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for MemberId {
	fn from(n: i64) -> Self {
		MemberId::Number(n.into())
	}
}

impl From<&str> for MemberId {
	fn from(s: &str) -> Self {
		MemberId::Text(s.to_string())
	}
}

/// A person in the graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Member {
	/// Unique across the roster. Relations reference members by this id.
	pub id: MemberId,
	/// Display name, also the node label.
	pub name: String,
	#[serde(default)]
	/// Nickname.
	pub nick: Option<String>,
	/// Cohort label, e.g. the graduation year.
	#[serde(default)]
	pub class: String,
	#[serde(default)]
	/// Short biography.
	pub bio: Option<String>,
}

impl Member {
	/// Nickname, treating an empty string as absent.
	pub fn nick(&self) -> Option<&str> {
		non_empty(self.nick.as_deref())
	}

	/// Cohort label, treating an empty string as absent.
	pub fn class(&self) -> Option<&str> {
		non_empty(Some(self.class.as_str()))
	}

	/// Biography, treating an empty string as absent.
	pub fn bio(&self) -> Option<&str> {
		non_empty(self.bio.as_deref())
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|s| !s.is_empty())
}

/// A directed edge between two members.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Relation {
	/// Source member.
	pub from: MemberId,
	/// Target member, the end that gets the arrowhead.
	pub to: MemberId,
}

/// The complete data file: members and the relations between them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Roster {
	/// Everyone in the graph.
	pub members: Vec<Member>,
	/// Directed relations between members, in file order.
	pub relations: Vec<Relation>,
}

/// Find a member by id. Linear scan; rosters are small.
pub(crate) fn find_member<'a>(members: &'a [Member], id: &MemberId) -> Option<&'a Member> {
	members.iter().find(|m| &m.id == id)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_deserialize_from_strings_and_numbers() {
		let ids: Vec<MemberId> = serde_json::from_str(r#"[7, "ada"]"#).unwrap();
		assert_eq!(ids, vec![MemberId::from(7), MemberId::Text("ada".into())]);
		assert_eq!(ids[0].to_string(), "7");
		assert_eq!(ids[1].to_string(), "ada");
	}

	#[test]
	fn numeric_and_text_ids_do_not_match() {
		assert_ne!(MemberId::from(1), MemberId::from("1"));
	}

	#[test]
	fn empty_optional_fields_read_as_absent() {
		let member: Member =
			serde_json::from_str(r#"{"id": 1, "name": "Ada", "nick": "", "bio": ""}"#).unwrap();
		assert_eq!(member.nick(), None);
		assert_eq!(member.class(), None);
		assert_eq!(member.bio(), None);
	}

	#[test]
	fn find_member_uses_strict_ids() {
		let roster: Roster = serde_json::from_str(
			r#"{"members": [{"id": 1, "name": "Ada", "class": "1990"}], "relations": []}"#,
		)
		.unwrap();
		assert_eq!(
			find_member(&roster.members, &MemberId::from(1)).map(|m| m.name.as_str()),
			Some("Ada")
		);
		assert!(find_member(&roster.members, &MemberId::from("1")).is_none());
	}

	#[test]
	fn ids_keep_any_json_number() {
		let ids: Vec<MemberId> =
			serde_json::from_str("[1.5, 18446744073709551615, -3]").unwrap();
		assert_eq!(ids[0].to_string(), "1.5");
		assert_eq!(ids[1].to_string(), "18446744073709551615");
		assert_eq!(ids[2], MemberId::from(-3));
		// Integer and float spellings are distinct ids.
		let one: Vec<MemberId> = serde_json::from_str("[1, 1.0]").unwrap();
		assert_ne!(one[0], one[1]);
	}
}
