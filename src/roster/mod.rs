//! Member roster: the data model and the loader that fetches it.

mod loader;
mod types;

pub use loader::{DataLoadError, load_roster, parse_roster};
pub(crate) use types::find_member;
pub use types::{Member, MemberId, Relation, Roster};
