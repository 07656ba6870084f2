//! Team roster management.
//!
//! The roster lives in one JSON file; profiles carry skills, experience,
//! role, and weekly availability. Older files that predate the last two
//! fields are migrated in place on load paths.

mod overview;
mod roster;

pub use overview::{MatrixRow, TeamOverview};
pub use roster::{
    Experience, MemberProfile, Roster, RosterError, RosterStore, DEFAULT_AVAILABILITY,
    DEFAULT_ROLE, MAX_AVAILABILITY,
};
