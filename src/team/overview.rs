//! Read-only team aggregates for the overview view.

use std::collections::BTreeSet;

use super::roster::{Experience, Roster};

/// Aggregate statistics over the roster, plus a member × skill matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamOverview {
    /// Number of members on the roster.
    pub member_count: usize,

    /// Every distinct skill across the team, sorted.
    pub skills: Vec<String>,

    /// Number of members with Senior experience.
    pub senior_count: usize,

    /// One row per member: name and a presence flag per entry in `skills`.
    pub matrix: Vec<MatrixRow>,
}

/// One member's row in the skills matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub name: String,
    pub has_skill: Vec<bool>,
}

impl TeamOverview {
    /// Compute the overview from a roster snapshot.
    pub fn from_roster(roster: &Roster) -> Self {
        let skills: Vec<String> = roster
            .values()
            .flat_map(|p| p.skills.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let senior_count =
            roster.values().filter(|p| p.experience == Experience::Senior).count();

        let matrix = roster
            .iter()
            .map(|(name, profile)| MatrixRow {
                name: name.clone(),
                has_skill: skills.iter().map(|s| profile.skills.contains(s)).collect(),
            })
            .collect();

        Self { member_count: roster.len(), skills, senior_count, matrix }
    }

    /// Number of distinct skills across the team.
    pub fn distinct_skill_count(&self) -> usize {
        self.skills.len()
    }
}
