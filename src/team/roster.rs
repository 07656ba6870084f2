//! Team roster persistence.
//!
//! The roster is a single JSON document mapping member name to profile,
//! read and rewritten wholesale on every mutation. Concurrent writers are
//! not coordinated; the last writer wins.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default role assigned to members created before roles existed.
pub const DEFAULT_ROLE: &str = "Team Member";

/// Default weekly availability in hours (full-time).
pub const DEFAULT_AVAILABILITY: u32 = 40;

/// Maximum weekly availability in hours.
pub const MAX_AVAILABILITY: u32 = 40;

/// The persisted mapping of member name to profile.
///
/// A BTreeMap keeps serialization order deterministic so that re-saving an
/// unchanged roster reproduces the file byte for byte.
pub type Roster = BTreeMap<String, MemberProfile>;

/// Experience level of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Experience {
    Junior,
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
}

impl Experience {
    /// All levels in ascending order, for selectors.
    pub const ALL: [Self; 3] = [Self::Junior, Self::MidLevel, Self::Senior];

    /// The wire/display form (also the JSON representation).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "Junior",
            Self::MidLevel => "Mid-level",
            Self::Senior => "Senior",
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Experience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "junior" => Ok(Self::Junior),
            "mid" | "mid-level" | "midlevel" => Ok(Self::MidLevel),
            "senior" => Ok(Self::Senior),
            other => Err(format!("unknown experience level '{other}' (junior, mid-level, senior)")),
        }
    }
}

/// One team member's profile.
///
/// `role` and `availability` were added after the first roster files
/// shipped, so they deserialize as optional; [`RosterStore::migrate`]
/// back-fills the defaults and accessors never expose the gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Free-text skills, in the order the user entered them.
    pub skills: Vec<String>,

    /// Experience level.
    pub experience: Experience,

    /// Role/position, e.g. "Backend Engineer".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Weekly availability in hours, 0-40.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<u32>,
}

impl MemberProfile {
    /// Create a profile with the required fields.
    pub fn new(skills: Vec<String>, experience: Experience) -> Self {
        Self { skills, experience, role: None, availability: None }
    }

    /// Set the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the weekly availability.
    pub fn with_availability(mut self, hours: u32) -> Self {
        self.availability = Some(hours);
        self
    }

    /// Role, falling back to the pre-migration default.
    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or(DEFAULT_ROLE)
    }

    /// Weekly availability in hours, falling back to full-time.
    pub fn availability(&self) -> u32 {
        self.availability.unwrap_or(DEFAULT_AVAILABILITY)
    }

    /// Parse a comma-separated skills string the way the add-member form
    /// collects it. Empty segments are dropped; duplicates are kept.
    pub fn parse_skills(input: &str) -> Vec<String> {
        input.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
    }
}

/// Roster operation error types.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("team member '{0}' already exists")]
    Duplicate(String),

    #[error("no team member named '{0}'")]
    NotFound(String),

    #[error("availability must be between 0 and {MAX_AVAILABILITY} hours/week, got {0}")]
    InvalidAvailability(u32),

    #[error("failed to write roster file: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("failed to serialize roster: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Roster store backed by one JSON file.
#[derive(Debug)]
pub struct RosterStore {
    /// Path to the roster file
    path: PathBuf,
    /// In-memory roster, the whole file's content
    roster: Roster,
}

impl RosterStore {
    /// Default roster path, relative to the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("data/team.json")
    }

    /// Open the roster at the default path.
    pub fn open_default() -> Self {
        Self::open(Self::default_path())
    }

    /// Open a roster file.
    ///
    /// A missing file is treated as an empty roster and a fresh empty file
    /// is written. An unreadable or corrupt file is logged and degrades to
    /// an empty roster; the file on disk is left alone until the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let roster = Self::read_roster(&path);
        Self { path, roster }
    }

    fn read_roster(path: &Path) -> Roster {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "roster file not found, creating empty roster");
            let empty = Roster::new();
            if let Err(e) = Self::write_roster(path, &empty) {
                tracing::error!("failed to create empty roster file: {e}");
            }
            return empty;
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(roster) => roster,
                Err(e) => {
                    tracing::error!(path = %path.display(), "corrupt roster file, starting empty: {e}");
                    Roster::new()
                }
            },
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to read roster file, starting empty: {e}");
                Roster::new()
            }
        }
    }

    fn write_roster(path: &Path, roster: &Roster) -> Result<(), RosterError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(roster)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Persist the whole roster, overwriting the file.
    pub fn save(&self) -> Result<(), RosterError> {
        Self::write_roster(&self.path, &self.roster)
    }

    /// Back-fill `role` and `availability` on profiles that predate those
    /// fields, persisting only if something changed. Running twice is a
    /// no-op the second time.
    pub fn migrate(&mut self) -> Result<bool, RosterError> {
        let mut updated = false;

        for profile in self.roster.values_mut() {
            if profile.role.is_none() {
                profile.role = Some(DEFAULT_ROLE.to_string());
                updated = true;
            }
            if profile.availability.is_none() {
                profile.availability = Some(DEFAULT_AVAILABILITY);
                updated = true;
            }
        }

        if updated {
            tracing::info!("migrated roster profiles to include role and availability");
            self.save()?;
        }
        Ok(updated)
    }

    /// Add a member and persist. Rejects duplicate names and out-of-range
    /// availability before touching memory or disk.
    pub fn add(&mut self, name: &str, profile: MemberProfile) -> Result<(), RosterError> {
        if self.roster.contains_key(name) {
            return Err(RosterError::Duplicate(name.to_string()));
        }
        if let Some(hours) = profile.availability {
            if hours > MAX_AVAILABILITY {
                return Err(RosterError::InvalidAvailability(hours));
            }
        }
        self.roster.insert(name.to_string(), profile);
        self.save()
    }

    /// Remove a member and persist. Unknown names fail without a write.
    pub fn remove(&mut self, name: &str) -> Result<(), RosterError> {
        if self.roster.remove(name).is_none() {
            return Err(RosterError::NotFound(name.to_string()));
        }
        self.save()
    }

    /// The in-memory roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Look up one member.
    pub fn get(&self, name: &str) -> Option<&MemberProfile> {
        self.roster.get(name)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    /// Whether the roster has no members.
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The roster as pretty-printed JSON, as fed to the assignment prompt.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.roster).unwrap_or_default()
    }
}
