use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Component-library generation the markup targets. Ordered: later profiles are
/// supersets of earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryProfile {
    V3,
    V4,
    V5,
}

impl Default for LibraryProfile {
    fn default() -> Self {
        LibraryProfile::V5
    }
}

impl LibraryProfile {
    pub const ALL: [LibraryProfile; 3] = [LibraryProfile::V3, LibraryProfile::V4, LibraryProfile::V5];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryProfile::V3 => "v3",
            LibraryProfile::V4 => "v4",
            LibraryProfile::V5 => "v5",
        }
    }

    /// True when moving from `self` to `next` drops to an older profile.
    pub fn is_downgrade_to(&self, next: LibraryProfile) -> bool {
        next < *self
    }
}

impl fmt::Display for LibraryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v3" | "3" => Ok(LibraryProfile::V3),
            "v4" | "4" => Ok(LibraryProfile::V4),
            "v5" | "5" => Ok(LibraryProfile::V5),
            other => Err(format!("unknown library profile '{}' (expected v3, v4 or v5)", other)),
        }
    }
}
