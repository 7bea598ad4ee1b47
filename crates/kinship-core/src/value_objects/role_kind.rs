//! Role kind - the fixed catalogue of household roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A domestic role a family member can claim for the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum RoleKind {
    Barista,
    Chef,
    Driver,
    Librarian,
    Dj,
    Gardener,
    Cleaner,
    PetCarer,
}

impl RoleKind {
    /// Every role, in catalogue order
    pub const ALL: [RoleKind; 8] = [
        Self::Barista,
        Self::Chef,
        Self::Driver,
        Self::Librarian,
        Self::Dj,
        Self::Gardener,
        Self::Cleaner,
        Self::PetCarer,
    ];

    /// Canonical name, used on the wire and in storage
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Barista => "Barista",
            Self::Chef => "Chef",
            Self::Driver => "Driver",
            Self::Librarian => "Librarian",
            Self::Dj => "DJ",
            Self::Gardener => "Gardener",
            Self::Cleaner => "Cleaner",
            Self::PetCarer => "Pet Carer",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Barista => "Make morning magic",
            Self::Chef => "Feed the family",
            Self::Driver => "Get everyone places",
            Self::Librarian => "Help with homework",
            Self::Dj => "Set the mood",
            Self::Gardener => "Tend the plants",
            Self::Cleaner => "Keep it tidy",
            Self::PetCarer => "Love the pets",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for RoleKind {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|role| role.as_str().replace(' ', "").to_ascii_lowercase() == key)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for RoleKind {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RoleKind> for &'static str {
    fn from(role: RoleKind) -> Self {
        role.as_str()
    }
}
