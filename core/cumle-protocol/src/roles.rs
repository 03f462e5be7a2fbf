use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Label shown for a word that has not been given a role yet.
pub const UNSELECTED_LABEL: &str = "Seçiniz...";

/// Options offered by the authoring selector, sentinel first.
pub const ROLE_OPTIONS: [&str; 9] = [
    UNSELECTED_LABEL,
    "Özne",
    "Yüklem",
    "Belirtili Nesne",
    "Belirtisiz Nesne",
    "Dolaylı Tümleç",
    "Edat Tümleci",
    "Zarf Tümleci",
    "Cümle Dışı Öğe",
];

/// Grammatical role ("öğe") a word can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Role {
    Subject = 0,                 // Özne
    Predicate = 1,               // Yüklem
    DefiniteObject = 2,          // Belirtili Nesne
    IndefiniteObject = 3,        // Belirtisiz Nesne
    IndirectComplement = 4,      // Dolaylı Tümleç
    PrepositionalComplement = 5, // Edat Tümleci
    AdverbialComplement = 6,     // Zarf Tümleci
    Extrasentential = 7,         // Cümle Dışı Öğe
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Subject,
        Role::Predicate,
        Role::DefiniteObject,
        Role::IndefiniteObject,
        Role::IndirectComplement,
        Role::PrepositionalComplement,
        Role::AdverbialComplement,
        Role::Extrasentential,
    ];

    /// Wire and display label.
    pub const fn label(self) -> &'static str {
        ROLE_OPTIONS[self as usize + 1]
    }

    /// ASCII name for typing on a terminal.
    pub const fn slug(self) -> &'static str {
        match self {
            Role::Subject => "ozne",
            Role::Predicate => "yuklem",
            Role::DefiniteObject => "belirtili-nesne",
            Role::IndefiniteObject => "belirtisiz-nesne",
            Role::IndirectComplement => "dolayli-tumlec",
            Role::PrepositionalComplement => "edat-tumleci",
            Role::AdverbialComplement => "zarf-tumleci",
            Role::Extrasentential => "cumle-disi-oge",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {:?}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Accepts the exact label or the slug (slug match ignores ASCII case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.label() == s || role.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> String {
        role.label().to_string()
    }
}

/// A selector value during authoring: a role or the "not chosen yet" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum RoleSelection {
    #[default]
    Unselected,
    Role(Role),
}

impl RoleSelection {
    pub fn role(self) -> Option<Role> {
        match self {
            RoleSelection::Unselected => None,
            RoleSelection::Role(role) => Some(role),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoleSelection::Unselected => UNSELECTED_LABEL,
            RoleSelection::Role(role) => role.label(),
        }
    }
}

impl From<Role> for RoleSelection {
    fn from(role: Role) -> Self {
        RoleSelection::Role(role)
    }
}

impl FromStr for RoleSelection {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNSELECTED_LABEL || s == "-" {
            return Ok(RoleSelection::Unselected);
        }
        s.parse().map(RoleSelection::Role)
    }
}

impl TryFrom<String> for RoleSelection {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RoleSelection> for String {
    fn from(selection: RoleSelection) -> String {
        selection.label().to_string()
    }
}

impl fmt::Display for RoleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
