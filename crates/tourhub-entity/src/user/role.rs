//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles a principal can hold.
///
/// Roles are a flat set; route gates list the roles they admit instead of
/// comparing privilege levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    /// Regular customer. Assigned to every self-registered principal.
    #[default]
    User,
    /// Tour guide.
    Guide,
    /// Guide responsible for tour content.
    LeadGuide,
    /// Full system administrator.
    Admin,
}

impl UserRole {
    /// Every role, in declaration order.
    pub const ALL: [UserRole; 4] = [Self::User, Self::Guide, Self::LeadGuide, Self::Admin];

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Guide => "guide",
            Self::LeadGuide => "lead-guide",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
