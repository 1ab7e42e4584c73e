//! Who is looking at the Campus Events shell

use std::fmt;

/// View mode passed down to child views
///
/// Admins add and delete events; users search, express interest and follow
/// registration links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Persona {
    /// Event organiser
    Admin,
    /// Anonymous student
    #[default]
    User,
}

impl Persona {
    /// The other persona
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Admin => Self::User,
            Self::User => Self::Admin,
        }
    }

    /// Whether this is the admin view
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("Admin"),
            Self::User => f.write_str("User"),
        }
    }
}
