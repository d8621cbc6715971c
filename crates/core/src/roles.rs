//! Platform roles.
//!
//! A role is assigned at signup and is immutable thereafter except by admin
//! action. The string forms must match the `role` column of the hosted
//! `profiles` table.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A user's platform role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Founder,
    Recruiter,
    Admin,
}

impl Role {
    /// The string form stored in the profile row.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Founder => "founder",
            Role::Recruiter => "recruiter",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "founder" => Ok(Role::Founder),
            "recruiter" => Ok(Role::Recruiter),
            "admin" => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!("unknown role '{other}'"))),
        }
    }
}
