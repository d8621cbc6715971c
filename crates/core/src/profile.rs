//! The typed profile record and its completeness predicate.
//!
//! A profile is one record per identity, keyed by the identity reference
//! issued at signup. Common fields apply to every role; founder-only fields
//! (including the application status set by admin approval) live in a
//! [`FounderDetails`] extension that exists iff the role is founder, so a
//! recruiter or admin profile cannot carry an approval status at all.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::roles::Role;

/// Review state of a founder's membership application.
///
/// Set by admin action; `rejected` is terminal. Only `approved` unlocks full
/// navigation — every other status confines the founder to the
/// pending-approval page, settings, and home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::NotSubmitted => "not_submitted",
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_submitted" => Ok(ApplicationStatus::NotSubmitted),
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "unknown application status '{other}'"
            ))),
        }
    }
}

/// Founder-only profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FounderDetails {
    pub application_status: ApplicationStatus,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub industry: Option<String>,
}

/// A user's profile record.
///
/// Fields are nullable until filled in by the owner; [`Profile::is_complete`]
/// decides whether the role-required set is populated. The gate only reads
/// profiles — all mutation goes through the owner's settings forms or admin
/// actions, never through this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Identity reference — the auth provider's user id.
    pub id: Uuid,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub linkedin_url: Option<String>,
    /// Present iff `role` is [`Role::Founder`].
    pub founder: Option<FounderDetails>,
}

impl Profile {
    /// Whether all role-required fields are non-empty after trimming.
    ///
    /// Required for every role: first name, last name, LinkedIn URL.
    /// Additionally required for founders: company name, company website,
    /// industry.
    pub fn is_complete(&self) -> bool {
        let common = filled(&self.first_name) && filled(&self.last_name) && filled(&self.linkedin_url);

        let founder = match &self.founder {
            Some(details) => {
                filled(&details.company_name)
                    && filled(&details.company_website)
                    && filled(&details.industry)
            }
            None => true,
        };

        common && founder
    }

    /// The application status, for founder profiles only.
    pub fn application_status(&self) -> Option<ApplicationStatus> {
        self.founder.as_ref().map(|d| d.application_status)
    }
}

fn filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recruiter() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            role: Role::Recruiter,
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            linkedin_url: Some("https://linkedin.com/in/ada".into()),
            founder: None,
        }
    }

    fn founder(status: ApplicationStatus) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            role: Role::Founder,
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            linkedin_url: Some("https://linkedin.com/in/grace".into()),
            founder: Some(FounderDetails {
                application_status: status,
                company_name: Some("Flowmatic".into()),
                company_website: Some("https://flowmatic.dev".into()),
                industry: Some("devtools".into()),
            }),
        }
    }

    #[test]
    fn test_complete_recruiter() {
        assert!(recruiter().is_complete());
    }

    #[test]
    fn test_missing_common_field_is_incomplete() {
        let mut p = recruiter();
        p.last_name = None;
        assert!(!p.is_complete());
    }

    #[test]
    fn test_whitespace_only_field_is_incomplete() {
        let mut p = recruiter();
        p.linkedin_url = Some("   ".into());
        assert!(!p.is_complete());
    }

    #[test]
    fn test_founder_requires_company_fields() {
        let mut p = founder(ApplicationStatus::Approved);
        assert!(p.is_complete());

        p.founder.as_mut().unwrap().company_website = None;
        assert!(!p.is_complete());
    }

    #[test]
    fn test_recruiter_ignores_founder_fields() {
        // A recruiter with no founder extension is complete on common
        // fields alone.
        let p = recruiter();
        assert!(p.founder.is_none());
        assert!(p.is_complete());
        assert_eq!(p.application_status(), None);
    }

    #[test]
    fn test_application_status_round_trips() {
        for status in [
            ApplicationStatus::NotSubmitted,
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(
                status.as_str().parse::<ApplicationStatus>().unwrap(),
                status
            );
        }
        assert!("unknown".parse::<ApplicationStatus>().is_err());
    }
}
