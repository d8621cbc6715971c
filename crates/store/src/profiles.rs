//! Single-row profile lookup against the backend's row API.
//!
//! The gate re-fetches the profile on every navigation (staleness of zero,
//! no cross-request caching), so this is deliberately a one-call client: one
//! `GET` filtered by identity reference, returning at most one row.

use std::str::FromStr;

use serde::Deserialize;
use uuid::Uuid;

use foundry_core::error::CoreError;
use foundry_core::profile::{ApplicationStatus, FounderDetails, Profile};
use foundry_core::roles::Role;

use crate::error::StoreError;

/// Columns fetched for the gate's completeness and approval checks.
const SELECT_COLUMNS: &str =
    "id,role,application_status,first_name,last_name,linkedin_url,company_name,company_website,industry";

/// HTTP client for the `profiles` table of one hosted backend.
pub struct ProfileStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// The flat profile row as the row API returns it.
///
/// `role` and `application_status` arrive as free-form text; conversion into
/// the typed [`Profile`] validates them and attaches the founder extension
/// only when the role warrants it.
#[derive(Debug, Deserialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub role: String,
    pub application_status: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub industry: Option<String>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = CoreError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role)?;

        // The founder extension exists iff the role is founder; a status
        // value on any other role is meaningless and dropped here. A founder
        // row with no status yet simply has not submitted an application.
        let founder = match role {
            Role::Founder => {
                let application_status = match row.application_status.as_deref() {
                    Some(raw) => ApplicationStatus::from_str(raw)?,
                    None => ApplicationStatus::NotSubmitted,
                };
                Some(FounderDetails {
                    application_status,
                    company_name: row.company_name,
                    company_website: row.company_website,
                    industry: row.industry,
                })
            }
            Role::Recruiter | Role::Admin => None,
        };

        Ok(Profile {
            id: row.id,
            role,
            first_name: row.first_name,
            last_name: row.last_name,
            linkedin_url: row.linkedin_url,
            founder,
        })
    }
}

impl ProfileStore {
    /// Create a profile store client sharing the given [`reqwest::Client`].
    pub fn new(client: reqwest::Client, base_url: String, anon_key: String) -> Self {
        Self {
            client,
            base_url,
            anon_key,
        }
    }

    /// Fetch the profile for one identity reference.
    ///
    /// Sends `GET /rest/v1/profiles?id=eq.{id}` requesting a single object.
    /// Returns `Ok(None)` when no row exists for the id; row-level security
    /// is enforced by the caller's access token, which is forwarded as the
    /// bearer credential.
    pub async fn fetch(
        &self,
        id: Uuid,
        access_token: &str,
    ) -> Result<Option<Profile>, StoreError> {
        let response = self
            .client
            .get(format!("{}/rest/v1/profiles", self.base_url))
            .query(&[
                ("id", format!("eq.{id}")),
                ("select", SELECT_COLUMNS.to_string()),
            ])
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            // Ask the row API to unwrap the single-element array; it answers
            // 406 when zero rows match.
            .header("accept", "application/vnd.pgrst.object+json")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND
            || status == reqwest::StatusCode::NOT_ACCEPTABLE
        {
            tracing::debug!(%id, "no profile row for identity");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let row: ProfileRow = response.json().await?;
        Ok(Some(row.try_into()?))
    }
}
