//! Route access policy — pure logic, no network access.
//!
//! [`decide`] is evaluated by the web layer's gate middleware once per
//! navigation request, after the session has been resolved and the profile
//! (if any) has been loaded. Rules are checked in strict priority order and
//! the first match wins, so re-evaluating the same inputs always yields the
//! same decision.

use crate::profile::{ApplicationStatus, Profile};
use crate::roles::Role;

/// Navigation targets the gate redirects to.
pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const AUTH_CALLBACK: &str = "/auth/callback";
    pub const SETTINGS: &str = "/settings";
    pub const PENDING_APPROVAL: &str = "/pending-approval";
    pub const ADMIN: &str = "/admin";

    /// Completion redirect carries a query flag the settings form reads.
    pub const PROFILE_INCOMPLETE: &str = "/settings/profile?incomplete=true";
}

/// Outcome of evaluating the access policy for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Let the request through to its page handler.
    Proceed,
    /// Redirect the browser to the given target instead.
    RedirectTo(&'static str),
}

/// Decide whether a navigation request may proceed.
///
/// `profile` is the record loaded for the session's identity; `None` means
/// either "no session" (ignored unless `has_session`) or "profile missing or
/// unreadable", which is treated as an incomplete profile with unknown role.
///
/// Priority order (first match wins):
///
/// 1. public-path bypass (callback always; login/signup when signed out)
/// 2. unauthenticated guard → login
/// 3. signed-in user on login/signup → home
/// 4. admin bypass (exempt from completion and approval gating)
/// 5. incomplete profile → settings, unless already in settings or on the
///    pending-approval page
/// 6. admin area closed to non-admins → home
/// 7. unapproved founder confined to pending-approval/settings/home
/// 8. approved founder has no business on the pending page → home
/// 9. proceed
pub fn decide(path: &str, has_session: bool, profile: Option<&Profile>) -> Decision {
    let is_callback = path.starts_with(paths::AUTH_CALLBACK);
    let is_public =
        is_callback || path.starts_with(paths::LOGIN) || path.starts_with(paths::SIGNUP);
    let is_settings = path.starts_with(paths::SETTINGS);
    let is_pending = path.starts_with(paths::PENDING_APPROVAL);

    // 1. The auth callback must always pass (it is how sessions get created),
    //    and signed-out users may reach the public pages.
    if is_callback || (is_public && !has_session) {
        return Decision::Proceed;
    }

    // 2.
    if !has_session {
        return Decision::RedirectTo(paths::LOGIN);
    }

    // 3. Signed-in users have no business on login/signup.
    if is_public {
        return Decision::RedirectTo(paths::HOME);
    }

    let Some(profile) = profile else {
        // Missing or unreadable profile: equivalent to an incomplete profile
        // with unknown role. The settings/pending exclusion below is what
        // keeps this from looping on the completion page itself.
        if !is_settings && !is_pending {
            return Decision::RedirectTo(paths::PROFILE_INCOMPLETE);
        }
        return Decision::Proceed;
    };

    // 4. Admins are exempt from completion and approval gating.
    if profile.role == Role::Admin {
        return Decision::Proceed;
    }

    // 5.
    if !profile.is_complete() && !is_settings && !is_pending {
        return Decision::RedirectTo(paths::PROFILE_INCOMPLETE);
    }

    // 6. Only admins enter the admin area; rule 4 already let them through.
    if path.starts_with(paths::ADMIN) {
        return Decision::RedirectTo(paths::HOME);
    }

    // 7 & 8. Founder approval gating.
    if let Some(details) = &profile.founder {
        match details.application_status {
            ApplicationStatus::Approved => {
                if is_pending {
                    return Decision::RedirectTo(paths::HOME);
                }
            }
            // Rejected founders stay confined like pending ones; the
            // pending-approval page renders the rejection notice.
            ApplicationStatus::NotSubmitted
            | ApplicationStatus::Pending
            | ApplicationStatus::Rejected => {
                if !is_pending && !is_settings && path != paths::HOME {
                    return Decision::RedirectTo(paths::PENDING_APPROVAL);
                }
            }
        }
    }

    // 9.
    Decision::Proceed
}
