//! Request-interception middleware.
//!
//! The route access gate runs in front of every page handler and decides,
//! per navigation, whether the request proceeds or is redirected.

pub mod gate;
