//! Ownership-label codec.
//!
//! The label key pre-dates this gateway; every app already running on the
//! shared cluster carries it, so it is a wire-format constant.

/// Metadata key recording which app id a spec was submitted under.
pub const OWNERSHIP_LABEL_KEY: &str = "hollowman.appname";

const OWNERSHIP_PREFIX: &str = "hollowman.appname=";

/// Canonical encoded form: `hollowman.appname=<app_id>`.
pub fn encode(app_id: &str) -> String {
    format!("{OWNERSHIP_LABEL_KEY}={app_id}")
}

/// Any value carrying the ownership key counts, whatever the suffix says;
/// stale and duplicated labels must be recognized so they can be replaced.
pub fn is_ownership_label(value: &str) -> bool {
    value.starts_with(OWNERSHIP_PREFIX)
}
