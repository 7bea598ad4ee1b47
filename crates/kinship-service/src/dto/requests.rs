//! Request DTOs for API endpoints
//!
//! Body DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::NaiveDate;
use kinship_core::RoleKind;
use serde::Deserialize;
use validator::Validate;

/// Create family request
///
/// The name is trimmed before its length is checked, so that rule lives in
/// `Family::normalize_name` rather than here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFamilyRequest {
    pub family_name: String,
}

/// Claim a role for a day (today when `date` is omitted)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssignRoleRequest {
    pub role: RoleKind,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// `?date=YYYY-MM-DD`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}
