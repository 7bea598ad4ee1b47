//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use kinship_common::JwtService;
use kinship_core::{InviteCodeSource, SnowflakeGenerator};
use kinship_service::{ServiceContext, ServiceContextBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::memory::MemoryStore;

/// Shared secret for tokens minted in tests
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Audience the test verifier expects
pub const TEST_JWT_AUDIENCE: &str = "authenticated";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A calendar day for board tests
pub fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).expect("valid test date")
}

pub fn test_jwt_service() -> JwtService {
    JwtService::new(TEST_JWT_SECRET, Some(TEST_JWT_AUDIENCE.to_string()))
}

/// Access token for `user_id`, as the auth service would issue it
pub fn token_for(user_id: Uuid) -> String {
    test_jwt_service()
        .issue_token(user_id, Duration::hours(1))
        .expect("token encoding")
}

/// Service context over an in-memory store
pub fn memory_context(store: &Arc<MemoryStore>) -> ServiceContext {
    memory_context_builder(store)
        .build()
        .expect("in-memory service context")
}

/// Service context over an in-memory store with a fixed invite-code source
pub fn memory_context_with_codes(
    store: &Arc<MemoryStore>,
    codes: Arc<dyn InviteCodeSource>,
) -> ServiceContext {
    memory_context_builder(store)
        .invite_codes(codes)
        .build()
        .expect("in-memory service context")
}

fn memory_context_builder(store: &Arc<MemoryStore>) -> ServiceContextBuilder {
    ServiceContextBuilder::new()
        .family_repo(store.clone())
        .member_repo(store.clone())
        .role_assignment_repo(store.clone())
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(7)))
        .jwt_service(Arc::new(test_jwt_service()))
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateFamilyBody {
    pub family_name: String,
}

impl CreateFamilyBody {
    pub fn named(name: &str) -> Self {
        Self {
            family_name: name.to_string(),
        }
    }

    pub fn unique() -> Self {
        Self::named(&format!("Test Family {}", unique_suffix()))
    }
}

#[derive(Debug, Serialize)]
pub struct AssignRoleBody {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl AssignRoleBody {
    pub fn on(role: &str, date: NaiveDate) -> Self {
        Self {
            role: role.to_string(),
            date: Some(date),
        }
    }

    pub fn today(role: &str) -> Self {
        Self {
            role: role.to_string(),
            date: None,
        }
    }
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FamilyBody {
    pub id: String,
    pub family_name: String,
    pub invite_code: String,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct MemberBody {
    pub user_id: Uuid,
    pub family_id: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct FamilyMembershipBody {
    pub family: FamilyBody,
    pub member: MemberBody,
}

#[derive(Debug, Deserialize)]
pub struct InvitePreviewBody {
    pub family_name: String,
    pub invite_code: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleKindBody {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentBody {
    pub id: String,
    pub user_id: Uuid,
    pub family_id: String,
    pub role: String,
    pub assigned_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleBoardBody {
    pub date: NaiveDate,
    pub assignments: Vec<AssignmentBody>,
    pub my_role: Option<AssignmentBody>,
    pub taken_by_others: Vec<String>,
    pub available: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBodyDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBodyDetail {
    pub code: String,
    pub message: String,
}
