//! RBAC enforcement logic: checks whether a principal's role is admitted.

use tourhub_core::error::AppError;
use tourhub_entity::user::{User, UserRole};

/// Enforces per-route role allow-lists.
///
/// The enforcer never resolves a principal itself; callers pass the one
/// attached by authentication.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    pub fn new() -> Self {
        Self
    }

    /// Returns `Ok(())` if the principal's role is in `allowed`, or
    /// `Err(AppError::Forbidden)` if not.
    pub fn require_role(&self, principal: &User, allowed: &[UserRole]) -> Result<(), AppError> {
        if allowed.contains(&principal.role) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "You do not have permission to perform this action",
            ))
        }
    }
}
