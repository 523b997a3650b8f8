//! Role gate middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use tourhub_auth::RbacEnforcer;
use tourhub_core::error::AppError;
use tourhub_entity::user::UserRole;

use crate::error::ApiResult;
use crate::extractors::CurrentUser;

/// Roles admitted by a [`restrict_to`] layer.
#[derive(Debug, Clone, Copy)]
pub struct AllowedRoles(pub &'static [UserRole]);

/// Reject principals whose role is not in the allowed set.
///
/// Must be layered inside `protect`. A request that reaches this stage
/// without a principal is rejected as unauthenticated; the gate never
/// resolves one itself.
pub async fn restrict_to(
    State(AllowedRoles(allowed)): State<AllowedRoles>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let Some(CurrentUser(user)) = request.extensions().get::<CurrentUser>() else {
        return Err(AppError::unauthenticated(
            "You are not logged in! Please log in to get access.",
        )
        .into());
    };
    RbacEnforcer::new().require_role(user, allowed)?;
    Ok(next.run(request).await)
}
