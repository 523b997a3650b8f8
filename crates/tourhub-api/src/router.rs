//! Route definitions for the TourHub HTTP API.
//!
//! Resources are mounted under `/api/v1`. Access control is layered per
//! method: `protect` always wraps `restrict_to`, so a principal is
//! resolved before any role check runs.

use axum::Router;
use axum::http::Uri;
use axum::middleware::from_fn_with_state;
use axum::routing::{MethodRouter, delete, get, patch, post};

use tourhub_core::error::AppError;
use tourhub_entity::user::UserRole;

use crate::error::ApiError;
use crate::handlers;
use crate::middleware::{self, AllowedRoles};
use crate::state::AppState;

const ADMIN: &[UserRole] = &[UserRole::Admin];
const TOUR_STAFF: &[UserRole] = &[UserRole::Admin, UserRole::LeadGuide];
const REVIEW_AUTHORS: &[UserRole] = &[UserRole::User];
const REVIEW_EDITORS: &[UserRole] = &[UserRole::User, UserRole::Admin];

/// Build the complete Axum router.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1/users", user_routes(&state))
        .nest("/api/v1/tours", tour_routes(&state))
        .nest("/api/v1/reviews", review_routes(&state))
        .route(
            "/overview",
            get(handlers::overview::overview)
                .route_layer(from_fn_with_state(state.clone(), middleware::is_logged_in)),
        )
        .route("/api/health", get(handlers::health::health))
        .fallback(not_found)
        .with_state(state)
}

/// Require a live principal.
fn protected(route: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
    route.route_layer(from_fn_with_state(state.clone(), middleware::protect))
}

/// Require a live principal holding one of `roles`.
fn restricted(
    route: MethodRouter<AppState>,
    state: &AppState,
    roles: &'static [UserRole],
) -> MethodRouter<AppState> {
    protected(
        route.route_layer(from_fn_with_state(AllowedRoles(roles), middleware::restrict_to)),
        state,
    )
}

/// Account, self-service, and user administration endpoints
fn user_routes(state: &AppState) -> Router<AppState> {
    use handlers::admin::users as admin;
    use handlers::{auth, user};

    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/forgotPassword", post(auth::forgot_password))
        .route("/resetPassword/{token}", patch(auth::reset_password))
        .route(
            "/updateMyPassword",
            protected(patch(auth::update_my_password), state),
        )
        .route("/me", protected(get(user::get_me), state))
        .route("/updateMe", protected(patch(user::update_me), state))
        .route("/deleteMe", protected(delete(user::delete_me), state))
        .route("/", restricted(get(admin::list_users), state, ADMIN))
        .route(
            "/{id}",
            restricted(
                get(admin::get_user)
                    .patch(admin::update_user)
                    .delete(admin::delete_user),
                state,
                ADMIN,
            ),
        )
}

/// Tour catalogue endpoints, including the reviews of one tour
fn tour_routes(state: &AppState) -> Router<AppState> {
    use handlers::{reviews, tours};

    Router::new()
        .route("/top-5-cheap", get(tours::top_cheap))
        .route(
            "/",
            get(tours::list_tours).merge(restricted(post(tours::create_tour), state, TOUR_STAFF)),
        )
        .route(
            "/{id}",
            get(tours::get_tour).merge(restricted(
                patch(tours::update_tour).delete(tours::delete_tour),
                state,
                TOUR_STAFF,
            )),
        )
        .route(
            "/{id}/reviews",
            protected(get(reviews::list_tour_reviews), state).merge(restricted(
                post(reviews::create_tour_review),
                state,
                REVIEW_AUTHORS,
            )),
        )
}

/// Review endpoints. Every route needs a principal.
fn review_routes(state: &AppState) -> Router<AppState> {
    use handlers::reviews;

    Router::new()
        .route(
            "/",
            protected(get(reviews::list_reviews), state).merge(restricted(
                post(reviews::create_review),
                state,
                REVIEW_AUTHORS,
            )),
        )
        .route(
            "/{id}",
            protected(get(reviews::get_review), state).merge(restricted(
                patch(reviews::update_review).delete(reviews::delete_review),
                state,
                REVIEW_EDITORS,
            )),
        )
}

async fn not_found(uri: Uri) -> ApiError {
    AppError::not_found(format!("Can't find {} on this server!", uri.path())).into()
}
