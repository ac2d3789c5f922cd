/// Session guards for the admin surface
///
/// Both guards validate the session cookie (or bearer token), load the local
/// user row and insert an [`AuthContext`] into request extensions. They only
/// differ in how an anonymous request is turned away:
///
/// - [`require_session`]: browser form routes, redirects to `/login`
/// - [`require_api_session`]: JSON routes, answers `401`

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use folio_shared::auth::middleware::{authenticate, AuthContext, AuthError};
use tracing::debug;

use crate::{app::AppState, error::ApiError};

/// Where anonymous browser requests are sent
pub const LOGIN_PATH: &str = "/login";

/// Session guard for browser routes
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match authenticate(&state.db, state.session_secret(), req.headers()).await {
        Ok(auth) => {
            req.extensions_mut().insert::<AuthContext>(auth);
            next.run(req).await
        }
        Err(AuthError::DatabaseError(msg)) => ApiError::InternalError(msg).into_response(),
        Err(err) => {
            debug!(
                path = %req.uri().path(),
                error = ?err,
                "Anonymous request, redirecting to login"
            );
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

/// Session guard for JSON routes
pub async fn require_api_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = authenticate(&state.db, state.session_secret(), req.headers()).await?;
    req.extensions_mut().insert::<AuthContext>(auth);

    Ok(next.run(req).await)
}
