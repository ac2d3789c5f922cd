/// Sign-in and sign-out endpoints
///
/// Credentials are checked by the identity provider. On success the local
/// `users` row is found or created and a session cookie is issued for it.
///
/// # Endpoints
///
/// - `GET /login` - Pending flash message (JSON)
/// - `POST /login` - Form `email`, `password`; redirects to `/dashboard`
/// - `GET /logout` - Clears the session; redirects to `/login`

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Extension, Json,
};
use folio_shared::{
    auth::{
        identity::IdentityError,
        middleware::{expired_cookie, session_cookie, AuthContext, SESSION_COOKIE},
        session::{create_token, SessionClaims},
    },
    models::user::User,
};
use serde::Serialize;
use tracing::{debug, error, info};

use super::flash::{clear_if_shown, redirect_with_flash, take_flash};
use crate::{app::AppState, error::ApiResult, forms::AdminForm, middleware::session::LOGIN_PATH};

/// Where a successful sign-in lands
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Login page payload
#[derive(Debug, Serialize)]
pub struct LoginPage {
    /// Message left by the previous request (e.g. a failed login)
    pub flash: Option<String>,
}

/// Login page
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let flash = take_flash(&headers);
    let shown = flash.is_some();

    clear_if_shown(shown, state.secure_cookies(), Json(LoginPage { flash }))
}

/// Sign in with email and password
///
/// Every outcome is a redirect: to the dashboard with a session cookie, or
/// back to the login page with a flash explaining what went wrong.
pub async fn login(State(state): State<AppState>, form: AdminForm) -> ApiResult<Response> {
    let secure = state.secure_cookies();

    let (Some(email), Some(password)) = (form.non_empty("email"), form.non_empty("password"))
    else {
        return Ok(redirect_with_flash(
            LOGIN_PATH,
            "Login failed: Email and password are required",
            secure,
        ));
    };

    let identity = match state.identity.sign_in_with_password(&email, &password).await {
        Ok(identity) => identity,
        Err(IdentityError::Rejected(message)) => {
            info!(email = %email, reason = %message, "Login rejected");
            return Ok(redirect_with_flash(
                LOGIN_PATH,
                &format!("Login failed: {}", message),
                secure,
            ));
        }
        Err(e) => {
            error!(error = %e, "Identity provider call failed");
            return Ok(redirect_with_flash(
                LOGIN_PATH,
                "An unexpected error occurred. Please try again.",
                secure,
            ));
        }
    };

    // Local shadow record, created on first sign-in
    let user = User::find_or_create(&state.db, &email, Some(&identity.id)).await?;
    User::update_last_login(&state.db, user.id).await?;

    let claims = SessionClaims::new(user.id, user.email.clone(), identity.access_token);
    let token = create_token(&claims, state.session_secret())?;

    info!(user_id = user.id, "Admin signed in");

    Ok((
        AppendHeaders([(
            SET_COOKIE,
            session_cookie(&token, claims.remaining_seconds(), secure),
        )]),
        Redirect::to(DASHBOARD_PATH),
    )
        .into_response())
}

/// Sign out
///
/// The upstream session is revoked best-effort; the local cookie is always
/// cleared.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Response {
    if let Some(token) = auth.provider_token.as_deref() {
        if let Err(e) = state.identity.sign_out(token).await {
            debug!(error = %e, "Upstream sign-out failed, ignoring");
        }
    }

    info!(user_id = auth.user_id, "Admin signed out");

    (
        AppendHeaders([(
            SET_COOKIE,
            expired_cookie(SESSION_COOKIE, state.secure_cookies()),
        )]),
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}
