/// Flash message plumbing for redirecting handlers
///
/// A flash is set on a redirect and shown (then cleared) by the next page
/// that reads it: `GET /login` or `GET /dashboard`.

use axum::{
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use folio_shared::auth::middleware::{expired_cookie, flash_cookie, read_flash, FLASH_COOKIE};

/// 303 redirect to `to`
pub fn redirect(to: &str) -> Response {
    Redirect::to(to).into_response()
}

/// 303 redirect to `to` carrying `message` for the next page
pub fn redirect_with_flash(to: &str, message: &str, secure: bool) -> Response {
    (
        AppendHeaders([(SET_COOKIE, flash_cookie(message, secure))]),
        Redirect::to(to),
    )
        .into_response()
}

/// Pending flash message, if any
pub fn take_flash(headers: &HeaderMap) -> Option<String> {
    read_flash(headers)
}

/// Wraps `body` so a shown flash is not shown again
pub fn clear_if_shown<T: IntoResponse>(shown: bool, secure: bool, body: T) -> Response {
    if shown {
        (
            AppendHeaders([(SET_COOKIE, expired_cookie(FLASH_COOKIE, secure))]),
            body,
        )
            .into_response()
    } else {
        body.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::LOCATION, StatusCode};

    #[test]
    fn test_redirect_with_flash() {
        let response =
            redirect_with_flash("/dashboard?tab=skills", "Skill updated successfully!", false);

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/dashboard?tab=skills");

        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("folio_flash="));
    }

    #[test]
    fn test_clear_if_shown() {
        let response = clear_if_shown(true, false, "page");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("folio_flash=;"));
        assert!(cookie.contains("Max-Age=0"));

        let response = clear_if_shown(false, false, "page");
        assert!(response.headers().get(SET_COOKIE).is_none());
    }
}
