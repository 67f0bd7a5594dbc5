// responses/redirect.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Request, ResponseBuilder};

pub const LOGIN_PATH: &str = "/login";

/// 303 See Other, so a POST is followed by a GET.
pub fn redirect(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(303)
        .header("Location", location)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

pub fn redirect_with_cookie(location: &str, cookie: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(303)
        .header("Location", location)
        .header("Set-Cookie", cookie)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

/// Send the visitor to the login page. htmx requests get an `HX-Redirect`
/// so the whole page navigates instead of swapping the login page into a
/// fragment target.
pub fn login_redirect(req: &Request) -> ResultResp {
    if is_htmx(req) {
        return ResponseBuilder::new()
            .status(200)
            .header("HX-Redirect", LOGIN_PATH)
            .body(Body::empty())
            .map_err(|_| ServerError::InternalError);
    }
    redirect(LOGIN_PATH)
}

pub fn is_htmx(req: &Request) -> bool {
    req.headers()
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}
