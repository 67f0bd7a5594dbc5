use crate::errors::ServerError;
use crate::templates::pages::error_page;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into an HTML error page with the matching status.
pub fn error_response(err: ServerError) -> Response {
    let status = err.status();
    match &err {
        ServerError::DbError(_) | ServerError::InternalError => {
            tracing::warn!(error = %err, status, "request failed");
        }
        _ => tracing::debug!(error = %err, status, "request rejected"),
    }

    let message = match &err {
        ServerError::NotFound => "Not Found".to_string(),
        ServerError::BadRequest(msg) | ServerError::Unauthorized(msg) => msg.clone(),
        // SQL details stay in the logs.
        ServerError::DbError(_) | ServerError::InternalError => {
            "Something went wrong on our side.".to_string()
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(error_page(status, &message).into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
