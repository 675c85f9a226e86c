use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};

pub use crate::errors::ResultResp;

/// Convert a ServerError into an HTML error page with the matching status.
pub fn html_error_response(err: ServerError) -> Response {
    let (status, message) = match &err {
        ServerError::NotFound => (404, "Not Found".to_string()),
        ServerError::DataError(msg) => {
            tracing::error!(error = %msg, "listing data unavailable");
            (500, "Listing data is unavailable right now. Please try again later.".to_string())
        }
        ServerError::InternalError => (500, "Internal Server Error".to_string()),
    };

    let body = error_page(status, &message).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
