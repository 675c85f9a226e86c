pub mod errors;
pub mod html;
pub mod json;

pub use errors::{html_error_response, ResultResp};

pub use html::{asset_response, html_response, redirect_response};
pub use json::json_response;
