pub mod api;
pub mod detect;
pub mod http;
pub mod submit;

#[cfg(test)]
pub(crate) mod fake;

pub use api::VerificationApi;
pub use http::HttpVerificationClient;
pub use submit::{submission_message, submit};
