//! REST boundary: one client, one envelope convention, one error type.

mod client;
mod envelope;
mod error;
mod payload;

pub use client::ApiClient;
pub use envelope::{decode_data, error_from_body};
pub use error::{ApiError, NETWORK_ERROR_MESSAGE};
pub use payload::{Attachment, Payload};
