// Backend API access
pub mod transport;

#[cfg(test)]
pub mod mock;

pub use transport::{ApiRequest, ApiResult, HttpTransport, Payload, Transport};
