//! HTTP transport shared by the tree API clients.

mod http;

pub use http::{HttpTransport, TransportError};
