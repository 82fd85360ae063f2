pub mod api_client;
pub mod errors;
pub mod http;

pub use api_client::{ApiClient, SharedToken};
pub use errors::ApiError;
pub use http::{ApiRequest, ApiResponse, GlooTransport, HttpTransport, Method};
