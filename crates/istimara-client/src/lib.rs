//! Istimara transport SDK
//!
//! REST client for the forms backend. The engine's surfaces program against
//! the [`FormsApi`] port; [`HttpFormsApi`] speaks the real backend with an
//! injected bearer credential, and [`InMemoryFormsApi`] backs tests and
//! offline demos.

pub mod api;
pub mod error;
pub mod http;
pub mod memory;
pub mod types;

// Re-exports for convenience
pub use api::FormsApi;
pub use error::{ApiError, ApiResult};
pub use http::HttpFormsApi;
pub use memory::InMemoryFormsApi;
pub use types::{
    Author, CreateFormRequest, Credential, ExportFormat, FormResponse, FormSummary,
    SubmissionReceipt,
};
