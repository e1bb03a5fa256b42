//! REST client for the gruzzolo API and the [`engine::Backend`]
//! implementation frontends submit through.

mod api;
mod backend;
mod convert;

pub use api::{ApiError, RestClient};
pub use backend::HttpBackend;
