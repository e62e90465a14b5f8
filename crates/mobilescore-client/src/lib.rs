mod client;
mod error;
mod response;
mod retry;
mod transport;

pub use client::{DEFAULT_ENDPOINT, PageSpeedClient, Strategy};
pub use error::{Error, Result};
pub use response::{Audit, Categories, Category, LighthouseResult, PageSpeedResponse};
pub use retry::{RetryError, RetryPolicy};
pub use transport::{HttpResponse, HttpTransport, Transport};
