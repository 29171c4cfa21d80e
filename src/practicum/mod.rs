pub mod client;
pub mod response;
pub mod status;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::ApiResponse;

#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch homework statuses changed since `from_date` (Unix seconds).
    ///
    /// A `from_date` of zero means "now".
    async fn fetch(&self, from_date: i64) -> Result<ApiResponse>;
}
