pub mod actors;
pub mod assignments;
pub mod common;
pub mod evaluations;
pub mod reports;
pub mod spaces;
pub mod submissions;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
