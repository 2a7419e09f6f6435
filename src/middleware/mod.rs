pub mod preflight;
pub mod response;

pub use preflight::preflight_no_content;
pub use response::{ApiResponse, ApiResult};
