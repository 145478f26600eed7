pub mod error;
pub mod response;

pub use error::{handle_panic, AppError, AppJson, AppResult};
pub use response::ApiSuccess;
