pub mod classification;
pub mod codes;
pub mod constructors;
pub mod types;

pub use codes::ErrorCode;
pub use types::{Error, ErrorOrigin, Result};
