pub mod errors;

pub use errors::{CheckError, Result};
