pub mod traits;
pub mod detector;

pub use traits::{HoneypotSource, OnchainSource};
pub use detector::{TokenInfo, TokenReport, TokenSafetyChecker};
