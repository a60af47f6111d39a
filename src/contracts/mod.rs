//! Contract interfaces used by the on-chain inspector
pub mod erc20;

pub use erc20::{IERC20, REQUIRED_SELECTORS};
