//! ERC20 token interface and function selectors
use ethers::prelude::*;

abigen!(
    IERC20,
    r#"[
        function totalSupply() external view returns (uint256)
        function balanceOf(address account) external view returns (uint256)
        function transfer(address to, uint256 amount) external returns (bool)
        function allowance(address owner, address spender) external view returns (uint256)
        function approve(address spender, uint256 amount) external returns (bool)
        function transferFrom(address from, address to, uint256 amount) external returns (bool)
        function decimals() external view returns (uint8)
        function name() external view returns (string)
        function symbol() external view returns (string)
    ]"#,
);

/// (check name, 4-byte selector as uppercase hex) for the functions every
/// ERC20 must dispatch on.
pub const REQUIRED_SELECTORS: &[(&str, &str)] = &[
    ("has_transfer_function", "A9059CBB"),
    ("has_transfer_from_function", "23B872DD"),
    ("has_approve_function", "095EA7B3"),
    ("has_balance_of_function", "70A08231"),
    ("has_total_supply_function", "18160DDD"),
];
