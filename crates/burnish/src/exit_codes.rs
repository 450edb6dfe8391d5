//! Exit codes for the CLI
//!
//! Individual task failures never map to a non-zero exit; only
//! engine-level errors do.

#![allow(dead_code)]

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// File enumeration error
pub const WALK_ERROR: i32 = 3;
