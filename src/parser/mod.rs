//!
//! This module defines how raw block bytes map to `bitcoin::Block`,
//! and how blocks and transactions are hashed.
//!

/// pluggable encoding and hashing of blocks
pub mod codec;

/// define binary block readers
pub mod reader;

/// plain records derived from raw blocks
pub mod proto;

/// error handling
pub mod errors;
