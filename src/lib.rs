//!
//! # Introduction
//!
//! This library wraps a decoded bitcoin block and memoizes the values
//! higher level chain code keeps asking for:
//! its serialized bytes, its hash, the ids of its transactions,
//! and where each transaction sits inside the raw block.
//!
//! Each value is computed on first access and served from the cache
//! afterwards. Transaction ids are cached one by one, so asking for a
//! single txid never hashes the whole block.
//!
//! ## Features
//!
//! - `parallel` (default): hash missing transactions with rayon
//!   when all txids are requested at once.
//!
//! # Example
//!
//! ```rust
//! use block_cache::CachedBlock;
//!
//! let raw: Vec<u8> = std::fs::read("block.bin").unwrap();
//! let mut block = CachedBlock::from_bytes(raw).unwrap();
//! block.set_height(500);
//!
//! println!("{} at height {}", block.block_hash(), block.height());
//! for txid in block.all_transaction_hashes() {
//!     println!("{}", txid);
//! }
//! ```
//!

pub(crate) mod api;
pub mod parser;

#[doc(inline)]
pub use crate::api::*;
#[doc(inline)]
pub use crate::parser::codec::BlockCodec;
#[doc(inline)]
pub use crate::parser::errors::{OpError, OpErrorKind, OpResult};
