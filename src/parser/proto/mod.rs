//!
//! Plain data records describing where things live inside raw block bytes.
//!

/// offset and length of a transaction inside a serialized block
pub mod tx_loc;
