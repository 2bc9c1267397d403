//!
//! `CachedBlock`, a bitcoin block with memoized bytes, hashes and
//! transaction locations.
//!
//! # Example
//!
//! ```rust
//! use block_cache::CachedBlock;
//!
//! let raw: Vec<u8> = std::fs::read("block.bin").unwrap();
//! let mut block = CachedBlock::from_bytes(raw).unwrap();
//!
//! let hash = block.block_hash();
//! let first_txid = block.transaction_hash(0).unwrap();
//! ```
//!

mod tx_hashes;

use crate::parser::codec::BlockCodec;
use crate::parser::errors::{OpError, OpErrorKind, OpResult};
use log::{debug, warn};
use std::fmt;
// re-exports
pub use crate::parser::codec::ConsensusCodec;
pub use crate::parser::proto::tx_loc::TxLoc;
pub use bitcoin::hashes::hex::ToHex;
pub use bitcoin::{Block, BlockHash, BlockHeader, Transaction, Txid};

///
/// Height of a block that has not been placed in the main chain yet.
///
pub const BLOCK_HEIGHT_UNKNOWN: i64 = -1;

///
/// This is the main struct of this crate!! Click and read the doc.
///
/// `CachedBlock` wraps a `bitcoin::Block` and memoizes the values
/// that are expensive to derive from it:
/// - serialized bytes
/// - block hash
/// - transaction ids (computed one by one, on demand)
///
/// Every cached value is computed at most once. The wrapped block is
/// never modified, so there is no way (and no need) to clear a cache.
///
/// Accessors that fill a cache take `&mut self`. Share an instance
/// across threads only behind a lock.
///
/// The height is plain metadata assigned by whoever places the block
/// in a chain, and is `BLOCK_HEIGHT_UNKNOWN` until set.
///
pub struct CachedBlock<C: BlockCodec = ConsensusCodec> {
    block: Block,
    codec: C,
    serialized: Option<Vec<u8>>,
    block_hash: Option<BlockHash>,
    tx_hashes: Option<Vec<Option<Txid>>>,
    tx_hashes_complete: bool,
    height: i64,
}

impl CachedBlock<ConsensusCodec> {
    ///
    /// Wrap an already decoded block. Nothing is cached yet.
    ///
    pub fn new(block: Block) -> CachedBlock {
        CachedBlock::with_codec(block, ConsensusCodec)
    }

    ///
    /// Decode a serialized block.
    ///
    /// `raw` is kept as the serialized-bytes cache, so `bytes()`
    /// never has to encode the block again.
    ///
    /// # Example
    ///
    /// ```rust
    /// use block_cache::CachedBlock;
    ///
    /// let raw: Vec<u8> = std::fs::read("block.bin").unwrap();
    /// let mut block = CachedBlock::from_bytes(raw.clone()).unwrap();
    /// assert_eq!(block.bytes().unwrap(), raw.as_slice());
    /// ```
    ///
    pub fn from_bytes(raw: Vec<u8>) -> OpResult<CachedBlock> {
        CachedBlock::from_bytes_with_codec(raw, ConsensusCodec)
    }

    ///
    /// Wrap a decoded block together with its serialized bytes.
    ///
    /// `raw` is trusted to be the exact serialization of `block`,
    /// nothing checks that they match.
    ///
    pub fn from_block_and_bytes(block: Block, raw: Vec<u8>) -> CachedBlock {
        CachedBlock::from_block_and_bytes_with_codec(block, raw, ConsensusCodec)
    }
}

impl<C: BlockCodec> CachedBlock<C> {
    pub fn with_codec(block: Block, codec: C) -> CachedBlock<C> {
        CachedBlock {
            block,
            codec,
            serialized: None,
            block_hash: None,
            tx_hashes: None,
            tx_hashes_complete: false,
            height: BLOCK_HEIGHT_UNKNOWN,
        }
    }

    pub fn from_bytes_with_codec(raw: Vec<u8>, codec: C) -> OpResult<CachedBlock<C>> {
        let block = codec.decode(&raw)?;
        debug!(
            "decoded block with {} transactions from {} bytes",
            block.txdata.len(),
            raw.len()
        );
        let mut cached = CachedBlock::with_codec(block, codec);
        cached.serialized = Some(raw);
        Ok(cached)
    }

    /// an empty `raw` seeds nothing
    pub fn from_block_and_bytes_with_codec(block: Block, raw: Vec<u8>, codec: C) -> CachedBlock<C> {
        let mut cached = CachedBlock::with_codec(block, codec);
        if !raw.is_empty() {
            cached.serialized = Some(raw);
        }
        cached
    }

    ///
    /// The wrapped block.
    ///
    #[inline]
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// release the wrapped block, dropping all caches
    #[inline]
    pub fn into_inner(self) -> Block {
        self.block
    }

    #[inline]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    #[inline]
    pub fn tx_count(&self) -> usize {
        self.block.txdata.len()
    }

    ///
    /// Get a transaction by its position in the block (0 based).
    ///
    pub fn transaction(&self, index: usize) -> OpResult<&Transaction> {
        self.check_tx_index(index)?;
        Ok(&self.block.txdata[index])
    }

    ///
    /// Serialized bytes of the block.
    ///
    /// Encodes the block on first call and caches the result.
    /// A failed encoding is not cached, the next call tries again.
    ///
    pub fn bytes(&mut self) -> OpResult<&[u8]> {
        let CachedBlock {
            ref block,
            ref codec,
            ref mut serialized,
            ..
        } = *self;
        load_serialized(codec, block, serialized)
    }

    ///
    /// Hash of the block header, computed once.
    ///
    pub fn block_hash(&mut self) -> BlockHash {
        let (codec, block) = (&self.codec, &self.block);
        *self
            .block_hash
            .get_or_insert_with(|| codec.block_hash(block))
    }

    ///
    /// Offset and length of every transaction inside `bytes()`.
    ///
    /// The serialized bytes are cached (see `bytes()`), but the locations
    /// are parsed again on every call. Keep the result if you need it twice.
    ///
    /// # Example
    ///
    /// ```rust
    /// use block_cache::CachedBlock;
    ///
    /// let raw: Vec<u8> = std::fs::read("block.bin").unwrap();
    /// let mut block = CachedBlock::from_bytes(raw.clone()).unwrap();
    ///
    /// for loc in block.transaction_offsets().unwrap() {
    ///     let tx_bytes = loc.slice(&raw).unwrap();
    ///     println!("{} bytes at {}", tx_bytes.len(), loc.offset);
    /// }
    /// ```
    ///
    pub fn transaction_offsets(&mut self) -> OpResult<Vec<TxLoc>> {
        let CachedBlock {
            ref block,
            ref codec,
            ref mut serialized,
            ..
        } = *self;
        let raw = load_serialized(codec, block, serialized)?;
        codec.tx_locs(raw)
    }

    ///
    /// Height of the block in the chain, or `BLOCK_HEIGHT_UNKNOWN`.
    ///
    #[inline]
    pub fn height(&self) -> i64 {
        self.height
    }

    #[inline]
    pub fn set_height(&mut self, height: i64) {
        self.height = height;
    }

    fn check_tx_index(&self, index: usize) -> OpResult<()> {
        let n_tx = self.block.txdata.len();
        if index < n_tx {
            Ok(())
        } else {
            Err(OpError::new(OpErrorKind::OutOfRange).join_msg(&format!(
                "transaction index {} is out of range, block has {} transactions",
                index, n_tx
            )))
        }
    }
}

fn load_serialized<'a, C: BlockCodec>(
    codec: &C,
    block: &Block,
    serialized: &'a mut Option<Vec<u8>>,
) -> OpResult<&'a [u8]> {
    let raw = match serialized.take() {
        Some(raw) => raw,
        None => {
            debug!("serializing block with {} transactions", block.txdata.len());
            match codec.encode(block) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("failed to serialize block: {}", e);
                    return Err(e);
                }
            }
        }
    };
    let raw: &'a [u8] = serialized.insert(raw);
    Ok(raw)
}

impl From<Block> for CachedBlock {
    fn from(block: Block) -> CachedBlock {
        CachedBlock::new(block)
    }
}

impl<C: BlockCodec> fmt::Debug for CachedBlock<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hashed_txs = self
            .tx_hashes
            .as_ref()
            .map_or(0, |slots| slots.iter().filter(|h| h.is_some()).count());
        f.debug_struct("CachedBlock")
            .field("block_hash", &self.block_hash.map(|h| h.to_hex()))
            .field("height", &self.height)
            .field("n_tx", &self.block.txdata.len())
            .field("serialized_len", &self.serialized.as_ref().map(Vec::len))
            .field("hashed_txs", &hashed_txs)
            .field("tx_hashes_complete", &self.tx_hashes_complete)
            .finish()
    }
}
