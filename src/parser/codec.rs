use crate::parser::errors::{OpError, OpErrorKind, OpResult};
use crate::parser::proto::tx_loc::TxLoc;
use crate::parser::reader::BlockchainRead;
use bitcoin::consensus::{deserialize, Encodable};
use bitcoin::{Block, BlockHash, Transaction, Txid};
use std::io::Cursor;

///
/// Wire format and hashing used by `CachedBlock`.
///
/// Hashing is infallible; encoding and decoding are not.
///
pub trait BlockCodec: Sync {
    /// decode a complete block, rejecting trailing bytes
    fn decode(&self, raw: &[u8]) -> OpResult<Block>;

    fn encode(&self, block: &Block) -> OpResult<Vec<u8>>;

    fn block_hash(&self, block: &Block) -> BlockHash;

    fn txid(&self, tx: &Transaction) -> Txid;

    /// offsets and lengths of every transaction in a raw block
    fn tx_locs(&self, raw: &[u8]) -> OpResult<Vec<TxLoc>>;
}

///
/// Bitcoin consensus encoding.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsensusCodec;

impl BlockCodec for ConsensusCodec {
    #[inline]
    fn decode(&self, raw: &[u8]) -> OpResult<Block> {
        Ok(deserialize(raw)?)
    }

    fn encode(&self, block: &Block) -> OpResult<Vec<u8>> {
        let mut buf = Vec::new();
        match block.consensus_encode(&mut buf) {
            Ok(_) => Ok(buf),
            Err(e) => Err(OpError::new(OpErrorKind::EncodeError).join_msg(&e.to_string())),
        }
    }

    #[inline]
    fn block_hash(&self, block: &Block) -> BlockHash {
        block.block_hash()
    }

    #[inline]
    fn txid(&self, tx: &Transaction) -> Txid {
        tx.txid()
    }

    #[inline]
    fn tx_locs(&self, raw: &[u8]) -> OpResult<Vec<TxLoc>> {
        Cursor::new(raw).read_tx_locs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::blockdata::constants::genesis_block;
    use bitcoin::hashes::hex::ToHex;
    use bitcoin::Network;

    const GENESIS_HASH: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
    const GENESIS_TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

    #[test]
    fn test_hashes() {
        let block = genesis_block(Network::Bitcoin);
        assert_eq!(ConsensusCodec.block_hash(&block).to_hex(), GENESIS_HASH);
        assert_eq!(ConsensusCodec.txid(&block.txdata[0]).to_hex(), GENESIS_TXID);
    }

    #[test]
    fn test_encode_decode() {
        let block = genesis_block(Network::Bitcoin);
        let raw = ConsensusCodec.encode(&block).unwrap();
        assert_eq!(raw.len(), 285);
        assert_eq!(ConsensusCodec.decode(&raw).unwrap(), block);
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut raw = ConsensusCodec.encode(&genesis_block(Network::Bitcoin)).unwrap();
        raw.push(0);
        let err = ConsensusCodec.decode(&raw).unwrap_err();
        assert_eq!(err.kind(), OpErrorKind::DecodeError);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = ConsensusCodec.decode(&[0x01, 0x02, 0x03]).unwrap_err();
        assert_eq!(err.kind(), OpErrorKind::DecodeError);
    }
}
