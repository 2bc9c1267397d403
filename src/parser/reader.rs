use crate::parser::errors::OpResult;
use crate::parser::proto::tx_loc::TxLoc;
use bitcoin::consensus::encode::VarInt;
use bitcoin::consensus::Decodable;
use bitcoin::{Block, BlockHeader, Transaction};
use std::io::{Cursor, Seek};

/// lower bound on an encoded transaction, only used to size allocations
const SMALLEST_TX_SIZE: u64 = 10;

pub trait BlockchainRead: std::io::Read + Seek {
    #[inline]
    fn read_block(&mut self) -> OpResult<Block> {
        Ok(Block::consensus_decode(self)?)
    }

    #[inline]
    fn read_transaction(&mut self) -> OpResult<Transaction> {
        Ok(Transaction::consensus_decode(self)?)
    }

    #[inline]
    fn read_block_header(&mut self) -> OpResult<BlockHeader> {
        Ok(BlockHeader::consensus_decode(self)?)
    }

    #[inline]
    fn read_compact_size(&mut self) -> OpResult<u64> {
        let VarInt(n) = VarInt::consensus_decode(self)?;
        Ok(n)
    }

    ///
    /// Decode a serialized block, recording where each transaction
    /// starts and how many bytes it spans.
    ///
    /// Offsets are relative to the stream position at the call.
    ///
    fn read_tx_locs(&mut self) -> OpResult<Vec<TxLoc>> {
        let base = self.stream_position()?;
        self.read_block_header()?;
        let n_tx = self.read_compact_size()?;

        // the count is untrusted, truncation is reported by read_transaction
        let remaining = {
            let here = self.stream_position()?;
            let end = self.seek(std::io::SeekFrom::End(0))?;
            self.seek(std::io::SeekFrom::Start(here))?;
            end.saturating_sub(here)
        };
        let capacity = n_tx.min(remaining / SMALLEST_TX_SIZE);

        let mut locs = Vec::with_capacity(capacity as usize);
        for _ in 0..n_tx {
            let start = self.stream_position()?;
            self.read_transaction()?;
            let end = self.stream_position()?;
            locs.push(TxLoc {
                offset: (start - base) as usize,
                length: (end - start) as usize,
            });
        }
        Ok(locs)
    }
}

impl BlockchainRead for Cursor<&[u8]> {}
impl BlockchainRead for Cursor<Vec<u8>> {}
