//!
//! lazily computed transaction ids
//!
use crate::api::{CachedBlock, Transaction, Txid};
use crate::parser::codec::BlockCodec;
use crate::parser::errors::OpResult;
use log::trace;

impl<C: BlockCodec> CachedBlock<C> {
    ///
    /// Get the txid of the transaction at `index` (0 based).
    ///
    /// Only this transaction is hashed, and only the first time.
    /// Fails with `OpErrorKind::OutOfRange` unless `index < tx_count()`.
    ///
    pub fn transaction_hash(&mut self, index: usize) -> OpResult<Txid> {
        self.check_tx_index(index)?;
        let CachedBlock {
            ref block,
            ref codec,
            ref mut tx_hashes,
            ..
        } = *self;
        let slots = tx_hash_slots(tx_hashes, block.txdata.len());
        let txid = slots[index].get_or_insert_with(|| {
            trace!("hashing transaction {}", index);
            codec.txid(&block.txdata[index])
        });
        Ok(*txid)
    }

    ///
    /// Get the txids of all transactions, in block order.
    ///
    /// Transactions already hashed by `transaction_hash()` are not
    /// hashed again, only the gaps are filled.
    ///
    pub fn all_transaction_hashes(&mut self) -> Vec<Txid> {
        let CachedBlock {
            ref block,
            ref codec,
            ref mut tx_hashes,
            ref mut tx_hashes_complete,
            ..
        } = *self;
        let slots = tx_hash_slots(tx_hashes, block.txdata.len());
        if !*tx_hashes_complete {
            fill_gaps(codec, &block.txdata, slots);
            *tx_hashes_complete = true;
        }
        slots.iter().flatten().copied().collect()
    }
}

#[inline]
fn tx_hash_slots(tx_hashes: &mut Option<Vec<Option<Txid>>>, n_tx: usize) -> &mut [Option<Txid>] {
    tx_hashes.get_or_insert_with(|| vec![None; n_tx])
}

#[cfg(feature = "parallel")]
fn fill_gaps<C: BlockCodec>(codec: &C, txdata: &[Transaction], slots: &mut [Option<Txid>]) {
    use rayon::prelude::*;
    trace!("filling missing transaction hashes in parallel");
    slots
        .par_iter_mut()
        .zip(txdata.par_iter())
        .filter(|(slot, _)| slot.is_none())
        .for_each(|(slot, tx)| *slot = Some(codec.txid(tx)));
}

#[cfg(not(feature = "parallel"))]
fn fill_gaps<C: BlockCodec>(codec: &C, txdata: &[Transaction], slots: &mut [Option<Txid>]) {
    trace!("filling missing transaction hashes");
    for (slot, tx) in slots.iter_mut().zip(txdata) {
        if slot.is_none() {
            *slot = Some(codec.txid(tx));
        }
    }
}
