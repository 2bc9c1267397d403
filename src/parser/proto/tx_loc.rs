use serde::{Deserialize, Serialize};

///
/// Location of one transaction within a serialized block.
///
/// `offset` counts from the first byte of the block header.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxLoc {
    pub offset: usize,
    pub length: usize,
}

impl TxLoc {
    /// the raw transaction bytes, if the record fits inside `raw_block`
    #[inline]
    pub fn slice<'a>(&self, raw_block: &'a [u8]) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(self.length)?;
        raw_block.get(self.offset..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice() {
        let raw = [0u8, 1, 2, 3, 4, 5];
        let loc = TxLoc {
            offset: 2,
            length: 3,
        };
        assert_eq!(loc.slice(&raw), Some(&raw[2..5]));
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let raw = [0u8; 4];
        let loc = TxLoc {
            offset: 2,
            length: 3,
        };
        assert_eq!(loc.slice(&raw), None);
        let overflow = TxLoc {
            offset: usize::MAX,
            length: 2,
        };
        assert_eq!(overflow.slice(&raw), None);
    }
}
