use crate::core::block::{Block, BlockDraft};
use crate::core::validation::{audit_chain, ChainValidation};
use crate::error::{ChainError, Result};
use log::{debug, info};

/// A data block carries one opaque record
pub type DataBlock = Block<String>;

/// The basic chain: hash-linked opaque records, appended without any
/// proof search. Integrity comes from the digests alone.
pub struct DataChain {
    chain: Vec<DataBlock>,
}

impl DataChain {
    pub fn new() -> Result<DataChain> {
        let genesis = BlockDraft::new(0, "0".to_string(), "Genesis Block".to_string())?.seal()?;
        info!("Created data chain, genesis {}", genesis.get_hash());
        Ok(DataChain {
            chain: vec![genesis],
        })
    }

    pub fn get_latest_block(&self) -> Result<&DataBlock> {
        self.chain.last().ok_or_else(|| {
            ChainError::InvariantViolation("data chain holds no blocks, not even genesis".to_string())
        })
    }

    /// Append a record. The chain assigns the index and the link to the
    /// current tip before sealing, so the structural invariants hold no
    /// matter what the caller passes.
    pub fn add_block(&mut self, payload: String) -> Result<&DataBlock> {
        let previous_hash = self.get_latest_block()?.get_hash().to_string();
        let draft = BlockDraft::new(self.chain.len() as u64, previous_hash, payload)?;
        let block = draft.seal()?;
        debug!("Appended block {}: {}", block.get_index(), block.get_hash());
        self.chain.push(block);
        self.get_latest_block()
    }

    /// Audit stored hashes and linkage; there is no difficulty to check
    pub fn validate(&self) -> Result<ChainValidation> {
        audit_chain(self.chain.as_slice(), None)
    }

    pub fn is_chain_valid(&self) -> bool {
        matches!(self.validate(), Ok(verdict) if verdict.is_valid())
    }

    pub fn get_blocks(&self) -> &[DataBlock] {
        self.chain.as_slice()
    }

    pub fn get_block_count(&self) -> usize {
        self.chain.len()
    }
}
