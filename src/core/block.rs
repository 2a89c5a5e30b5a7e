use crate::core::proof_of_work::{MineControl, ProofOfWork};
use crate::core::Transaction;
use crate::error::Result;
use crate::utils::{current_timestamp, sha256_digest};
use data_encoding::HEXLOWER;

/// Content a block can carry.
///
/// The canonical form is what gets folded into the block digest, so it
/// must be byte-stable for equal values.
pub trait Payload: Clone {
    fn canonical_form(&self) -> Result<String>;
}

/// Opaque records are hashed verbatim
impl Payload for String {
    fn canonical_form(&self) -> Result<String> {
        Ok(self.clone())
    }
}

/// Transaction sequences are hashed as their canonical JSON array
impl Payload for Vec<Transaction> {
    fn canonical_form(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A block under construction: content fields only, still mutable.
///
/// Drafts never store a hash. The digest helpers are pure, and the only
/// ways out are `seal` (freeze as-is) and `mine` (search for a proof,
/// then freeze), both of which give up the draft.
#[derive(Debug, Clone)]
pub struct BlockDraft<P: Payload> {
    index: u64,
    previous_hash: String,
    timestamp: i64,
    payload: P,
    proof: u64,
}

impl<P: Payload> BlockDraft<P> {
    /// New draft stamped with the current wall clock
    pub fn new(index: u64, previous_hash: String, payload: P) -> Result<BlockDraft<P>> {
        Ok(BlockDraft {
            index,
            previous_hash,
            timestamp: current_timestamp()?,
            payload,
            proof: 0,
        })
    }

    /// New draft with a caller-chosen timestamp, for deterministic fixtures
    pub fn with_timestamp(
        index: u64,
        previous_hash: String,
        timestamp: i64,
        payload: P,
    ) -> BlockDraft<P> {
        BlockDraft {
            index,
            previous_hash,
            timestamp,
            payload,
            proof: 0,
        }
    }

    /// Raw SHA-256 over the canonical preimage
    /// `index:previous_hash:timestamp:payload:proof`
    pub fn digest_with_proof(&self, proof: u64) -> Result<Vec<u8>> {
        let payload = self.payload.canonical_form()?;
        let preimage = format!(
            "{}:{}:{}:{}:{}",
            self.index, self.previous_hash, self.timestamp, payload, proof
        );
        Ok(sha256_digest(preimage.as_bytes()))
    }

    /// Hex digest for an arbitrary proof value; pure, no side effects
    pub fn hash_with_proof(&self, proof: u64) -> Result<String> {
        Ok(HEXLOWER.encode(self.digest_with_proof(proof)?.as_slice()))
    }

    /// Hex digest of the draft's current fields
    pub fn calculate_hash(&self) -> Result<String> {
        self.hash_with_proof(self.proof)
    }

    pub fn set_proof(&mut self, proof: u64) {
        self.proof = proof;
    }

    /// Freeze the draft into an immutable block, storing the digest of the
    /// fields exactly as they stand. No proof search happens here.
    pub fn seal(self) -> Result<Block<P>> {
        let hash = self.calculate_hash()?;
        Ok(Block {
            index: self.index,
            previous_hash: self.previous_hash,
            timestamp: self.timestamp,
            payload: self.payload,
            proof: self.proof,
            hash,
        })
    }

    /// Search for a satisfying proof under `pow` starting from the current
    /// proof, then freeze. An interrupted search returns the error and
    /// drops the draft.
    pub fn mine(self, pow: &ProofOfWork, control: &MineControl) -> Result<Block<P>> {
        let (proof, hash) = pow.run(&self, control)?;
        Ok(self.seal_with_proof(proof, hash))
    }

    /// Freeze with a proof and hash found by a mining run
    pub(crate) fn seal_with_proof(self, proof: u64, hash: String) -> Block<P> {
        Block {
            index: self.index,
            previous_hash: self.previous_hash,
            timestamp: self.timestamp,
            payload: self.payload,
            proof,
            hash,
        }
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_payload(&self) -> &P {
        &self.payload
    }

    pub fn get_proof(&self) -> u64 {
        self.proof
    }
}

/// A sealed block. Immutable: the stored hash was computed from the other
/// fields at sealing time and the only thing left to do is read or audit.
#[derive(Debug, Clone)]
pub struct Block<P: Payload> {
    index: u64,
    previous_hash: String,
    timestamp: i64,
    payload: P,
    proof: u64,
    hash: String,
}

impl<P: Payload> Block<P> {
    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_payload(&self) -> &P {
        &self.payload
    }

    pub fn get_proof(&self) -> u64 {
        self.proof
    }

    pub fn get_hash(&self) -> &str {
        self.hash.as_str()
    }

    /// Raw digest recomputed from the stored fields, for audits
    pub fn recompute_digest(&self) -> Result<Vec<u8>> {
        let payload = self.payload.canonical_form()?;
        let preimage = format!(
            "{}:{}:{}:{}:{}",
            self.index, self.previous_hash, self.timestamp, payload, self.proof
        );
        Ok(sha256_digest(preimage.as_bytes()))
    }

    /// Hex digest recomputed from the stored fields
    pub fn recompute_hash(&self) -> Result<String> {
        Ok(HEXLOWER.encode(self.recompute_digest()?.as_slice()))
    }

    /// Test-only mutator for forging a block with altered content
    #[cfg(test)]
    pub fn tamper_payload(&mut self, payload: P) {
        self.payload = payload;
    }

    /// Test-only mutator for forging a block with an altered stored hash
    #[cfg(test)]
    pub fn tamper_hash(&mut self, hash: String) {
        self.hash = hash;
    }
}
