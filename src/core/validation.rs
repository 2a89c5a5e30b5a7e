use crate::core::block::{Block, Payload};
use crate::core::proof_of_work::ProofOfWork;
use crate::error::Result;
use data_encoding::HEXLOWER;
use std::fmt;

/// Why a chain audit rejected a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFlaw {
    /// Stored hash differs from the digest recomputed from the stored fields
    HashMismatch,
    /// previous_hash does not point at the predecessor's stored hash
    BrokenLink,
    /// The stored hash does not satisfy the required difficulty
    InsufficientProof,
}

impl fmt::Display for ChainFlaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainFlaw::HashMismatch => write!(f, "stored hash mismatch"),
            ChainFlaw::BrokenLink => write!(f, "broken previous-hash link"),
            ChainFlaw::InsufficientProof => write!(f, "insufficient proof-of-work"),
        }
    }
}

/// Verdict of a full-chain audit.
///
/// `position` is the failing block's place in the chain, counted from
/// genesis, not its stored index field (which may itself be tampered).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainValidation {
    Valid,
    Invalid { position: u64, flaw: ChainFlaw },
}

impl ChainValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, ChainValidation::Valid)
    }
}

impl fmt::Display for ChainValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainValidation::Valid => write!(f, "valid"),
            ChainValidation::Invalid { position, flaw } => {
                write!(f, "invalid at block {position}: {flaw}")
            }
        }
    }
}

/// Audit every non-genesis block: recomputed digest against the stored
/// hash, linkage to the predecessor, and, when `pow` is given, the
/// difficulty target. Stops at the first flaw.
pub(crate) fn audit_chain<P: Payload>(
    blocks: &[Block<P>],
    pow: Option<&ProofOfWork>,
) -> Result<ChainValidation> {
    for position in 1..blocks.len() {
        let current = &blocks[position];
        let previous = &blocks[position - 1];

        let digest = current.recompute_digest()?;
        if HEXLOWER.encode(digest.as_slice()) != current.get_hash() {
            return Ok(ChainValidation::Invalid {
                position: position as u64,
                flaw: ChainFlaw::HashMismatch,
            });
        }
        if current.get_previous_hash() != previous.get_hash() {
            return Ok(ChainValidation::Invalid {
                position: position as u64,
                flaw: ChainFlaw::BrokenLink,
            });
        }
        if let Some(pow) = pow {
            if !pow.hash_meets_target(digest.as_slice()) {
                return Ok(ChainValidation::Invalid {
                    position: position as u64,
                    flaw: ChainFlaw::InsufficientProof,
                });
            }
        }
    }
    Ok(ChainValidation::Valid)
}
