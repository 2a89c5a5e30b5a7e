use crate::core::block::{Block, BlockDraft, Payload};
use crate::error::{ChainError, Result};
use data_encoding::HEXLOWER;
use log::info;
use num_bigint::{BigInt, Sign};
use std::ops::ShlAssign;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Hex length of a SHA-256 digest; difficulties beyond this are unmeetable
pub const MAX_DIFFICULTY: u32 = 64;

/// How many trials pass between cooperative interruption checks
const CONTROL_CHECK_INTERVAL: u64 = 1024;

/// Shared switch for stopping a mining run from another thread
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> CancelFlag {
        CancelFlag(Arc::new(AtomicBool::new(false)))
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Bounds for a mining run. The default never stops the search; a cancel
/// flag or a deadline makes the loop give up at the next check, every
/// `CONTROL_CHECK_INTERVAL` trials.
#[derive(Clone, Default)]
pub struct MineControl {
    cancel: Option<CancelFlag>,
    deadline: Option<Instant>,
}

impl MineControl {
    pub fn unbounded() -> MineControl {
        MineControl::default()
    }

    pub fn with_cancel(flag: CancelFlag) -> MineControl {
        MineControl {
            cancel: Some(flag),
            deadline: None,
        }
    }

    pub fn with_deadline(deadline: Instant) -> MineControl {
        MineControl {
            cancel: None,
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> MineControl {
        MineControl::with_deadline(Instant::now() + timeout)
    }

    fn should_stop(&self) -> bool {
        if let Some(flag) = &self.cancel {
            if flag.is_triggered() {
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }
        false
    }
}

/// Difficulty as a big-integer target.
///
/// A digest satisfies difficulty `d` when its big-endian integer value is
/// strictly below `1 << (256 - 4*d)`, which is the same as its first `d`
/// hex characters being '0'.
#[derive(Debug)]
pub struct ProofOfWork {
    target: BigInt,
    difficulty: u32,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> Result<ProofOfWork> {
        if difficulty > MAX_DIFFICULTY {
            return Err(ChainError::Config(format!(
                "difficulty {difficulty} exceeds the {MAX_DIFFICULTY} hex characters of a digest"
            )));
        }
        let mut target = BigInt::from(1);
        target.shl_assign(256 - 4 * difficulty);
        Ok(ProofOfWork { target, difficulty })
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn hash_meets_target(&self, digest: &[u8]) -> bool {
        let hash_int = BigInt::from_bytes_be(Sign::Plus, digest);
        hash_int < self.target
    }

    /// Search for the smallest satisfying proof at or above the draft's
    /// current proof. Every trial recomputes the digest from scratch, so
    /// the result depends on nothing but the draft fields.
    pub fn run<P: Payload>(
        &self,
        draft: &BlockDraft<P>,
        control: &MineControl,
    ) -> Result<(u64, String)> {
        info!(
            "Mining block {} at difficulty {}",
            draft.get_index(),
            self.difficulty
        );
        let mut proof = draft.get_proof();
        let mut trials: u64 = 0;
        loop {
            let digest = draft.digest_with_proof(proof)?;
            if self.hash_meets_target(digest.as_slice()) {
                let hash = HEXLOWER.encode(digest.as_slice());
                info!("Proof {} found after {} trials: {hash}", proof, trials + 1);
                return Ok((proof, hash));
            }
            trials += 1;
            if trials % CONTROL_CHECK_INTERVAL == 0 && control.should_stop() {
                return Err(ChainError::Mining(format!(
                    "search interrupted after {trials} trials"
                )));
            }
            proof = proof
                .checked_add(1)
                .ok_or_else(|| ChainError::Mining("proof space exhausted".to_string()))?;
        }
    }

    /// Check a sealed block's recomputed digest against the target
    pub fn validate<P: Payload>(&self, block: &Block<P>) -> Result<bool> {
        let digest = block.recompute_digest()?;
        Ok(self.hash_meets_target(digest.as_slice()))
    }
}
