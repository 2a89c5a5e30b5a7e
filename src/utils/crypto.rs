use data_encoding::HEXLOWER;
use ring::digest::{Context, SHA256};

use crate::error::{ChainError, Result};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> Result<i64> {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ChainError::Crypto(format!("System time error: {e}")))?
        .as_millis();

    // Ensure the timestamp fits in i64
    if duration > i64::MAX as u128 {
        return Err(ChainError::Crypto("Timestamp overflow".to_string()));
    }

    Ok(duration as i64)
}

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// SHA-256 rendered as 64 lowercase hex characters
pub fn sha256_hex(data: &[u8]) -> String {
    HEXLOWER.encode(sha256_digest(data).as_slice())
}
