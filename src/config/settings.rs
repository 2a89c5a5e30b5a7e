use crate::core::{DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

static DEFAULT_MINER_ADDRESS: &str = "Miner";

const DIFFICULTY_KEY: &str = "DIFFICULTY";
const MINING_REWARD_KEY: &str = "MINING_REWARD";
const MINER_ADDRESS_KEY: &str = "MINER_ADDRESS";

/// Demo-layer defaults, seeded from `TALLYCHAIN_*` environment variables.
///
/// Only the CLI consumes this; the ledger core takes its knobs as
/// constructor arguments.
pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        let mut map = HashMap::new();

        if let Ok(difficulty) = env::var("TALLYCHAIN_DIFFICULTY") {
            map.insert(String::from(DIFFICULTY_KEY), difficulty);
        }
        if let Ok(reward) = env::var("TALLYCHAIN_MINING_REWARD") {
            map.insert(String::from(MINING_REWARD_KEY), reward);
        }

        let mut miner_address = String::from(DEFAULT_MINER_ADDRESS);
        if let Ok(addr) = env::var("TALLYCHAIN_MINER_ADDRESS") {
            miner_address = addr;
        }
        map.insert(String::from(MINER_ADDRESS_KEY), miner_address);

        Config {
            inner: RwLock::new(map),
        }
    }

    /// Missing or unparsable overrides fall back to the library default
    pub fn get_difficulty(&self) -> u32 {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner
            .get(DIFFICULTY_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_DIFFICULTY)
    }

    pub fn get_mining_reward(&self) -> u64 {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner
            .get(MINING_REWARD_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MINING_REWARD)
    }

    pub fn get_miner_address(&self) -> String {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner
            .get(MINER_ADDRESS_KEY)
            .expect("Miner address should always be present in config")
            .clone()
    }

    pub fn set_miner_address(&self, addr: String) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(MINER_ADDRESS_KEY), addr);
    }
}
