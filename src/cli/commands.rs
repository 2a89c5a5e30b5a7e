use clap::{Parser, Subcommand};

/// Command-line arguments for the tallychain demo binary
#[derive(Parser)]
#[command(name = "tallychain", version, about = "An educational proof-of-work ledger")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Walk the full ledger scenario: transfers, mining, balances, lending
    Demo {
        /// Leading zero hex characters every mined hash must show
        #[arg(long)]
        difficulty: Option<u32>,
        /// Reward minted to the miner of each block
        #[arg(long)]
        reward: Option<u64>,
        /// Address credited with mining rewards
        #[arg(long)]
        miner: Option<String>,
    },
    /// Append opaque records to a hash-linked chain without mining
    Datalog {
        /// Records to append; two sample records when omitted
        records: Vec<String>,
    },
}
