// This is my main entry point for the tallychain demo CLI
// I wire the ledger, the data chain and the lending pool into two commands
use clap::Parser;
use log::{error, LevelFilter};
use std::process;
use tallychain::{
    ChainError, Command, DataChain, Ledger, LedgerBlock, LendingPool, Opt, Transaction,
    GLOBAL_CONFIG,
};

fn main() {
    // Info level shows the ledger lifecycle without drowning the output
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    // I run the actual command and handle any errors that might occur
    // If something goes wrong, I log the error and exit with code 1
    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // The headline walk-through: two transfers, one mined block, the
        // derived balances, and a lending pool that shrugs off a borrow
        // it cannot cover
        Command::Demo {
            difficulty,
            reward,
            miner,
        } => {
            // Flags win over TALLYCHAIN_* environment overrides, which win
            // over the library defaults
            if let Some(addr) = miner {
                GLOBAL_CONFIG.set_miner_address(addr);
            }
            let difficulty = difficulty.unwrap_or_else(|| GLOBAL_CONFIG.get_difficulty());
            let reward = reward.unwrap_or_else(|| GLOBAL_CONFIG.get_mining_reward());
            let miner_address = GLOBAL_CONFIG.get_miner_address();

            let mut ledger = Ledger::new(difficulty, reward)?;
            ledger.add_transaction(Transaction::transfer("Alice", "Bob", 100));
            ledger.add_transaction(Transaction::transfer("Bob", "Alice", 50));
            println!(
                "Mining {} pending transactions to {miner_address} (difficulty {}, reward {})...",
                ledger.get_pending_transactions().len(),
                ledger.get_difficulty(),
                ledger.get_mining_reward()
            );
            ledger.mine_pending_transactions(&miner_address)?;

            for block in ledger.get_blocks() {
                print_ledger_block(block)?;
            }

            for address in ["Alice", "Bob", miner_address.as_str()] {
                println!(
                    "Balance of {address}: {}",
                    ledger.get_balance_of_address(address)
                );
            }
            println!("Chain audit: {}", ledger.validate()?);

            let mut pool = LendingPool::new();
            println!("Pool after deposit(1000): {}", pool.deposit(1000));
            println!("Pool after borrow(500): {}", pool.borrow(500)?);
            // The oversized borrow is reported and the session carries on
            match pool.borrow(600) {
                Ok(total) => println!("Pool after borrow(600): {total}"),
                Err(e @ ChainError::InsufficientFunds { .. }) => println!("Borrow rejected: {e}"),
                Err(e) => return Err(e.into()),
            }
            println!("Pool still holds: {}", pool.get_total_liquidity());
            println!("Chain still valid: {}", ledger.is_chain_valid());
        }
        // The no-mining variant: opaque records on a hash-linked chain
        Command::Datalog { records } => {
            let records = if records.is_empty() {
                vec!["first record".to_string(), "second record".to_string()]
            } else {
                records
            };

            let mut chain = DataChain::new()?;
            for record in records {
                chain.add_block(record)?;
            }

            for block in chain.get_blocks() {
                println!("Block {} @ {}", block.get_index(), block.get_timestamp());
                println!("  prev: {}", block.get_previous_hash());
                println!("  hash: {}", block.get_hash());
                println!("  data: {}", block.get_payload());
            }
            println!("Chain audit: {}", chain.validate()?);
        }
    }
    Ok(())
}

// Block summary: header fields first, then the canonical form of every
// transaction it carries
fn print_ledger_block(block: &LedgerBlock) -> Result<(), Box<dyn std::error::Error>> {
    println!("Block {} @ {}", block.get_index(), block.get_timestamp());
    println!("  prev:  {}", block.get_previous_hash());
    println!("  hash:  {}", block.get_hash());
    println!("  proof: {}", block.get_proof());
    for transaction in block.get_payload() {
        println!("  - {}", transaction.canonical_json()?);
    }
    Ok(())
}
