use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rentledger::application::engine::RentalEngine;
use rentledger::domain::owner::Owner;
use rentledger::domain::ports::{OwnerRegistryBox, UserRegistryBox};
use rentledger::domain::user::User;
use rentledger::infrastructure::in_memory::{InMemoryRegistry, InMemorySettlement};
use rentledger::interfaces::csv::call_reader::CallReader;
use rentledger::interfaces::csv::ledger_writer::LedgerWriter;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{Level, info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input calls CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Most verbose level of log events written to stderr
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let (owners, users) = open_registries(cli.db_path)?;
    let settlement = InMemorySettlement::new();
    let engine = RentalEngine::new(owners, users, Box::new(settlement.clone()));

    // Replay calls; a rejected call is reported and the batch continues.
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CallReader::new(file);
    for (line, call_result) in reader.calls().enumerate() {
        match call_result {
            Ok((ctx, call)) => {
                let op = call.name();
                if let Err(e) = engine.execute(&ctx, call).await {
                    warn!(row = line + 1, op, caller = %ctx.caller, "Call rejected: {}", e);
                }
            }
            Err(e) => {
                warn!(row = line + 1, "Error reading call: {}", e);
            }
        }
    }

    let owners = engine.list_owners().await.into_diagnostic()?;
    let users = engine.list_users().await.into_diagnostic()?;
    let transfers = settlement.transfers().await;
    info!(
        owners = owners.len(),
        users = users.len(),
        transfers = transfers.len(),
        "Batch complete"
    );

    let stdout = io::stdout();
    let mut writer = LedgerWriter::new(stdout.lock());
    writer
        .write_report(owners, users, &transfers)
        .into_diagnostic()?;

    Ok(())
}

fn in_memory_registries() -> (OwnerRegistryBox, UserRegistryBox) {
    let owners: OwnerRegistryBox = Box::new(InMemoryRegistry::<Owner>::new());
    let users: UserRegistryBox = Box::new(InMemoryRegistry::<User>::new());
    (owners, users)
}

#[cfg(feature = "storage-rocksdb")]
fn open_registries(db_path: Option<PathBuf>) -> Result<(OwnerRegistryBox, UserRegistryBox)> {
    use rentledger::infrastructure::rocksdb::RocksDBStore;

    let Some(db_path) = db_path else {
        return Ok(in_memory_registries());
    };

    let store = RocksDBStore::open(&db_path).into_diagnostic()?;
    info!(path = %db_path.display(), "Opened persistent registries");
    // Both registries share the one opened database.
    let owners: OwnerRegistryBox = Box::new(store.clone());
    let users: UserRegistryBox = Box::new(store);
    Ok((owners, users))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_registries(db_path: Option<PathBuf>) -> Result<(OwnerRegistryBox, UserRegistryBox)> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(in_memory_registries())
}
