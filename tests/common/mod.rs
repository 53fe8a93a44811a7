use rentledger::application::engine::RentalEngine;
use rentledger::domain::account::CallContext;
use rentledger::domain::money::{BASE_UNIT, Price, Yocto};
use rentledger::domain::owner::{Owner, OwnerPayload};
use rentledger::domain::user::{User, UserPayload};
use rentledger::infrastructure::in_memory::{InMemoryRegistry, InMemorySettlement};
use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub const CALLS_HEADER: &str =
    "op,caller,deposit,target,id,account,name,description,available,price,has_rented";

/// `units` whole currency units, in yocto.
pub fn near(units: u128) -> Yocto {
    Yocto(units * BASE_UNIT.value())
}

pub fn engine() -> (RentalEngine, InMemorySettlement) {
    let settlement = InMemorySettlement::new();
    let engine = RentalEngine::new(
        Box::new(InMemoryRegistry::<Owner>::new()),
        Box::new(InMemoryRegistry::<User>::new()),
        Box::new(settlement.clone()),
    );
    (engine, settlement)
}

pub async fn register_owner(engine: &RentalEngine, account: &str, price: u32) {
    engine
        .register_owner(
            &CallContext::new(account, near(1)),
            OwnerPayload::new("Owner of a car", "A car", Price::new(price)),
        )
        .await
        .expect("owner registration failed");
}

pub async fn register_user(engine: &RentalEngine, account: &str) {
    engine
        .register_user(&CallContext::new(account, near(1)), UserPayload::new("Renter"))
        .await
        .expect("user registration failed");
}

/// Writes a calls file with the standard header followed by `rows`.
pub fn calls_file(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{CALLS_HEADER}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;
    Ok(file)
}
