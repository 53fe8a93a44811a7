//! Domain model: records, money, validation rules and the ports the ledger
//! needs from its execution substrate.

pub mod account;
pub mod money;
pub mod owner;
pub mod ports;
pub mod user;
pub mod validation;
