//! Boundaries through which calls reach the ledger and state leaves it.

pub mod csv;
