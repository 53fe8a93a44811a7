//! Application layer containing the rental state machine.
//!
//! This module defines the `RentalEngine` which acts as the primary entry point
//! for every ledger call. It owns the registries and the settlement port, and
//! serializes calls behind a `tokio` read/write lock.

pub mod call;
pub mod engine;
