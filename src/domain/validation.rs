//! Input checks applied before the ledger touches any state.
//!
//! The predicates are pure. The `check_*` wrappers turn a failed predicate into
//! the [`RentalError::ValidationError`] that aborts the call.

use super::money::{BASE_UNIT, Price, Yocto};
use crate::error::{RentalError, Result};

pub const MIN_NAME_LENGTH: usize = 3;

pub const NAME_TOO_SHORT: &str = "The name must have 3 or more characters.";
pub const FEE_NOT_PAID: &str = "You must pay 1 NEAR to register.";
pub const PRICE_TOO_LOW: &str = "Rental price must be greater than 1 NEAR.";
pub const DEPOSIT_MISMATCH: &str = "The deposit value must be equal to the owner's price.";

/// Names are counted in UTF-16 code units, so a character outside the Basic
/// Multilingual Plane counts as two.
pub fn valid_name(name: &str) -> bool {
    name.encode_utf16().count() >= MIN_NAME_LENGTH
}

pub fn paid_registration_fee(deposit: Yocto) -> bool {
    deposit >= BASE_UNIT
}

/// The price, scaled to yocto, must be strictly above one base unit.
pub fn valid_price(price: Price) -> bool {
    price
        .to_base_units()
        .is_some_and(|scaled| scaled > BASE_UNIT)
}

pub fn exact_deposit(deposit: Yocto, price: Price) -> bool {
    price.to_base_units() == Some(deposit)
}

pub fn check_name(name: &str) -> Result<()> {
    ensure(valid_name(name), NAME_TOO_SHORT)
}

pub fn check_registration_fee(deposit: Yocto) -> Result<()> {
    ensure(paid_registration_fee(deposit), FEE_NOT_PAID)
}

pub fn check_price(price: Price) -> Result<()> {
    ensure(valid_price(price), PRICE_TOO_LOW)
}

/// Returns the amount owed to the owner when `deposit` matches `price` exactly.
pub fn check_deposit(deposit: Yocto, price: Price) -> Result<Yocto> {
    ensure(exact_deposit(deposit, price), DEPOSIT_MISMATCH)?;
    Ok(deposit)
}

fn ensure(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(RentalError::ValidationError(message.to_string()))
    }
}
