use crate::error::{RentalError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places between one unit of the settlement currency and its
/// smallest denomination (1 NEAR = 10^24 yoctoNEAR).
pub const BASE_UNIT_DECIMALS: u32 = 24;

/// One whole unit of the settlement currency, expressed in yocto.
pub const BASE_UNIT: Yocto = Yocto(1_000_000_000_000_000_000_000_000);

/// An amount in the smallest denomination of the settlement currency.
///
/// Attached deposits and transfers are carried in this type. The magnitude of
/// [`BASE_UNIT`] makes a 128-bit integer the narrowest type that holds any
/// listed price, so every multiplication goes through the checked helpers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Yocto(pub u128);

impl Yocto {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u128) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    /// Converts an amount of whole currency units (e.g. `2.5` NEAR) into yocto.
    ///
    /// The conversion is exact: negative amounts, amounts with more than
    /// [`BASE_UNIT_DECIMALS`] fractional digits and amounts that do not fit in
    /// 128 bits are rejected.
    pub fn from_units(units: Decimal) -> Result<Self> {
        if units.is_sign_negative() && !units.is_zero() {
            return Err(RentalError::ValidationError(format!(
                "Amount must not be negative: {units}"
            )));
        }

        let units = units.normalize();
        let scale = units.scale();
        if scale > BASE_UNIT_DECIMALS {
            return Err(RentalError::ValidationError(format!(
                "Amount has more than {BASE_UNIT_DECIMALS} decimal places: {units}"
            )));
        }

        let mantissa = units.mantissa().unsigned_abs();
        10u128
            .checked_pow(BASE_UNIT_DECIMALS - scale)
            .and_then(|factor| mantissa.checked_mul(factor))
            .map(Self)
            .ok_or_else(|| RentalError::ValidationError(format!("Amount out of range: {units}")))
    }
}

impl From<u128> for Yocto {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Yocto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rental price, stored as a whole-unit multiplier of [`BASE_UNIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub u32);

impl Price {
    pub fn new(units: u32) -> Self {
        Self(units)
    }

    pub fn units(&self) -> u32 {
        self.0
    }

    /// `price * BASE_UNIT`, or `None` if the product overflows.
    pub fn to_base_units(self) -> Option<Yocto> {
        BASE_UNIT
            .0
            .checked_mul(u128::from(self.0))
            .map(Yocto)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
