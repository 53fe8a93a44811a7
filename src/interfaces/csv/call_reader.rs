use crate::application::call::Call;
use crate::domain::account::{AccountId, CallContext};
use crate::domain::money::{Price, Yocto};
use crate::domain::owner::OwnerPayload;
use crate::domain::user::UserPayload;
use crate::error::{RentalError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use uuid::Uuid;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    RegisterOwner,
    RegisterUser,
    Rent,
    ReturnCar,
}

/// One row of a calls file.
///
/// `deposit` is given in whole currency units and may be fractional. Columns
/// that an operation does not use may be left empty or omitted.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CallRecord {
    pub op: CallType,
    pub caller: AccountId,
    #[serde(default)]
    pub deposit: Option<Decimal>,
    #[serde(default)]
    pub target: Option<AccountId>,
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub account: Option<AccountId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub price: Option<u32>,
    #[serde(default)]
    pub has_rented: Option<bool>,
}

impl CallRecord {
    /// Splits the row into the call context and the call itself.
    pub fn into_call(self) -> Result<(CallContext, Call)> {
        let deposit = match self.deposit {
            Some(units) => Yocto::from_units(units)?,
            None => Yocto::ZERO,
        };
        let ctx = CallContext::new(self.caller, deposit);

        let call = match self.op {
            CallType::RegisterOwner => {
                let price = self.price.ok_or_else(|| missing("price", self.op))?;
                Call::RegisterOwner(OwnerPayload {
                    id: self.id,
                    account: self.account,
                    name: self.name.unwrap_or_default(),
                    description: self.description.unwrap_or_default(),
                    available: self.available.unwrap_or(true),
                    price: Price::new(price),
                })
            }
            CallType::RegisterUser => Call::RegisterUser(UserPayload {
                id: self.id,
                account: self.account,
                name: self.name.unwrap_or_default(),
                has_rented: self.has_rented.unwrap_or(false),
            }),
            CallType::Rent => Call::Rent {
                owner: self.target.ok_or_else(|| missing("target", self.op))?,
            },
            CallType::ReturnCar => Call::ReturnCar {
                owner: self.target.ok_or_else(|| missing("target", self.op))?,
            },
        };

        Ok((ctx, call))
    }
}

fn missing(column: &str, op: CallType) -> RentalError {
    RentalError::ValidationError(format!("Missing `{column}` for {op:?} call"))
}

/// Reads ledger calls from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over decoded calls.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct CallReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CallReader<R> {
    /// Creates a new `CallReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and decodes calls.
    ///
    /// A malformed row yields an error for that row only; iteration continues.
    pub fn calls(self) -> impl Iterator<Item = Result<(CallContext, Call)>> {
        self.reader
            .into_deserialize::<CallRecord>()
            .map(|result| result.map_err(RentalError::from).and_then(CallRecord::into_call))
    }
}
