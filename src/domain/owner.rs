use super::account::AccountId;
use super::money::Price;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered car owner. Each owner lists exactly one car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Opaque record identifier, fixed at registration.
    pub id: Uuid,
    /// The account that registered the car; receives rental payments.
    pub account: AccountId,
    pub name: String,
    pub description: String,
    /// Whether the car can currently be rented.
    pub available: bool,
    /// Rental price in whole currency units.
    pub price: Price,
}

/// An owner registration request as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerPayload {
    /// Assigned at registration when absent.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Never trusted. The stored account is always the caller.
    #[serde(default)]
    pub account: Option<AccountId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "available_by_default")]
    pub available: bool,
    pub price: Price,
}

fn available_by_default() -> bool {
    true
}

impl OwnerPayload {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Price) -> Self {
        Self {
            id: None,
            account: None,
            name: name.into(),
            description: description.into(),
            available: true,
            price,
        }
    }
}

impl Owner {
    /// Builds the stored record, binding it to the calling account.
    pub fn from_payload(payload: OwnerPayload, caller: AccountId) -> Self {
        Self {
            id: payload.id.unwrap_or_else(Uuid::new_v4),
            account: caller,
            name: payload.name,
            description: payload.description,
            available: payload.available,
            price: payload.price,
        }
    }

    pub fn mark_rented(&mut self) {
        self.available = false;
    }

    /// Makes the car available again. Returns `false` if it already was.
    pub fn mark_returned(&mut self) -> bool {
        if self.available {
            return false;
        }
        self.available = true;
        true
    }
}
