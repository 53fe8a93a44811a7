use super::money::Yocto;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an account on the settlement substrate (e.g. `alice.near`).
///
/// Both registries are keyed by it, and transfers are addressed to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the calling boundary knows about a call before the ledger sees it.
///
/// The caller identity is only ever taken from here, never from a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// The account that signed the call.
    pub caller: AccountId,
    /// Value attached to the call.
    pub attached_deposit: Yocto,
}

impl CallContext {
    pub fn new(caller: impl Into<AccountId>, attached_deposit: Yocto) -> Self {
        Self {
            caller: caller.into(),
            attached_deposit,
        }
    }

    /// A call that carries no deposit.
    pub fn without_deposit(caller: impl Into<AccountId>) -> Self {
        Self::new(caller, Yocto::ZERO)
    }
}
