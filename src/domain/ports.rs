use super::account::AccountId;
use super::money::Yocto;
use super::owner::Owner;
use super::user::User;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record type that can be kept in a [`Registry`].
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name of the table holding this record type.
    const TABLE: &'static str;
}

impl Record for Owner {
    const TABLE: &'static str = "owners";
}

impl Record for User {
    const TABLE: &'static str = "users";
}

/// Durable key/record mapping. Records are never deleted.
#[async_trait]
pub trait Registry<R: Record>: Send + Sync {
    /// Inserts or overwrites the record under `key`. The write is committed
    /// when the future resolves.
    async fn set(&self, key: &AccountId, record: R) -> Result<()>;
    async fn get(&self, key: &AccountId) -> Result<Option<R>>;
    async fn contains(&self, key: &AccountId) -> Result<bool>;
    /// All stored records, in no particular order.
    async fn values(&self) -> Result<Vec<R>>;
}

/// A value transfer that the substrate has completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub receiver: AccountId,
    pub amount: Yocto,
}

/// The substrate's irreversible value transfer.
///
/// A call either moves the full amount or fails without moving anything.
#[async_trait]
pub trait Settlement: Send + Sync {
    async fn transfer(&self, receiver: &AccountId, amount: Yocto) -> Result<()>;
}

pub type OwnerRegistryBox = Box<dyn Registry<Owner>>;
pub type UserRegistryBox = Box<dyn Registry<User>>;
pub type SettlementBox = Box<dyn Settlement>;
