use crate::domain::account::AccountId;
use crate::domain::money::Yocto;
use crate::domain::ports::{Record, Registry, Settlement, Transfer};
use crate::error::{RentalError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory registry.
///
/// Uses `Arc<RwLock<HashMap<AccountId, R>>>` so clones share the same table.
/// Suitable for tests and single-run batches where persistence is not required.
#[derive(Clone)]
pub struct InMemoryRegistry<R> {
    records: Arc<RwLock<HashMap<AccountId, R>>>,
}

impl<R> InMemoryRegistry<R> {
    /// Creates a new, empty in-memory registry.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<R> Default for InMemoryRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> Registry<R> for InMemoryRegistry<R> {
    async fn set(&self, key: &AccountId, record: R) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(key.clone(), record);
        Ok(())
    }

    async fn get(&self, key: &AccountId) -> Result<Option<R>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn contains(&self, key: &AccountId) -> Result<bool> {
        let records = self.records.read().await;
        Ok(records.contains_key(key))
    }

    async fn values(&self) -> Result<Vec<R>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }
}

/// In-process stand-in for the settlement substrate.
///
/// Completed transfers are appended to a journal that can be inspected
/// afterwards. Receivers can be marked as rejecting, in which case transfers to
/// them fail and nothing is journaled.
#[derive(Default, Clone)]
pub struct InMemorySettlement {
    journal: Arc<RwLock<Vec<Transfer>>>,
    rejecting: Arc<RwLock<HashSet<AccountId>>>,
}

impl InMemorySettlement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later transfer to `receiver` fail.
    pub async fn reject_transfers_to(&self, receiver: impl Into<AccountId>) {
        self.rejecting.write().await.insert(receiver.into());
    }

    /// Transfers completed so far, oldest first.
    pub async fn transfers(&self) -> Vec<Transfer> {
        self.journal.read().await.clone()
    }

    /// Sum of all completed transfers to `receiver`.
    pub async fn received_by(&self, receiver: &AccountId) -> Yocto {
        let journal = self.journal.read().await;
        Yocto(
            journal
                .iter()
                .filter(|t| &t.receiver == receiver)
                .map(|t| t.amount.value())
                .sum(),
        )
    }
}

#[async_trait]
impl Settlement for InMemorySettlement {
    async fn transfer(&self, receiver: &AccountId, amount: Yocto) -> Result<()> {
        if self.rejecting.read().await.contains(receiver) {
            return Err(RentalError::TransferError(format!(
                "Receiver {receiver} rejected a transfer of {amount}"
            )));
        }

        self.journal.write().await.push(Transfer {
            receiver: receiver.clone(),
            amount,
        });
        Ok(())
    }
}
