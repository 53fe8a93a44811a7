use crate::domain::account::AccountId;
use crate::domain::owner::Owner;
use crate::domain::ports::{Record, Registry};
use crate::domain::user::User;
use crate::error::{RentalError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteOptions};
use std::path::Path;
use std::sync::Arc;

/// A persistent registry implementation using RocksDB.
///
/// Owners and users live in separate column families named after
/// [`Record::TABLE`]. Keys are the account id bytes, values are JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`), so one
/// opened database can back both registries.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the owner and user column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = vec![
            ColumnFamilyDescriptor::new(Owner::TABLE, Options::default()),
            ColumnFamilyDescriptor::new(User::TABLE, Options::default()),
        ];
        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn table<R: Record>(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(R::TABLE).ok_or_else(|| {
            RentalError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                R::TABLE
            ))))
        })
    }
}

#[async_trait]
impl<R: Record> Registry<R> for RocksDBStore {
    async fn set(&self, key: &AccountId, record: R) -> Result<()> {
        let cf = self.table::<R>()?;
        let value = serde_json::to_vec(&record)?;

        // The write must be on disk before the call that issued it completes.
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(true);
        self.db
            .put_cf_opt(cf, key.as_str().as_bytes(), value, &write_opts)?;

        Ok(())
    }

    async fn get(&self, key: &AccountId) -> Result<Option<R>> {
        let cf = self.table::<R>()?;

        match self.db.get_pinned_cf(cf, key.as_str().as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn contains(&self, key: &AccountId) -> Result<bool> {
        let cf = self.table::<R>()?;
        Ok(self.db.get_pinned_cf(cf, key.as_str().as_bytes())?.is_some())
    }

    async fn values(&self) -> Result<Vec<R>> {
        let cf = self.table::<R>()?;

        let mut records = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Price;
    use crate::domain::owner::OwnerPayload;
    use crate::domain::user::UserPayload;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(Owner::TABLE).is_some());
        assert!(store.db.cf_handle(User::TABLE).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_owner_registry() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        let key = AccountId::from("alice.near");
        let owner = Owner::from_payload(
            OwnerPayload::new("Alice", "Green van", Price::new(4)),
            key.clone(),
        );

        Registry::<Owner>::set(&store, &key, owner.clone()).await.unwrap();

        let retrieved = Registry::<Owner>::get(&store, &key).await.unwrap();
        assert_eq!(retrieved, Some(owner.clone()));
        assert!(Registry::<Owner>::contains(&store, &key).await.unwrap());

        let all = Registry::<Owner>::values(&store).await.unwrap();
        assert_eq!(all, vec![owner]);

        // Tables are independent.
        assert!(!Registry::<User>::contains(&store, &key).await.unwrap());
    }

    #[tokio::test]
    async fn test_rocksdb_survives_reopen() {
        let dir = tempdir().unwrap();
        let key = AccountId::from("bob.near");
        let user = User::from_payload(UserPayload::new("Bob"), key.clone());

        {
            let store = RocksDBStore::open(dir.path()).unwrap();
            Registry::<User>::set(&store, &key, user.clone()).await.unwrap();
        }

        let store = RocksDBStore::open(dir.path()).unwrap();
        let retrieved = Registry::<User>::get(&store, &key).await.unwrap();
        assert_eq!(retrieved, Some(user));
    }
}
