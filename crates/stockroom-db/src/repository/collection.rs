//! # Collection Repository
//!
//! One collection, one key, one JSON array blob.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::store::KeyValueStore;

/// Loads and stores a `Vec<T>` under a fixed key.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(store.clone(), "products");
/// let products = repo.load().await?;
/// repo.save(&products).await?;
/// ```
pub struct CollectionRepository<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CollectionRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a repository for the collection stored under `key`.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        CollectionRepository {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    /// The storage key of this collection.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the collection.
    ///
    /// ## Returns
    /// * `Ok(items)` - Decoded collection
    /// * `Ok(vec![])` - Nothing stored yet, or the stored blob is malformed
    /// * `Err(DbError)` - The store itself could not be read
    pub async fn load(&self) -> DbResult<Vec<T>> {
        let Some(blob) = self.store.get(&self.key).await? else {
            debug!(key = %self.key, "No stored collection, starting empty");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(&blob) {
            Ok(items) => {
                debug!(key = %self.key, count = items.len(), "Collection loaded");
                Ok(items)
            }
            Err(e) => {
                warn!(
                    key = %self.key,
                    error = %e,
                    "Discarding malformed stored collection"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Encodes the collection into a `(key, blob)` entry for `set_many`.
    pub fn encode(&self, items: &[T]) -> DbResult<(String, String)> {
        let blob = serde_json::to_string(items)?;
        Ok((self.key.clone(), blob))
    }

    /// Encodes and writes the collection on its own.
    pub async fn save(&self, items: &[T]) -> DbResult<()> {
        let (key, blob) = self.encode(items)?;
        self.store.set(&key, &blob).await
    }
}

impl<T> Clone for CollectionRepository<T> {
    fn clone(&self) -> Self {
        CollectionRepository {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for CollectionRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRepository")
            .field("key", &self.key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{ProductRepository, SaleRepository};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use stockroom_core::{Money, Product, Sale};

    fn tile() -> Product {
        Product::new("T1", "Tile", "Kajaria", "Marble Beige")
            .with_size("600x600")
            .with_stock(10)
            .with_price_per_box(Money::from_rupees(200))
    }

    #[tokio::test]
    async fn test_missing_key_loads_empty() {
        let repo = ProductRepository::new(Arc::new(MemoryStore::new()), "products");
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let repo = ProductRepository::new(store.clone(), "products");

        repo.save(&[tile()]).await.unwrap();
        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, vec![tile()]);

        let blob = store.get("products").await.unwrap().unwrap();
        assert!(blob.contains(r#""type":"Tile""#));
        assert!(blob.contains(r#""pricePerBox":20000"#));
    }

    #[tokio::test]
    async fn test_malformed_blob_loads_empty() {
        let store = Arc::new(MemoryStore::with_entries([
            ("products", "not json"),
            ("sales", r#"{"serial":"T1"}"#),
        ]));

        let products = ProductRepository::new(store.clone(), "products");
        let sales = SaleRepository::new(store, "sales");
        assert!(products.load().await.unwrap().is_empty());
        assert!(sales.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_encode_uses_repository_key() {
        let repo = SaleRepository::new(Arc::new(MemoryStore::new()), "shop1.sales");
        let sale = Sale {
            serial: "T1".to_string(),
            name: "Marble Beige".to_string(),
            kind: "Tile".to_string(),
            quantity: 3,
            total: Money::from_rupees(600),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        };

        let (key, blob) = repo.encode(&[sale]).unwrap();
        assert_eq!(key, "shop1.sales");
        assert!(blob.contains(r#""date":"2024-03-05""#));
        assert_eq!(repo.key(), "shop1.sales");
    }
}
