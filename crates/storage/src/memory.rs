use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use shared::domain::{Brand, BrandId};
use tokio::sync::RwLock;

use crate::{BrandStore, Result, StoreError};

/// In-process brand store keyed by id. Clones share the same map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    brands: Arc<RwLock<BTreeMap<BrandId, Brand>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from `brands`. A later brand replaces an earlier one
    /// with the same id.
    pub fn with_brands(brands: impl IntoIterator<Item = Brand>) -> Self {
        let brands = brands
            .into_iter()
            .map(|brand| (brand.id, brand))
            .collect::<BTreeMap<_, _>>();
        Self {
            brands: Arc::new(RwLock::new(brands)),
        }
    }
}

#[async_trait]
impl BrandStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Brand>> {
        Ok(self.brands.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BrandId) -> Result<Brand> {
        self.brands
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn search(&self, name_part: Option<&str>) -> Result<Vec<Brand>> {
        let name_part = name_part.unwrap_or_default();
        Ok(self
            .brands
            .read()
            .await
            .values()
            .filter(|brand| brand.name.contains(name_part))
            .cloned()
            .collect())
    }

    async fn add(&self, brand: &Brand) -> Result<()> {
        let mut brands = self.brands.write().await;
        if brands.contains_key(&brand.id) {
            return Err(StoreError::DuplicateKey(brand.id));
        }
        brands.insert(brand.id, brand.clone());
        Ok(())
    }

    async fn update(&self, id: BrandId, brand: &Brand) -> Result<()> {
        let mut brands = self.brands.write().await;
        let stored = brands.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        stored.name.clone_from(&brand.name);
        Ok(())
    }

    async fn delete(&self, id: BrandId) -> Result<()> {
        self.brands
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.brands.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_the_same_records() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.add(&Brand::new(1, "Zen Mode")).await.expect("add");
        assert_eq!(other.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn with_brands_keeps_last_duplicate() {
        let store = MemoryStore::with_brands([Brand::new(1, "first"), Brand::new(1, "second")]);
        let brand = store.find_by_id(BrandId(1)).await.expect("brand");
        assert_eq!(brand.name, "second");
        assert_eq!(store.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn update_never_rewrites_the_stored_id() {
        let store = MemoryStore::with_brands([Brand::new(3, "Noir Élégance")]);
        store
            .update(BrandId(3), &Brand::new(99, "Noir"))
            .await
            .expect("update");
        let brand = store.find_by_id(BrandId(3)).await.expect("brand");
        assert_eq!(brand, Brand::new(3, "Noir"));
        assert!(matches!(
            store.find_by_id(BrandId(99)).await,
            Err(StoreError::NotFound(BrandId(99)))
        ));
    }
}
