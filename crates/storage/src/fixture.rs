use shared::domain::Brand;

use crate::{BrandStore, Result, StoreError};

const SAMPLE_BRANDS: [(i64, &str); 10] = [
    (1, "Ephemeral Bloom"),
    (2, "Urban Nomad"),
    (3, "Noir Élégance"),
    (4, "Luna Veil"),
    (5, "Echo Atelier"),
    (6, "Nova Fusion"),
    (7, "Zen Mode"),
    (8, "Urban Mirage"),
    (9, "Chronos Silhouette"),
    (10, "Sonora Dream"),
];

/// The ten-brand demo catalogue, ids 1 through 10.
pub fn sample_brands() -> Vec<Brand> {
    SAMPLE_BRANDS
        .iter()
        .map(|(id, name)| Brand::new(*id, *name))
        .collect()
}

/// Inserts every sample brand whose id is not taken yet and returns how many
/// were added. Running it twice adds nothing the second time.
pub async fn seed_sample_brands(store: &dyn BrandStore) -> Result<usize> {
    let mut inserted = 0;
    for brand in sample_brands() {
        match store.add(&brand).await {
            Ok(()) => inserted += 1,
            Err(StoreError::DuplicateKey(_)) => {}
            Err(error) => return Err(error),
        }
    }
    Ok(inserted)
}
