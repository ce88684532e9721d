use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

use shared::domain::{Brand, BrandId};

mod fixture;
mod memory;

pub use fixture::{sample_brands, seed_sample_brands};
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("brand {0} not found")]
    NotFound(BrandId),
    #[error("brand {0} already exists")]
    DuplicateKey(BrandId),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("failed to create parent directory '{}' for database url '{database_url}'", .path.display())]
    CreateDir {
        path: PathBuf,
        database_url: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Persistence capability for brand records.
///
/// Every listing is ordered by ascending id. `search` matches `name_part` as a
/// case-sensitive substring of the brand name; `None` or an empty string lists
/// everything.
#[async_trait]
pub trait BrandStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Brand>>;
    async fn find_by_id(&self, id: BrandId) -> Result<Brand>;
    async fn search(&self, name_part: Option<&str>) -> Result<Vec<Brand>>;
    async fn add(&self, brand: &Brand) -> Result<()>;
    /// Replaces the stored fields of `id` with those of `brand`. The stored id
    /// itself is never rewritten.
    async fn update(&self, id: BrandId, brand: &Brand) -> Result<()>;
    async fn delete(&self, id: BrandId) -> Result<()>;
    async fn count(&self) -> Result<usize>;

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl BrandStore for Storage {
    async fn find_all(&self) -> Result<Vec<Brand>> {
        let rows = sqlx::query("SELECT id, name FROM brands ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(brand_from_row).collect())
    }

    async fn find_by_id(&self, id: BrandId) -> Result<Brand> {
        let row = sqlx::query("SELECT id, name FROM brands WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref()
            .map(brand_from_row)
            .ok_or(StoreError::NotFound(id))
    }

    async fn search(&self, name_part: Option<&str>) -> Result<Vec<Brand>> {
        let Some(name_part) = name_part.filter(|part| !part.is_empty()) else {
            return self.find_all().await;
        };

        // LIKE folds ASCII case in SQLite; instr() does not.
        let rows = sqlx::query("SELECT id, name FROM brands WHERE instr(name, ?) > 0 ORDER BY id")
            .bind(name_part)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(brand_from_row).collect())
    }

    async fn add(&self, brand: &Brand) -> Result<()> {
        let result =
            sqlx::query("INSERT INTO brands (id, name) VALUES (?, ?) ON CONFLICT(id) DO NOTHING")
                .bind(brand.id.0)
                .bind(&brand.name)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::DuplicateKey(brand.id));
        }
        Ok(())
    }

    async fn update(&self, id: BrandId, brand: &Brand) -> Result<()> {
        let result = sqlx::query("UPDATE brands SET name = ? WHERE id = ?")
            .bind(&brand.name)
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: BrandId) -> Result<()> {
        let result = sqlx::query("DELETE FROM brands WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

fn brand_from_row(row: &SqliteRow) -> Brand {
    Brand {
        id: BrandId(row.get::<i64, _>("id")),
        name: row.get::<String, _>("name"),
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
        path: parent.to_path_buf(),
        database_url: database_url.to_string(),
        source,
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
