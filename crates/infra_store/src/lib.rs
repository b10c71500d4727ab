//! Infrastructure Storage Layer
//!
//! PostgreSQL adapter for the ledger's persistence port. Queries are
//! bound at runtime (no compile-time database requirement); the schema
//! lives in `migrations/` and is applied with `sqlx::migrate!`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_store::{create_pool, PgLedgerStore, StoreConfig};
//!
//! let pool = create_pool(&StoreConfig::new(database_url)).await?;
//! let store = PgLedgerStore::new(pool);
//! store.migrate().await?;
//! ```

pub mod pool;
pub mod postgres;

pub use pool::{create_pool, StoreConfig};
pub use postgres::PgLedgerStore;
