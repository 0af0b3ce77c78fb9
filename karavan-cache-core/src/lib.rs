//! Karavan Cache Core Library
//!
//! Concurrent in-memory store for integration projects and their live
//! runtime status. Provides the composite key scheme, entity model,
//! DashMap-backed tables, the readiness gate, and configuration/seed loading.

pub mod config;
pub mod error;
pub mod model;
pub mod readiness;
pub mod stats;
pub mod store;
pub mod table;
pub mod types;

// Re-export commonly used types
pub use config::{CacheConfig, Config, ConfigLoader, ProjectSeed, SeedSummary};
pub use error::{CacheError, CacheResult, HardValidationError};
pub use model::{
    CamelStatus, CamelStatusName, CamelStatusValue, ContainerStatus, ContainerType,
    DeploymentStatus, Keyed, Project, ProjectFile, ProjectType, ServiceStatus,
};
pub use readiness::{Readiness, ReadinessState};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use table::Table;
pub use types::{GroupedKey, DEFAULT_ENVIRONMENT};
