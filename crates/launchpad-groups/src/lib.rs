//! Project groups: the canonical model, its normalizer, the versioned
//! export document, and the manager that owns and persists the list.
//!
//! ```no_run
//! use std::sync::Arc;
//! use launchpad_groups::GroupManager;
//! use launchpad_store::MemoryStore;
//!
//! let manager = GroupManager::new(Arc::new(MemoryStore::new())).unwrap();
//! let group = manager.create_group("Frontend").unwrap();
//! manager.add_project_to_group(&group.id, "/src/web").unwrap();
//! ```

pub mod codec;
pub mod manager;
pub mod normalize;
pub mod types;

pub use codec::FORMAT_VERSION;
pub use manager::GroupManager;
pub use normalize::{normalize_group, normalize_groups, normalize_project};
pub use types::*;
