//! State-bearing components of the Pantry registry.
//!
//! - [`PackageStore`]: the in-memory catalog of published packages
//! - [`SessionManager`]: issues, validates, and renews auth sessions
//!
//! Both live for the process lifetime only; every run starts empty.

pub mod error;
pub mod sessions;
pub mod store;

pub use error::StoreError;
pub use sessions::SessionManager;
pub use store::{PackageStore, PackageSummary, Packument, PublishedPackage, VersionRecord};
