//! Core domain types and shared logic for the Pantry registry.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Package names and publish documents
//! - Session tokens, expiry, and the three-way validation status
//! - Application configuration

pub mod config;
pub mod error;
pub mod package;
pub mod session;

pub use config::{AppConfig, ServerConfig, SessionConfig};
pub use error::{Error, Result};
pub use package::{Attachment, DistInfo, PackageName, PublishDocument, VersionMetadata};
pub use session::{Session, SessionStatus, SessionToken};

/// Name of the session cookie the npm client sends and expects back.
pub const SESSION_COOKIE: &str = "AuthSession";

/// Maximum length of an npm package name.
pub const MAX_PACKAGE_NAME_LEN: usize = 214;
