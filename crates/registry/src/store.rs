//! In-memory package catalog.
//!
//! The store enforces no authentication; authorization is the HTTP layer's
//! responsibility. All access goes through a single `RwLock`: publishes and
//! searches are infrequent relative to request latency, and no lock is held
//! across an await.

use crate::error::StoreError;
use pantry_core::{PackageName, VersionMetadata};
use parking_lot::RwLock;
use semver::Version;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use time::OffsetDateTime;

/// A single published version and its acceptance timestamp.
#[derive(Clone, Debug, Serialize)]
pub struct VersionRecord {
    /// The metadata the client published, echoed back verbatim.
    pub metadata: VersionMetadata,
    /// When the publish was accepted.
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
}

/// Everything stored about one package.
#[derive(Clone, Debug)]
struct PackageEntry {
    name: PackageName,
    description: Option<String>,
    versions: BTreeMap<Version, VersionRecord>,
}

impl PackageEntry {
    /// Highest published version; `versions` is never empty for a stored entry.
    fn latest(&self) -> (&Version, &VersionRecord) {
        self.versions
            .iter()
            .next_back()
            .expect("package entry has at least one version")
    }
}

/// Acknowledgment returned for an accepted publish.
#[derive(Clone, Debug, Serialize)]
pub struct PublishedPackage {
    /// Package name.
    pub name: String,
    /// Accepted version.
    pub version: String,
    /// When the publish was accepted.
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
}

/// One row of a search result.
#[derive(Clone, Debug, Serialize)]
pub struct PackageSummary {
    /// Package name.
    pub name: String,
    /// Latest version.
    pub version: String,
    /// Package description, if published with one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the latest version was published.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// The full metadata document for a package (`GET /{package-name}`).
#[derive(Clone, Debug, Serialize)]
pub struct Packument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "dist-tags")]
    pub dist_tags: HashMap<String, String>,
    pub versions: HashMap<String, VersionMetadata>,
    /// Per-version publish timestamps plus `modified`.
    pub time: HashMap<String, String>,
}

/// In-memory catalog of published package name/version pairs.
///
/// Records are created on successful publish, never mutated, and never
/// deleted (no unpublish).
#[derive(Default)]
pub struct PackageStore {
    packages: RwLock<HashMap<PackageName, PackageEntry>>,
}

impl PackageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a package version.
    ///
    /// First publish of a `(name, version)` pair always succeeds; a second
    /// publish of the same pair is rejected with [`StoreError::Conflict`]
    /// and leaves the original record untouched.
    pub fn publish(
        &self,
        name: &PackageName,
        version: &Version,
        metadata: VersionMetadata,
    ) -> Result<PublishedPackage, StoreError> {
        let now = OffsetDateTime::now_utc();
        let mut packages = self.packages.write();

        let entry = packages.entry(name.clone()).or_insert_with(|| PackageEntry {
            name: name.clone(),
            description: metadata.description.clone(),
            versions: BTreeMap::new(),
        });

        if entry.versions.contains_key(version) {
            return Err(StoreError::Conflict {
                name: name.to_string(),
                version: version.to_string(),
            });
        }

        // Keep the description in step with the newest publish
        if metadata.description.is_some() {
            entry.description = metadata.description.clone();
        }

        entry.versions.insert(
            version.clone(),
            VersionRecord {
                metadata,
                published_at: now,
            },
        );

        tracing::info!(package = %name, version = %version, "package published");

        Ok(PublishedPackage {
            name: name.to_string(),
            version: version.to_string(),
            published_at: now,
        })
    }

    /// Search for packages whose name contains `query`, case-insensitively.
    ///
    /// Returns an empty vec, never an error, for no results. Side-effect
    /// free: repeated identical queries return identical result sets.
    pub fn search(&self, query: &str) -> Vec<PackageSummary> {
        let needle = query.to_ascii_lowercase();
        let packages = self.packages.read();

        let mut results: Vec<PackageSummary> = packages
            .values()
            .filter(|entry| entry.name.as_str().contains(needle.as_str()))
            .map(|entry| {
                let (version, record) = entry.latest();
                PackageSummary {
                    name: entry.name.to_string(),
                    version: version.to_string(),
                    description: entry.description.clone(),
                    date: record.published_at,
                }
            })
            .collect();

        results.sort_by(|a, b| a.name.cmp(&b.name));
        results
    }

    /// Whether a specific `(name, version)` pair has been published.
    pub fn exists(&self, name: &PackageName, version: &Version) -> bool {
        self.packages
            .read()
            .get(name)
            .is_some_and(|entry| entry.versions.contains_key(version))
    }

    /// Full metadata document for a package, or None if never published.
    pub fn packument(&self, name: &PackageName) -> Option<Packument> {
        let packages = self.packages.read();
        let entry = packages.get(name)?;

        let (latest, _) = entry.latest();
        let dist_tags = HashMap::from([("latest".to_string(), latest.to_string())]);

        let mut versions = HashMap::new();
        let mut time = HashMap::new();
        let mut modified = None;
        for (version, record) in &entry.versions {
            versions.insert(version.to_string(), record.metadata.clone());
            time.insert(version.to_string(), format_rfc3339(record.published_at));
            if modified.is_none_or(|m| record.published_at > m) {
                modified = Some(record.published_at);
            }
        }
        if let Some(modified) = modified {
            time.insert("modified".to_string(), format_rfc3339(modified));
        }

        Some(Packument {
            id: entry.name.to_string(),
            name: entry.name.to_string(),
            description: entry.description.clone(),
            dist_tags,
            versions,
            time,
        })
    }

    /// Number of distinct package names in the catalog.
    pub fn len(&self) -> usize {
        self.packages.read().len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.packages.read().is_empty()
    }
}

fn format_rfc3339(instant: OffsetDateTime) -> String {
    instant
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| instant.to_string())
}
