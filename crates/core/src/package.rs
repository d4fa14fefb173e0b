//! Package names and publish wire documents.
//!
//! The publish document mirrors what the npm client PUTs to
//! `/{package-name}`: a CouchDB-style document with a `versions` map keyed
//! by version string and a base64 tarball attachment.

use crate::{Error, MAX_PACKAGE_NAME_LEN, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A validated npm package name.
///
/// npm rules: non-empty, at most 214 characters, lowercase, must not start
/// with `.` or `_`, and restricted to URL-safe characters.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Parse and validate a package name.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidPackageName("name is empty".to_string()));
        }
        if name.len() > MAX_PACKAGE_NAME_LEN {
            return Err(Error::InvalidPackageName(format!(
                "name exceeds {MAX_PACKAGE_NAME_LEN} characters"
            )));
        }
        if name.starts_with('.') || name.starts_with('_') {
            return Err(Error::InvalidPackageName(format!(
                "name must not start with '.' or '_': {name}"
            )));
        }
        let valid = name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "-_.~".contains(c));
        if !valid {
            return Err(Error::InvalidPackageName(format!(
                "name contains invalid characters: {name}"
            )));
        }
        Ok(Self(name.to_string()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackageName({})", self.0)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distribution information for a package version's tarball.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistInfo {
    /// Tarball download URL.
    pub tarball: String,
    /// SHA-1 checksum (legacy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shasum: Option<String>,
    /// Subresource integrity hash (preferred).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
}

/// Metadata for a single package version, as sent by the npm client.
///
/// Unknown fields (author, scripts, repository, ...) are carried through
/// `extra` so the packument echoes back whatever the client published.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VersionMetadata {
    /// Package name.
    pub name: String,
    /// Version string.
    pub version: String,
    /// Package description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Distribution information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist: Option<DistInfo>,
    /// Runtime dependencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<HashMap<String, String>>,
    /// Everything else the client sent, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A base64 tarball attachment in a publish document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attachment {
    /// MIME type, normally "application/octet-stream".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Base64-encoded tarball bytes.
    pub data: String,
    /// Decoded length in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
}

/// The document body of `PUT /{package-name}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublishDocument {
    /// CouchDB document id (normally equal to the package name).
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Package name.
    #[serde(default)]
    pub name: String,
    /// Package description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Dist tags; a fresh publish carries `latest`.
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: HashMap<String, String>,
    /// Version metadata keyed by version string.
    #[serde(default)]
    pub versions: HashMap<String, VersionMetadata>,
    /// Tarball attachments keyed by file name.
    #[serde(rename = "_attachments", default)]
    pub attachments: HashMap<String, Attachment>,
}

impl PublishDocument {
    /// Validate the document against the package name from the URL path and
    /// extract the single version being published.
    ///
    /// The npm client publishes exactly one version per PUT; anything else
    /// is a malformed payload.
    pub fn validate(&self, expected_name: &str) -> Result<(PackageName, Version)> {
        let name = PackageName::parse(&self.name)?;
        if name.as_str() != expected_name {
            return Err(Error::InvalidDocument(format!(
                "document name '{}' does not match URL path '{}'",
                self.name, expected_name
            )));
        }

        if self.versions.is_empty() {
            return Err(Error::InvalidDocument(
                "document contains no versions".to_string(),
            ));
        }
        if self.versions.len() > 1 {
            return Err(Error::InvalidDocument(format!(
                "document contains {} versions, expected exactly one",
                self.versions.len()
            )));
        }

        // Single entry by the checks above
        let (version_key, metadata) = self
            .versions
            .iter()
            .next()
            .expect("versions checked non-empty");

        let version = Version::parse(version_key)
            .map_err(|e| Error::InvalidVersion(format!("'{version_key}': {e}")))?;

        if metadata.version != *version_key {
            return Err(Error::InvalidDocument(format!(
                "version key '{}' does not match metadata version '{}'",
                version_key, metadata.version
            )));
        }
        if metadata.name != self.name {
            return Err(Error::InvalidDocument(format!(
                "version metadata name '{}' does not match document name '{}'",
                metadata.name, self.name
            )));
        }

        Ok((name, version))
    }

    /// Get the metadata of the single version in this document.
    /// Only meaningful after [`PublishDocument::validate`] has passed.
    pub fn version_metadata(&self) -> Option<&VersionMetadata> {
        self.versions.values().next()
    }
}
