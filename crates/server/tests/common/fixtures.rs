//! Test fixtures.

use serde_json::{Value, json};

/// Build a publish document the way the npm client does for `npm publish`.
#[allow(dead_code)]
pub fn publish_document(name: &str, version: &str) -> Value {
    json!({
        "_id": name,
        "name": name,
        "description": "a test package",
        "dist-tags": { "latest": version },
        "versions": {
            version: {
                "name": name,
                "version": version,
                "description": "a test package",
                "dist": {
                    "tarball": format!("http://127.0.0.1:4873/{name}/-/{name}-{version}.tgz"),
                    "shasum": "da39a3ee5e6b4b0d3255bfef95601890afd80709"
                }
            }
        },
        "_attachments": {
            format!("{name}-{version}.tgz"): {
                "content_type": "application/octet-stream",
                "data": "H4sIAAAAAAAAA+3BMQEAAADCoPVPbQwfoAAAAAAAAAAAAAAAAAAAAIC3AYbSVKsAKAAA",
                "length": 52
            }
        }
    })
}
