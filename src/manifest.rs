//! Project manifest collaborator
//!
//! Reads the version field of the host project's `Cargo.toml`. Absence and
//! malformed content both resolve to the documented default; the engine
//! never sees a manifest error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Version reported when no manifest version can be read
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Source of the host project's declared version
pub trait Manifest {
    /// The manifest's version field, or `"0.0.0"` on any read/parse failure
    fn version(&self) -> String;
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    package: Option<PackageSection>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    version: Option<String>,
}

/// `Cargo.toml`-backed [Manifest] implementation
pub struct CargoManifest {
    path: PathBuf,
}

impl CargoManifest {
    /// Manifest of the project rooted at `dir`
    pub fn new(dir: &Path) -> Self {
        CargoManifest {
            path: dir.join("Cargo.toml"),
        }
    }

    fn try_version(&self) -> Option<String> {
        let text = fs::read_to_string(&self.path).ok()?;
        let parsed: ManifestFile = toml::from_str(&text).ok()?;
        parsed.package?.version
    }
}

impl Manifest for CargoManifest {
    fn version(&self) -> String {
        self.try_version()
            .unwrap_or_else(|| DEFAULT_VERSION.to_string())
    }
}

/// Fixed-version [Manifest] for tests
#[derive(Debug)]
pub struct MockManifest {
    version: String,
}

impl MockManifest {
    /// A manifest that always reports the given version
    pub fn new(version: impl Into<String>) -> Self {
        MockManifest {
            version: version.into(),
        }
    }
}

impl Manifest for MockManifest {
    fn version(&self) -> String {
        self.version.clone()
    }
}
