use crate::{ApiManifest, DescriptorError, Result};
use std::path::{Path, PathBuf};

/// Source of endpoint descriptors.
///
/// The host decides how descriptors are obtained; the generator only consumes
/// the resulting [`ApiManifest`].
pub trait EndpointProvider {
    fn manifest(&self) -> Result<ApiManifest>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Toml,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(DescriptorError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl ApiManifest {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn parse(text: &str, format: ManifestFormat) -> Result<Self> {
        match format {
            ManifestFormat::Json => Self::from_json_str(text),
            ManifestFormat::Toml => Self::from_toml_str(text),
        }
    }
}

/// Reads descriptors from a JSON or TOML manifest exported by the host
#[derive(Debug, Clone)]
pub struct ManifestProvider {
    path: PathBuf,
}

impl ManifestProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EndpointProvider for ManifestProvider {
    fn manifest(&self) -> Result<ApiManifest> {
        let format = ManifestFormat::from_path(&self.path)?;
        let text = std::fs::read_to_string(&self.path).map_err(|source| DescriptorError::Io {
            path: self.path.clone(),
            source,
        })?;
        let manifest = ApiManifest::parse(&text, format)?;
        log::debug!(
            "Loaded {} controllers and {} types from {}",
            manifest.controllers.len(),
            manifest.types.len(),
            self.path.display()
        );
        Ok(manifest)
    }
}

/// Serves a manifest built in memory
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    manifest: ApiManifest,
}

impl StaticProvider {
    #[must_use]
    pub fn new(manifest: ApiManifest) -> Self {
        Self { manifest }
    }
}

impl EndpointProvider for StaticProvider {
    fn manifest(&self) -> Result<ApiManifest> {
        Ok(self.manifest.clone())
    }
}
