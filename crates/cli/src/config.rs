use anyhow::{Context, Result};
use httpgen_descriptor::{default_headers, BuildOptions, MemberNaming, DEFAULT_HOST_VARIABLE};
use indexmap::IndexMap;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "httpgen.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "HttpApi";

const ENV_OUTPUT_DIR: &str = "HTTPGEN_OUTPUT_DIR";
const ENV_HOST_VARIABLE: &str = "HTTPGEN_HOST_VARIABLE";
const ENV_TEMPLATES_DIR: &str = "HTTPGEN_TEMPLATES_DIR";

/// Effective settings for one run.
///
/// Layers, lowest first: defaults, `httpgen.toml`, `HTTPGEN_*` environment
/// variables, command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpgenConfig {
    /// Relative paths resolve against the project directory
    pub output_dir: PathBuf,
    pub host_variable: String,
    pub templates_dir: Option<PathBuf>,
    pub member_naming: MemberNaming,
    pub headers: IndexMap<String, String>,
}

impl Default for HttpgenConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            host_variable: DEFAULT_HOST_VARIABLE.to_string(),
            templates_dir: None,
            member_naming: MemberNaming::default(),
            headers: default_headers(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    output_dir: Option<PathBuf>,
    host_variable: Option<String>,
    templates_dir: Option<PathBuf>,
    member_naming: Option<MemberNaming>,
    headers: Option<IndexMap<String, String>>,
}

impl HttpgenConfig {
    /// Defaults overlaid with `explicit`, or with `httpgen.toml` from the
    /// project directory when no file is given
    pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(project_dir.join(CONFIG_FILE)).filter(|path| path.is_file()),
        };
        if let Some(path) = path {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            config
                .apply_toml(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            log::debug!("Loaded config from {}", path.display());
        }
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn apply_toml(&mut self, text: &str) -> Result<()> {
        let file: ConfigFile = toml::from_str(text)?;
        if let Some(dir) = file.output_dir {
            self.output_dir = dir;
        }
        if let Some(name) = file.host_variable {
            self.host_variable = non_empty("host_variable", name)?;
        }
        if let Some(dir) = file.templates_dir {
            self.templates_dir = Some(dir);
        }
        if let Some(naming) = file.member_naming {
            self.member_naming = naming;
        }
        if let Some(headers) = file.headers {
            self.headers = headers;
        }
        Ok(())
    }

    /// Blank variables are ignored
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(dir) = var(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(name) = var(ENV_HOST_VARIABLE) {
            self.host_variable = name;
        }
        if let Some(dir) = var(ENV_TEMPLATES_DIR) {
            self.templates_dir = Some(PathBuf::from(dir));
        }
    }

    #[must_use]
    pub fn output_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.output_dir)
    }

    #[must_use]
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            host_variable: self.host_variable.clone(),
            headers: self.headers.clone(),
            member_naming: self.member_naming,
        }
    }
}

fn non_empty(key: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        anyhow::bail!("`{key}` must not be empty");
    }
    Ok(value)
}
