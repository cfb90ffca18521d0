use crate::{RegenError, Result};
use std::path::Path;

pub const ENV_FILE: &str = "http-client.env.json";
pub const PRIVATE_ENV_FILE: &str = "http-client.private.env.json";
pub const USER_ENV_FILE: &str = "http-client.env.json.user";

const HOST_VARIABLE_TOKEN: &str = "{{host_variable}}";

/// Environment files written next to the generated `.http` files.
///
/// They are created once and never overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldTemplates {
    files: Vec<(String, String)>,
}

impl ScaffoldTemplates {
    /// Templates packaged with the crate
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            files: vec![
                (
                    PRIVATE_ENV_FILE.to_string(),
                    include_str!("../templates/http-client.private.env.json").to_string(),
                ),
                (
                    USER_ENV_FILE.to_string(),
                    include_str!("../templates/http-client.env.json.user").to_string(),
                ),
                (
                    ENV_FILE.to_string(),
                    include_str!("../templates/http-client.env.json").to_string(),
                ),
            ],
        }
    }

    /// Bundled templates, each replaced by a same-named file in `dir` when present
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut templates = Self::bundled();
        for (name, content) in &mut templates.files {
            let path = dir.join(name.as_str());
            match std::fs::read_to_string(&path) {
                Ok(custom) => {
                    log::debug!("Using template {}", path.display());
                    *content = custom;
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => return Err(RegenError::Template { path, source }),
            }
        }
        Ok(templates)
    }

    /// Substitute `{{host_variable}}` in every template.
    ///
    /// The token sits inside JSON strings, so the name is inserted with JSON
    /// string escaping.
    #[must_use]
    pub fn with_host_variable(mut self, host_variable: &str) -> Self {
        let escaped = json_string_body(host_variable);
        for (_, content) in &mut self.files {
            *content = content.replace(HOST_VARIABLE_TOKEN, &escaped);
        }
        self
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str()))
    }
}

fn json_string_body(text: &str) -> String {
    let quoted = serde_json::Value::String(text.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_templates_are_valid_json_after_substitution() {
        let templates = ScaffoldTemplates::bundled().with_host_variable("Shop_Host");
        let names: Vec<_> = templates.files().map(|(name, _)| name).collect();
        assert_eq!(names, vec![PRIVATE_ENV_FILE, USER_ENV_FILE, ENV_FILE]);

        for (name, content) in templates.files() {
            let value: serde_json::Value = serde_json::from_str(content)
                .unwrap_or_else(|err| panic!("{name} is not JSON: {err}"));
            assert!(value.get("dev").is_some(), "{name} lacks a dev environment");
            assert!(!content.contains(HOST_VARIABLE_TOKEN));
        }

        let (_, env) = templates.files().find(|(name, _)| *name == ENV_FILE).unwrap();
        assert!(env.contains("\"Shop_Host\": \"https://localhost:5023\""));
    }

    #[test]
    fn host_variable_is_json_escaped() {
        let templates = ScaffoldTemplates::bundled().with_host_variable(r#"Odd"Name\"#);
        let (_, env) = templates.files().find(|(name, _)| *name == ENV_FILE).unwrap();
        let value: serde_json::Value = serde_json::from_str(env).unwrap();
        assert_eq!(value["dev"][r#"Odd"Name\"#], "https://localhost:5023");
    }

    #[test]
    fn directory_templates_override_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ENV_FILE), "{\"dev\": {}}\n").unwrap();

        let templates = ScaffoldTemplates::from_dir(dir.path()).unwrap();
        let (_, env) = templates.files().find(|(name, _)| *name == ENV_FILE).unwrap();
        assert_eq!(env, "{\"dev\": {}}\n");

        let bundled = ScaffoldTemplates::bundled();
        let private = |t: &ScaffoldTemplates| {
            t.files()
                .find(|(name, _)| *name == PRIVATE_ENV_FILE)
                .map(|(_, c)| c.to_string())
        };
        assert_eq!(private(&templates), private(&bundled));
    }
}
