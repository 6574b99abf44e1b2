use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::validate::DEFAULT_CALL_NAME;

pub const CONFIG_FILE_NAME: &str = ".trlintrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.spec.js",
    "**/*.spec.ts",
    "**/*.spec.vue",
    "**/*.test.js",
    "**/*.test.ts",
    "**/*.test.vue",
    "**/__tests__/**",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    /// Translate function names, matched bare and as `this.<name>`.
    #[serde(default = "default_call_names")]
    pub call_names: Vec<String>,
    /// Import prefix → directory (relative to the project root) for mixin resolution.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_call_names() -> Vec<String> {
    vec![DEFAULT_CALL_NAME.to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: default_ignores(),
            includes: Vec::new(),
            source_root: default_source_root(),
            ignore_test_files: default_ignore_test_files(),
            call_names: default_call_names(),
            aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or `includes` is
    /// invalid, or if no call names are configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        // Entries without wildcards are literal paths, so brackets need no escaping.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.call_names.is_empty() {
            bail!("'callNames' must list at least one function name");
        }
        if let Some(name) = self.call_names.iter().find(|n| n.trim().is_empty()) {
            bail!("Invalid entry in 'callNames': \"{}\"", name);
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ignores, vec!["**/node_modules/**"]);
        assert!(config.includes.is_empty());
        assert_eq!(config.call_names, vec!["$tr"]);
        assert!(config.aliases.is_empty());
        assert!(config.ignore_test_files);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "ignores": ["**/dist/**"],
              "includes": ["kolibri/plugins"],
              "callNames": ["$tr", "coachString", "coreString"],
              "aliases": { "kolibri.coreVue.mixins": "kolibri/core/assets/src/mixins" }
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["**/dist/**"]);
        assert_eq!(config.includes, vec!["kolibri/plugins"]);
        assert_eq!(config.call_names, vec!["$tr", "coachString", "coreString"]);
        assert_eq!(
            config.aliases.get("kolibri.coreVue.mixins").map(String::as_str),
            Some("kolibri/core/assets/src/mixins")
        );
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "includes": ["src"] }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.includes, vec!["src"]);
        assert_eq!(config.ignores, default_ignores());
        assert_eq!(config.call_names, default_call_names());
        assert_eq!(config.source_root, "./");
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("views");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "callNames": ["$tr", "coachString"] }"#,
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.call_names, vec!["$tr", "coachString"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.call_names, default_call_names());
    }

    #[test]
    fn test_validate_invalid_patterns() {
        let config = Config {
            ignores: vec!["**/[invalid".to_string()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ignores"));

        let config = Config {
            includes: vec!["src/**/[invalid".to_string()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("includes"));
    }

    #[test]
    fn test_validate_literal_bracket_paths() {
        let config = Config {
            includes: vec!["pages/[id]".to_string()],
            ignores: vec!["pages/[id]/draft".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_call_names() {
        let empty = Config {
            call_names: Vec::new(),
            ..Default::default()
        };
        assert!(empty.validate().unwrap_err().to_string().contains("callNames"));

        let blank = Config {
            call_names: vec!["$tr".to_string(), " ".to_string()],
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_config_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{ "callNames": [] }"#).unwrap();
        assert!(load_config(dir.path()).is_err());

        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = default_config_json().unwrap();
        assert!(json.contains("callNames"));
        assert!(json.contains("ignoreTestFiles"));
        assert!(!json.contains("call_names"));
    }
}
