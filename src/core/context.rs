use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        error::UnitError,
        file_scanner::scan_files,
        resolve::FsMixinResolver,
        validate::{UnitReport, UnitValidator},
    },
    issues::{Issue, ParseErrorIssue, UndefinedStringIssue},
};

/// Outcome of checking one unit.
pub struct UnitOutcome {
    pub file_path: String,
    pub result: Result<UnitReport, UnitError>,
}

/// Check run over a project: configuration, discovered units and resolver.
///
/// Configuration is applied with the following priority (highest to lowest):
/// 1. CLI arguments (`--source-root`, explicit paths)
/// 2. `.trlintrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (config lookup, alias targets).
    pub root_dir: PathBuf,

    /// All `.vue` units to check, sorted.
    pub files: Vec<String>,

    resolver: FsMixinResolver,
}

impl CheckContext {
    /// Load the configuration and discover the units to check.
    ///
    /// With explicit `paths`, only those files/directories are scanned;
    /// otherwise the configured `includes` under the source root are.
    pub fn new(common_args: &CommonArgs, paths: &[PathBuf]) -> Result<Self> {
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        if !root_dir.is_dir() {
            return Err(anyhow!("Source root is not a directory: {}", root_dir.display()));
        }

        let config_result = load_config(&root_dir)?;
        if !config_result.from_file {
            debug!("no config file found, using default configuration");
        }
        let config = config_result.config;

        let source_root = Path::new(&config.source_root);
        let scan_root = if source_root
            .components()
            .all(|c| matches!(c, Component::CurDir))
        {
            root_dir.clone()
        } else {
            root_dir.join(source_root)
        };
        let scan_root_str = scan_root
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", scan_root))?;

        let scan_result = if paths.is_empty() {
            scan_files(
                scan_root_str,
                &config.includes,
                &config.ignores,
                config.ignore_test_files,
            )
        } else {
            let explicit: Vec<String> = paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
            scan_files(".", &explicit, &config.ignores, config.ignore_test_files)
        };

        if scan_result.skipped_count > 0 {
            warn!(
                count = scan_result.skipped_count,
                "paths skipped due to access errors"
            );
        }

        let resolver = FsMixinResolver::new(root_dir.clone(), &config.aliases);

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files.into_iter().collect(),
            resolver,
        })
    }

    /// Validate every unit in parallel. Outcomes keep the order of `files`.
    pub fn check_units(&self) -> Vec<UnitOutcome> {
        let validator = UnitValidator::new(self.config.call_names.clone(), &self.resolver);

        self.files
            .par_iter()
            .map(|file_path| UnitOutcome {
                file_path: file_path.clone(),
                result: check_unit(&validator, file_path),
            })
            .collect()
    }

    /// Validate every unit and convert the outcomes into reportable issues.
    pub fn issues(&self) -> Vec<Issue> {
        outcomes_to_issues(self.check_units())
    }
}

fn check_unit(validator: &UnitValidator<'_>, file_path: &str) -> Result<UnitReport, UnitError> {
    let source =
        fs::read_to_string(Path::new(file_path)).map_err(|e| UnitError::Read(e.to_string()))?;
    validator.validate(file_path, &source)
}

/// Violations become `undefined-string` issues; a failed unit becomes one
/// `parse-error` issue.
pub fn outcomes_to_issues(outcomes: Vec<UnitOutcome>) -> Vec<Issue> {
    let mut issues = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(report) => issues.extend(report.violations.into_iter().map(|violation| {
                Issue::UndefinedString(UndefinedStringIssue {
                    context: violation.context,
                    key: violation.key,
                })
            })),
            Err(error) => {
                debug!(file = %outcome.file_path, error = %error, "unit could not be parsed");
                issues.push(Issue::ParseError(ParseErrorIssue {
                    file_path: outcome.file_path,
                    line: error.line(),
                    error: error.to_string(),
                }));
            }
        }
    }
    issues
}
