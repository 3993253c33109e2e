//! # CMDS Configuration System
//!
//! File: lib/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads the optional configuration files that set the default
//! interpreter and execution options. It handles loading, merging,
//! tilde expansion and validation.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.cmds.toml` in the current directory or ancestors
//!    (the search stops at a directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/cmds/config.toml` on Linux)
//! 3. Default values defined in the code
//!
//! ## Example file
//!
//! ```toml
//! [shell]
//! executable = "/bin/zsh"
//! initial_arguments = ["-c"]
//!
//! [execution]
//! terminate_on_failure = false
//! print_arguments = true
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cmds::{config, ShellConfig};
//!
//! # fn run() -> cmds::Result<()> {
//! let cfg = config::load_config()?;
//! ShellConfig::set_global(cfg.shell_config());
//! let options = cfg.execute_options();
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{CmdsError, Result};
use crate::core::options::ExecuteOptions;
use crate::core::shell::{ShellConfig, DEFAULT_EXECUTABLE, DEFAULT_INITIAL_ARGUMENTS};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The main configuration structure, loaded from TOML files.
///
/// Every field is optional in the files. A field left out falls back to the
/// value from a lower-precedence source, and finally to the built-in default.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub shell: ShellSection,
    #[serde(default)]
    pub execution: ExecutionSection,
}

/// `[shell]`: how literal command lines are launched.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShellSection {
    /// Interpreter path (can use ~). Will be expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    /// Arguments placed before the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_arguments: Option<Vec<String>>,
}

/// `[execution]`: the default `ExecuteOptions`.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExecutionSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminate_on_failure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_arguments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silence_standard_out: Option<bool>,
}

impl ShellSection {
    /// A POSIX-style shell run as `<executable> -c <line>`.
    pub fn posix(executable: impl Into<String>) -> Self {
        Self {
            executable: Some(executable.into()),
            initial_arguments: Some(vec!["-c".to_string()]),
        }
    }

    pub fn executable(&self) -> &str {
        self.executable.as_deref().unwrap_or(DEFAULT_EXECUTABLE)
    }

    pub fn initial_arguments(&self) -> Vec<String> {
        match &self.initial_arguments {
            Some(arguments) => arguments.clone(),
            None => DEFAULT_INITIAL_ARGUMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExecutionSection {
    pub fn terminate_on_failure(&self) -> bool {
        self.terminate_on_failure.unwrap_or(true)
    }

    pub fn print_arguments(&self) -> bool {
        self.print_arguments.unwrap_or(false)
    }

    pub fn silence_standard_out(&self) -> bool {
        self.silence_standard_out.unwrap_or(false)
    }
}

impl Config {
    pub fn shell_config(&self) -> ShellConfig {
        ShellConfig::new(self.shell.executable(), self.shell.initial_arguments())
    }

    pub fn execute_options(&self) -> ExecuteOptions {
        let mut options = ExecuteOptions::empty();
        if self.execution.terminate_on_failure() {
            options |= ExecuteOptions::TERMINATE_ON_FAILURE;
        }
        if self.execution.print_arguments() {
            options |= ExecuteOptions::PRINT_ARGUMENTS;
        }
        if self.execution.silence_standard_out() {
            options |= ExecuteOptions::SILENCE_STANDARD_OUT;
        }
        options
    }

    /// Fills every unset field with its built-in default.
    pub fn resolved(self) -> Config {
        Config {
            shell: ShellSection {
                executable: Some(self.shell.executable().to_string()),
                initial_arguments: Some(self.shell.initial_arguments()),
            },
            execution: ExecutionSection {
                terminate_on_failure: Some(self.execution.terminate_on_failure()),
                print_arguments: Some(self.execution.print_arguments()),
                silence_standard_out: Some(self.execution.silence_standard_out()),
            },
        }
    }

    /// Renders the configuration back into TOML, in the same layout the files use.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".cmds.toml";

/// Loads, merges, expands and validates the user and project configuration files.
pub fn load_config() -> Result<Config> {
    load_config_with_shell(None)
}

/// Same as `load_config`, but `shell` (when given) replaces the configured
/// interpreter with a POSIX-style shell invoked as `<shell> -c <line>`.
pub fn load_config_with_shell(shell: Option<&str>) -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    build_config(&current_dir, shell)
}

/// Same as `load_config`, but searches for the project file starting at `start`.
pub fn load_config_from(start: &Path) -> Result<Config> {
    build_config(start, None)
}

fn build_config(start: &Path, shell: Option<&str>) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(start)?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    if let Some(shell) = shell {
        info!("Interpreter overridden with: {} -c", shell);
        merged_config.shell = ShellSection::posix(shell);
    }
    let mut merged_config = merged_config.resolved();
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "CMDS", "cmds") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.cmds.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Values set in the project file win over the user file, field by field.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    Config {
        shell: ShellSection {
            executable: project.shell.executable.or(user.shell.executable),
            initial_arguments: project
                .shell
                .initial_arguments
                .or(user.shell.initial_arguments),
        },
        execution: ExecutionSection {
            terminate_on_failure: project
                .execution
                .terminate_on_failure
                .or(user.execution.terminate_on_failure),
            print_arguments: project
                .execution
                .print_arguments
                .or(user.execution.print_arguments),
            silence_standard_out: project
                .execution
                .silence_standard_out
                .or(user.execution.silence_standard_out),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(executable) = config.shell.executable.as_mut() {
        *executable = shellexpand::tilde(executable.as_str()).into_owned();
        debug!("Expanded shell executable: {}", executable);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.shell.executable().trim().is_empty() {
        return Err(anyhow!(CmdsError::Config(
            "shell.executable cannot be empty.".to_string()
        )));
    }
    let executable = Path::new(config.shell.executable());
    if executable.is_absolute() && !executable.exists() {
        warn!(
            "Configured shell executable '{}' does not exist.",
            executable.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [shell]
            executable = "/bin/sh"
            initial_arguments = ["-c"]

            [execution]
            print_arguments = true
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.shell.executable(), "/bin/sh");
        assert_eq!(config.shell.initial_arguments(), vec!["-c"]);
        assert!(config.execution.terminate_on_failure()); // Default
        assert_eq!(config.execution.print_arguments, Some(true));
        assert_eq!(config.execution.silence_standard_out, None);
    }

    #[test]
    fn test_to_toml_round_trips_through_parser() {
        let resolved = Config::default().resolved();
        let rendered = resolved.to_toml_string().unwrap();
        assert!(rendered.contains("[shell]"));
        assert!(rendered.contains("executable = \"/usr/bin/env\""));
        assert!(rendered.contains("terminate_on_failure = true"));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, resolved);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[shell]\ninterpreter = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_execute_options_from_config() {
        let config = Config {
            execution: ExecutionSection {
                terminate_on_failure: Some(false),
                print_arguments: None,
                silence_standard_out: Some(true),
            },
            ..Default::default()
        };
        let options = config.execute_options();
        assert!(!options.contains(ExecuteOptions::TERMINATE_ON_FAILURE));
        assert!(options.contains(ExecuteOptions::SILENCE_STANDARD_OUT));

        assert_eq!(Config::default().execute_options(), ExecuteOptions::default());
    }

    #[test]
    fn test_merge_prefers_project_values_field_by_field() {
        let user = Config {
            shell: ShellSection::posix("/bin/zsh"),
            ..Default::default()
        };
        let project = Config {
            execution: ExecutionSection {
                terminate_on_failure: Some(false),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.shell.executable(), "/bin/zsh");
        assert_eq!(merged.shell.initial_arguments(), vec!["-c"]);
        assert!(!merged.execution.terminate_on_failure());
    }

    #[test]
    fn test_project_can_restore_defaults_over_user_values() {
        let user: Config = toml::from_str(
            "[shell]\nexecutable = \"/bin/zsh\"\n\n[execution]\nterminate_on_failure = false\nprint_arguments = true\n",
        )
        .unwrap();
        let project: Config = toml::from_str(
            "[shell]\nexecutable = \"/usr/bin/env\"\n\n[execution]\nterminate_on_failure = true\nprint_arguments = false\n",
        )
        .unwrap();

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.shell.executable(), "/usr/bin/env");
        assert!(merged.execution.terminate_on_failure());
        assert!(!merged.execution.print_arguments());
        assert_eq!(merged.execute_options(), ExecuteOptions::default());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            shell: ShellSection {
                executable: Some("~/bin/myshell".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        expand_config_paths(&mut config);

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.shell.executable(),
            home_dir.join("bin/myshell").to_string_lossy()
        );
    }

    #[test]
    fn test_validate_config_empty_executable() {
        let config = Config {
            shell: ShellSection {
                executable: Some("  ".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("shell.executable cannot be empty"));
    }

    #[test]
    fn test_project_config_found_in_ancestor() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp_dir.path().join(PROJECT_CONFIG_FILENAME),
            "[shell]\nexecutable = \"/bin/sh\"\n",
        )
        .unwrap();

        let found = find_project_config_path(&nested).unwrap();
        assert_eq!(found, temp_dir.path().join(PROJECT_CONFIG_FILENAME));
        let config = load_config_from_path(&found).unwrap();
        assert_eq!(config.shell.executable(), "/bin/sh");
    }

    #[test]
    fn test_project_config_search_stops_at_git_root() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join(PROJECT_CONFIG_FILENAME),
            "[shell]\nexecutable = \"/bin/sh\"\n",
        )
        .unwrap();
        let repo = temp_dir.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        assert!(find_project_config_path(&repo).is_none());
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[shell\n").unwrap();
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_shell_override_replaces_interpreter_before_validation() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        fs::write(
            temp_dir.path().join(PROJECT_CONFIG_FILENAME),
            "[shell]\nexecutable = \"/bin/zsh\"\ninitial_arguments = [\"-o\", \"errexit\", \"-c\"]\n",
        )
        .unwrap();

        let config = build_config(temp_dir.path(), Some("~/bin/dash")).unwrap();
        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.shell.executable(),
            home_dir.join("bin/dash").to_string_lossy()
        );
        assert_eq!(config.shell.initial_arguments(), vec!["-c"]);

        let err = build_config(temp_dir.path(), Some(" ")).unwrap_err();
        assert!(format!("{:#}", err).contains("shell.executable cannot be empty"));
    }
}
