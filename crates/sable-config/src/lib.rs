//! Configuration for Sable.
//!
//! A workspace may carry a `sable.toml`:
//!
//! ```toml
//! [completion]
//! camel_case_match = true
//! substring_match = false
//! favorite_static_members = ["org.junit.Assert.*", "java.util.Objects.requireNonNull"]
//!
//! [logging]
//! level = "sable.completion=debug,info"
//! json = false
//! ```
//!
//! Every key is optional; missing keys take the defaults documented on each field.

#![forbid(unsafe_code)]

mod diagnostics;
mod logging;
mod schema;
mod validation;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use sable_core::{text::is_identifier, Name, QualifiedName};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning};
pub use logging::init_tracing;
pub use schema::json_schema;

/// Environment variable overriding config discovery.
pub const SABLE_CONFIG_ENV_VAR: &str = "SABLE_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct SableConfig {
    /// Completion engine options.
    #[serde(default)]
    pub completion: CompletionOptions,

    /// Logging settings for all Sable crates.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Options fixed for the duration of one completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(deny_unknown_fields)]
pub struct CompletionOptions {
    /// Hide deprecated members and types.
    pub check_deprecation: bool,

    /// Hide members the cursor location cannot see (private, package-private, protected).
    pub check_visibility: bool,

    /// Hide types and members whose access rule is "non-accessible".
    pub check_forbidden_reference: bool,

    /// Hide types and members whose access rule is "discouraged".
    pub check_discouraged_reference: bool,

    /// Match `NPE` against `NullPointerException`.
    pub camel_case_match: bool,

    /// Match the token anywhere inside a name.
    pub substring_match: bool,

    /// Match `get_val` against `getValue` word by word.
    pub subword_match: bool,

    /// Qualify instance fields and methods with `this.` and static members with their type.
    pub force_implicit_qualification: bool,

    /// Propose favorite static members that are not imported yet, with an import hint.
    pub suggest_static_import: bool,

    /// Static members proposed without qualification: `pkg.Type.*` or `pkg.Type.member`.
    pub favorite_static_members: Vec<String>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            check_deprecation: false,
            check_visibility: true,
            check_forbidden_reference: true,
            check_discouraged_reference: false,
            camel_case_match: true,
            substring_match: true,
            subword_match: false,
            force_implicit_qualification: false,
            suggest_static_import: true,
            favorite_static_members: Vec::new(),
        }
    }
}

impl CompletionOptions {
    /// Parsed favorite patterns; malformed entries are skipped (validation reports them).
    pub fn favorites(&self) -> Vec<FavoritePattern> {
        self.favorite_static_members
            .iter()
            .filter_map(|raw| FavoritePattern::parse(raw))
            .collect()
    }
}

/// A parsed entry of `completion.favorite_static_members`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FavoritePattern {
    /// Fully-qualified declaring type.
    pub ty: QualifiedName,
    /// `None` for `Type.*`.
    pub member: Option<Name>,
}

impl FavoritePattern {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (ty, member) = raw.rsplit_once('.')?;
        if ty.is_empty() || !ty.split('.').all(is_identifier) {
            return None;
        }
        let member = match member {
            "*" => None,
            name if is_identifier(name) => Some(Name::from(name)),
            _ => return None,
        };
        Some(Self {
            ty: QualifiedName::from_dotted(ty),
            member,
        })
    }

    pub fn matches_member(&self, name: &str) -> bool {
        self.member.as_ref().map_or(true, |member| member == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,

    /// Append logs to this file as well. An unopenable file disables only this sink.
    #[serde(default)]
    #[schemars(with = "Option<String>")]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// The effective filter: configured directives, with `RUST_LOG` merged on top when set.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        match env_directives {
            Some(env_directives) => {
                let config_directives = Self::normalize_level_directives(&self.level);
                tracing_subscriber::EnvFilter::try_new(format!("{config_directives},{env_directives}"))
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
            file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

/// Strip user-provided values from a TOML error message.
///
/// `toml` messages quote offending values (`invalid type: string "hunter2"`);
/// config errors end up in editor diagnostics and logs.
fn sanitize_toml_error_message(message: &str) -> String {
    static QUOTED: OnceLock<Option<regex::Regex>> = OnceLock::new();
    static BACKTICKED_VALUE: OnceLock<Option<regex::Regex>> = OnceLock::new();

    let mut out = message.to_owned();
    if let Some(re) = QUOTED
        .get_or_init(|| regex::Regex::new(r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'"#).ok())
    {
        out = re.replace_all(&out, "<redacted>").into_owned();
    }
    // `unknown field `x`` and `unknown variant `x`` echo user keys; `missing field `x`` does not.
    if let Some(re) = BACKTICKED_VALUE.get_or_init(|| {
        regex::Regex::new(r"(unknown (?:field|variant)|invalid (?:type|value): \w+) `[^`]*`").ok()
    }) {
        out = re.replace_all(&out, "$1 `<redacted>`").into_owned();
    }
    out
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // `Display` includes a source snippet; keep only the message.
        ConfigError::Toml(sanitize_toml_error_message(err.message()))
    }
}

impl SableConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_from_path_with_diagnostics(path).map(|(config, _)| config)
    }

    /// Load a TOML file and report unknown keys and validation warnings.
    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str_with_diagnostics(&text)
    }

    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<SableConfig>(text)?;
        let diagnostics = ConfigDiagnostics {
            unknown_keys,
            warnings: config.validate(),
        };
        for key in &diagnostics.unknown_keys {
            tracing::warn!(target: "sable.config", key = %key, "unknown config key");
        }
        Ok((config, diagnostics))
    }
}

/// Find the config file for a workspace.
///
/// Search order: `SABLE_CONFIG_PATH` (absolute or relative to `workspace_root`),
/// then `sable.toml` and `.sable.toml` in `workspace_root`.
pub fn discover_config_path(workspace_root: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(SABLE_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            workspace_root.join(candidate)
        };
        return Some(path);
    }

    ["sable.toml", ".sable.toml"]
        .into_iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
}

/// Load the workspace config, or the defaults when there is none.
pub fn load_for_workspace(
    workspace_root: &Path,
) -> Result<(SableConfig, Option<PathBuf>, ConfigDiagnostics), ConfigError> {
    let Some(path) = discover_config_path(workspace_root) else {
        return Ok((SableConfig::default(), None, ConfigDiagnostics::default()));
    };
    let (config, diagnostics) = SableConfig::load_from_path_with_diagnostics(&path)?;
    Ok((config, Some(path), diagnostics))
}
