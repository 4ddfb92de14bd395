use crate::diagnostics::ConfigWarning;
use crate::{FavoritePattern, LoggingConfig, SableConfig};

impl SableConfig {
    /// Semantic checks that serde cannot express. Every problem is reported in one pass.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut out = Vec::new();
        validate_completion(self, &mut out);
        validate_logging(self, &mut out);
        out
    }
}

fn validate_completion(config: &SableConfig, out: &mut Vec<ConfigWarning>) {
    let completion = &config.completion;
    for (idx, raw) in completion.favorite_static_members.iter().enumerate() {
        if FavoritePattern::parse(raw).is_none() {
            out.push(ConfigWarning::FavoritePatternInvalid {
                toml_path: format!("completion.favorite_static_members[{idx}]"),
                value: raw.clone(),
            });
        }
    }

    if completion.check_discouraged_reference && !completion.check_forbidden_reference {
        out.push(ConfigWarning::DiscouragedCheckWithoutForbiddenCheck);
    }
}

fn validate_logging(config: &SableConfig, out: &mut Vec<ConfigWarning>) {
    let normalized = LoggingConfig::normalize_level_directives(&config.logging.level);
    if !config.logging.level.trim().is_empty()
        && tracing_subscriber::EnvFilter::try_new(normalized.clone()).is_err()
    {
        out.push(ConfigWarning::LoggingLevelInvalid {
            value: config.logging.level.clone(),
            normalized,
        });
    }
}
