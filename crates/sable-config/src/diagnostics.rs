use serde::de::DeserializeOwned;

/// Problems found while loading a `sable.toml`.
///
/// Loading is best effort: a config that deserializes is always returned,
/// together with the keys that were ignored and any semantic warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    /// Dotted paths of keys the schema does not know (`completion.camelcase_match`).
    pub unknown_keys: Vec<String>,
    pub warnings: Vec<ConfigWarning>,
}

impl ConfigDiagnostics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unknown_keys.is_empty() && self.warnings.is_empty()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A favorite pattern that is neither `pkg.Type.*` nor `pkg.Type.member`.
    FavoritePatternInvalid { toml_path: String, value: String },
    /// `check_discouraged_reference` has no effect while forbidden references are allowed.
    DiscouragedCheckWithoutForbiddenCheck,
    LoggingLevelInvalid { value: String, normalized: String },
}

pub(crate) fn deserialize_toml_with_unknown_keys<T: DeserializeOwned>(
    text: &str,
) -> Result<(T, Vec<String>), toml::de::Error> {
    let mut unknown = Vec::<String>::new();
    let deserializer = toml::de::Deserializer::new(text);
    let value = serde_ignored::deserialize(deserializer, |path| {
        unknown.push(normalize_ignored_path(&path));
    })?;
    unknown.sort();
    unknown.dedup();
    Ok((value, unknown))
}

fn normalize_ignored_path(path: &serde_ignored::Path<'_>) -> String {
    // `serde_ignored` renders root paths with a leading `.` and sequence
    // indices as `.0`; TOML users expect `a[0].b`.
    let raw = path.to_string();
    raw.trim_start_matches('.')
        .split('.')
        .enumerate()
        .fold(String::new(), |mut out, (idx, segment)| {
            if idx > 0 && !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                out.push('[');
                out.push_str(segment);
                out.push(']');
                return out;
            }
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(segment);
            out
        })
}
