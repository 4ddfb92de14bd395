//! Core shared types for Sable.
//!
//! This crate is intentionally small: interned-ish identifiers, dotted names,
//! text ranges and the cooperative cancellation primitives every other crate
//! threads through its work.

#![forbid(unsafe_code)]

mod cancel;
pub mod text;

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

pub use cancel::{CancellationToken, Cancelled, Checkpoint, DEFAULT_CHECKPOINT_INTERVAL};
pub use text::{TextRange, TextSize};

/// A single identifier (simple name) of a declaration.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(SmolStr);

impl Name {
    #[inline]
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(SmolStr::new(text.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self(SmolStr::from(value))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A dotted name such as `java.util.Map` or `java.util.Map.Entry`.
///
/// Package names and fully-qualified type names share this representation;
/// the empty name is the unnamed package. Serialized in dotted form.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QualifiedName {
    segments: Vec<Name>,
}

/// Package names are plain dotted names.
pub type PackageName = QualifiedName;

impl QualifiedName {
    pub fn new(segments: Vec<Name>) -> Self {
        Self { segments }
    }

    /// Parse a dotted name. Empty segments (`a..b`, trailing dots) are skipped.
    pub fn from_dotted(text: &str) -> Self {
        let segments = text
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Name::from)
            .collect();
        Self { segments }
    }

    #[inline]
    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn first(&self) -> Option<&Name> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&Name> {
        self.segments.last()
    }

    /// The name without its last segment, or `None` for single-segment and empty names.
    pub fn parent(&self) -> Option<QualifiedName> {
        match self.segments.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(QualifiedName::new(rest.to_vec())),
            _ => None,
        }
    }

    #[must_use]
    pub fn child(&self, name: impl Into<Name>) -> QualifiedName {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        QualifiedName { segments }
    }

    #[must_use]
    pub fn join(&self, other: &QualifiedName) -> QualifiedName {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        QualifiedName { segments }
    }

    /// `true` if `self` is `prefix` or lies strictly below it.
    pub fn starts_with(&self, prefix: &QualifiedName) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    pub fn to_dotted(&self) -> String {
        let mut out = String::new();
        for (idx, seg) in self.segments.iter().enumerate() {
            if idx > 0 {
                out.push('.');
            }
            out.push_str(seg.as_str());
        }
        out
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QualifiedName({})", self.to_dotted())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::from_dotted(value)
    }
}

impl From<String> for QualifiedName {
    fn from(value: String) -> Self {
        Self::from_dotted(&value)
    }
}

impl From<QualifiedName> for String {
    fn from(value: QualifiedName) -> Self {
        value.to_dotted()
    }
}

impl FromIterator<Name> for QualifiedName {
    fn from_iter<T: IntoIterator<Item = Name>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
