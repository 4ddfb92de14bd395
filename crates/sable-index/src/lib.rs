//! Classpath-wide search index.
//!
//! Queries return lazy, finite, non-restartable iterators of raw facts
//! ([`AcceptedType`], [`AcceptedConstructor`], package names). Facts are
//! filtered by [`sable_fuzzy`] name matching only; imports, scope and
//! duplicates are the caller's concern.

#![forbid(unsafe_code)]

mod facts;
mod memory;
mod snapshot;

use sable_core::{PackageName, QualifiedName};
use sable_fuzzy::MatchOptions;

pub use facts::{AcceptedConstructor, AcceptedType};
pub use memory::{CandidateStrategy, MemoryIndex};
pub use snapshot::{IndexError, IndexSnapshot};

/// Prefix query for types and constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeQuery {
    /// Pattern matched against the simple name.
    pub pattern: String,
    /// Restrict to types whose container (package plus enclosing types) is exactly this name.
    pub container: Option<QualifiedName>,
    pub options: MatchOptions,
}

impl TypeQuery {
    pub fn new(pattern: impl Into<String>, options: MatchOptions) -> Self {
        Self {
            pattern: pattern.into(),
            container: None,
            options,
        }
    }

    #[must_use]
    pub fn in_container(mut self, container: QualifiedName) -> Self {
        self.container = Some(container);
        self
    }
}

/// Query for packages whose next segment below `parent` matches `pattern`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageQuery {
    pub pattern: String,
    pub parent: Option<PackageName>,
    pub options: MatchOptions,
}

pub type Facts<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

pub trait SearchIndex {
    fn find_types<'a>(&'a self, query: &TypeQuery) -> Facts<'a, AcceptedType>;

    fn find_constructors<'a>(&'a self, query: &TypeQuery) -> Facts<'a, AcceptedConstructor>;

    fn find_packages<'a>(&'a self, query: &PackageQuery) -> Facts<'a, PackageName>;
}

/// An index with no entries, for requests that only need scope candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyIndex;

impl SearchIndex for EmptyIndex {
    fn find_types<'a>(&'a self, _query: &TypeQuery) -> Facts<'a, AcceptedType> {
        Box::new(std::iter::empty())
    }

    fn find_constructors<'a>(&'a self, _query: &TypeQuery) -> Facts<'a, AcceptedConstructor> {
        Box::new(std::iter::empty())
    }

    fn find_packages<'a>(&'a self, _query: &PackageQuery) -> Facts<'a, PackageName> {
        Box::new(std::iter::empty())
    }
}
