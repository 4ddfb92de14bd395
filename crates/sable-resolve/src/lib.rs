//! Lexical scopes, imports and type-name resolution.
//!
//! A [`ScopeGraph`] is produced by the front end for one compilation unit and
//! describes what is lexically visible at each point: locals, enclosing
//! classes and methods, static boundaries, `instanceof` narrowing and the
//! unit's [`ImportMap`].

#![forbid(unsafe_code)]

mod import_map;
mod resolver;
mod scopes;

pub use import_map::{
    ImportError, ImportMap, OnDemandSource, StaticSingleImport, StaticStarImport,
    TypeSingleImport, TypeStarImport, IMPLICIT_PACKAGE,
};
pub use resolver::{Resolver, TypeLookup};
pub use scopes::{Ancestors, LocalKind, LocalVar, ScopeData, ScopeGraph, ScopeId, ScopeKind};
