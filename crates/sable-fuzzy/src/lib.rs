//! Identifier matching primitives used by Sable's completion engine.
//!
//! A pattern (the token typed before the cursor) is matched against a
//! candidate name with a fixed hierarchy of modes:
//!
//! | kind | rule | always on |
//! |---|---|---|
//! | [`MatchKind::Exact`] | identical, case included | yes |
//! | [`MatchKind::Prefix`] | ASCII case-insensitive leading match | yes |
//! | [`MatchKind::CamelCase`] | `NPE` → `NullPointerException` | no |
//! | [`MatchKind::Substring`] | pattern occurs anywhere | no |
//! | [`MatchKind::Subword`] | `all_lis` → `addAllListeners` | no |
//!
//! Only the strongest successful kind is reported, together with a
//! case-exactness flag. Matching is ASCII-only case-insensitive: non-ASCII
//! bytes must match exactly.

#![forbid(unsafe_code)]

mod matcher;
mod words;

pub use matcher::{match_name, MatchKind, MatchOptions, NameMatch, NameMatcher, RankKey};

/// Case-insensitive prefix match.
#[inline]
pub fn prefix_match(query: &str, candidate: &str) -> bool {
    words::starts_with_folded(candidate.as_bytes(), query.as_bytes()).is_some()
}
