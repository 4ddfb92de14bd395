use std::cmp::Ordering;
use std::ops::Range;

use crate::words::{camel_humps, camel_segments, fold_byte, starts_with_folded, words};

/// The kind of match that was produced, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchKind {
    /// Every pattern word prefixes a candidate word, in order.
    Subword,
    /// The pattern occurs somewhere inside the candidate (ASCII case-insensitive).
    Substring,
    /// The pattern's segments prefix the candidate's humps, in order.
    CamelCase,
    /// The candidate starts with the pattern (ASCII case-insensitive).
    Prefix,
    /// The candidate is the pattern, case included.
    Exact,
}

impl MatchKind {
    /// Dense tier number, `0` for the weakest kind.
    pub fn tier(self) -> u32 {
        match self {
            MatchKind::Subword => 0,
            MatchKind::Substring => 1,
            MatchKind::CamelCase => 2,
            MatchKind::Prefix => 3,
            MatchKind::Exact => 4,
        }
    }
}

/// Result of matching one candidate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameMatch {
    pub kind: MatchKind,
    /// The matched characters also agree in case.
    pub case_exact: bool,
}

/// A key that defines stable ordering for matches.
///
/// The case bonus never lifts a match above a stronger kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankKey {
    kind_rank: u32,
    case_rank: u32,
}

impl NameMatch {
    pub fn rank_key(self) -> RankKey {
        RankKey {
            kind_rank: self.kind.tier(),
            case_rank: u32::from(self.case_exact),
        }
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.kind_rank, self.case_rank).cmp(&(other.kind_rank, other.case_rank))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Which optional matching modes are enabled. Exact and prefix matching are always on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchOptions {
    pub camel_case: bool,
    pub substring: bool,
    pub subword: bool,
}

impl MatchOptions {
    pub const PREFIX_ONLY: MatchOptions = MatchOptions {
        camel_case: false,
        substring: false,
        subword: false,
    };

    pub const ALL: MatchOptions = MatchOptions {
        camel_case: true,
        substring: true,
        subword: true,
    };
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            camel_case: true,
            substring: true,
            subword: false,
        }
    }
}

/// Reusable matcher for one pattern; pattern segmentation is computed once.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    pattern: String,
    options: MatchOptions,
    segments: Vec<Range<usize>>,
    words: Vec<Range<usize>>,
}

impl NameMatcher {
    pub fn new(pattern: &str, options: MatchOptions) -> Self {
        let bytes = pattern.as_bytes();
        Self {
            pattern: pattern.to_string(),
            options,
            segments: camel_segments(bytes),
            words: words(bytes),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Match `candidate`, returning the strongest enabled kind that succeeds.
    pub fn matches(&self, candidate: &str) -> Option<NameMatch> {
        let p = self.pattern.as_bytes();
        let c = candidate.as_bytes();

        if p.is_empty() {
            return Some(NameMatch {
                kind: MatchKind::Prefix,
                case_exact: true,
            });
        }

        if p == c {
            return Some(NameMatch {
                kind: MatchKind::Exact,
                case_exact: true,
            });
        }

        if let Some(case_exact) = starts_with_folded(c, p) {
            return Some(NameMatch {
                kind: MatchKind::Prefix,
                case_exact,
            });
        }

        if self.options.camel_case {
            if let Some(case_exact) = self.camel_case(c) {
                return Some(NameMatch {
                    kind: MatchKind::CamelCase,
                    case_exact,
                });
            }
        }

        if self.options.substring {
            if let Some(case_exact) = substring(p, c) {
                return Some(NameMatch {
                    kind: MatchKind::Substring,
                    case_exact,
                });
            }
        }

        if self.options.subword {
            if let Some(case_exact) = self.subword(c) {
                return Some(NameMatch {
                    kind: MatchKind::Subword,
                    case_exact,
                });
            }
        }

        None
    }

    fn camel_case(&self, candidate: &[u8]) -> Option<bool> {
        // A single segment is a plain prefix match, which already failed.
        if self.segments.len() < 2 {
            return None;
        }
        let humps = camel_humps(candidate);
        let pattern = self.pattern.as_bytes();

        let (first, rest) = self.segments.split_first()?;
        let first_hump = humps.first()?;
        let mut case_exact =
            starts_with_folded(&candidate[first_hump.clone()], &pattern[first.clone()])?;

        let mut next = 1;
        for segment in rest {
            let needle = &pattern[segment.clone()];
            let (idx, exact) = humps[next..]
                .iter()
                .enumerate()
                .find_map(|(offset, hump)| {
                    starts_with_folded(&candidate[hump.clone()], needle)
                        .map(|exact| (next + offset, exact))
                })?;
            case_exact &= exact;
            next = idx + 1;
        }
        Some(case_exact)
    }

    fn subword(&self, candidate: &[u8]) -> Option<bool> {
        if self.words.is_empty() {
            return None;
        }
        let candidate_words = words(candidate);
        let pattern = self.pattern.as_bytes();

        let mut next = 0;
        let mut case_exact = true;
        for word in &self.words {
            let needle = &pattern[word.clone()];
            let (idx, exact) = candidate_words[next..]
                .iter()
                .enumerate()
                .find_map(|(offset, w)| {
                    starts_with_folded(&candidate[w.clone()], needle)
                        .map(|exact| (next + offset, exact))
                })?;
            case_exact &= exact;
            next = idx + 1;
        }
        Some(case_exact)
    }
}

fn substring(pattern: &[u8], candidate: &[u8]) -> Option<bool> {
    if pattern.len() > candidate.len() {
        return None;
    }
    let mut found = None;
    for start in 0..=candidate.len() - pattern.len() {
        let window = &candidate[start..start + pattern.len()];
        if window == pattern {
            return Some(true);
        }
        if found.is_none()
            && window
                .iter()
                .zip(pattern)
                .all(|(&c, &p)| fold_byte(c) == fold_byte(p))
        {
            found = Some(false);
        }
    }
    found
}

/// Match `pattern` against `candidate` with the given options.
pub fn match_name(pattern: &str, candidate: &str, options: MatchOptions) -> Option<NameMatch> {
    NameMatcher::new(pattern, options).matches(candidate)
}
