#![no_main]

use std::sync::OnceLock;
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use sable_fuzzy::{MatchKind, MatchOptions, NameMatcher};

mod utils;

const TIMEOUT: Duration = Duration::from_secs(1);

fn run_one(text: &str) {
    // `pattern\ncandidate`; a missing separator matches the text against itself.
    let (pattern, candidate) = text.split_once('\n').unwrap_or((text, text));

    for options in [MatchOptions::PREFIX_ONLY, MatchOptions::default(), MatchOptions::ALL] {
        let matcher = NameMatcher::new(pattern, options);
        let found = matcher.matches(candidate);
        if !pattern.is_empty() && pattern == candidate {
            assert_eq!(found.map(|m| m.kind), Some(MatchKind::Exact));
        }
        if let Some(found) = found {
            if found.kind == MatchKind::Exact {
                assert_eq!(pattern, candidate);
            }
        }
    }
}

fn runner() -> &'static utils::TimedRunner {
    static RUNNER: OnceLock<utils::TimedRunner> = OnceLock::new();
    RUNNER.get_or_init(|| utils::TimedRunner::new("fuzz_name_matcher", TIMEOUT, run_one))
}

fuzz_target!(|data: &[u8]| {
    runner().run(data);
});
