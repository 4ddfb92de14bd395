#![no_main]

use std::sync::OnceLock;
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use sable_fuzzy::MatchOptions;
use sable_index::{IndexSnapshot, MemoryIndex, SearchIndex, TypeQuery};

mod utils;

const TIMEOUT: Duration = Duration::from_secs(1);

fn run_one(text: &str) {
    // Malformed snapshots must fail cleanly; well-formed ones must be searchable.
    let Ok(snapshot) = IndexSnapshot::from_json_str(text) else {
        return;
    };
    let types = snapshot.types.len();
    let index = MemoryIndex::build(snapshot);
    assert_eq!(index.type_count(), types);

    let everything = TypeQuery::new("", MatchOptions::default());
    assert!(index.find_types(&everything).count() <= types);
}

fn runner() -> &'static utils::TimedRunner {
    static RUNNER: OnceLock<utils::TimedRunner> = OnceLock::new();
    RUNNER.get_or_init(|| utils::TimedRunner::new("fuzz_index_snapshot", TIMEOUT, run_one))
}

fuzz_target!(|data: &[u8]| {
    runner().run(data);
});
