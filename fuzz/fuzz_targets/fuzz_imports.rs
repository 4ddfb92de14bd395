#![no_main]

use std::sync::OnceLock;
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use sable_resolve::{ImportMap, IMPLICIT_PACKAGE};

mod utils;

const TIMEOUT: Duration = Duration::from_secs(1);

fn run_one(text: &str) {
    // One import declaration per line; errors are expected, panics are not.
    let Ok(imports) = ImportMap::from_decls(text.lines()) else {
        return;
    };
    let on_demand = imports.on_demand();
    assert!(on_demand
        .iter()
        .any(|(path, _)| path.to_dotted() == IMPLICIT_PACKAGE));
    for import in &imports.type_single {
        assert!(imports.single_type(import.imported.as_str()).is_some());
    }
}

fn runner() -> &'static utils::TimedRunner {
    static RUNNER: OnceLock<utils::TimedRunner> = OnceLock::new();
    RUNNER.get_or_init(|| utils::TimedRunner::new("fuzz_imports", TIMEOUT, run_one))
}

fuzz_target!(|data: &[u8]| {
    runner().run(data);
});
