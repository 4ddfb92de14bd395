// Run locally (from the repo root):
//   cargo +nightly fuzz run fuzz_completion -- -runs=1000
#![no_main]

use std::sync::OnceLock;
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use sable_completion::{CompletionEngine, CompletionRequest, CompletionSite, MAX_RELEVANCE};
use sable_config::CompletionOptions;
use sable_core::PackageName;
use sable_index::MemoryIndex;
use sable_test_utils::World;
use sable_types::{ClassDef, ClassKind, FieldDef, MethodDef, Modifiers, PrimitiveType, Type};

mod utils;

const TIMEOUT: Duration = Duration::from_secs(2);

struct Fixture {
    world: World,
    index: MemoryIndex,
    body: usize,
}

fn fixture() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let mut world = World::new("app", &["java.util.*", "static java.lang.Math.*"]);
        let int = Type::Primitive(PrimitiveType::Int);
        let main = world.declare(
            ClassDef::new("app.Main", ClassKind::Class)
                .with_field(FieldDef::new("count", int.clone(), Modifiers::PRIVATE))
                .with_method(MethodDef::new("run", vec![], Type::Void)),
        );
        let class_scope = world.class_scope(world.unit, main);
        let body = world.method_scope(class_scope, main, "run");
        world.param(body, "count", int);
        let index = world.index();
        Fixture { world, index, body }
    })
}

fn run_one(text: &str) {
    let fixture = fixture();
    let engine = CompletionEngine::new(
        &fixture.world.store,
        &fixture.index,
        CompletionOptions::default(),
    );

    // The last byte picks the site; the cursor sits at the end of the text.
    let site = match text.bytes().last().unwrap_or(0) % 4 {
        0 => CompletionSite::Name,
        1 => CompletionSite::TypeReference,
        2 => CompletionSite::Allocation,
        _ => CompletionSite::QualifiedName {
            qualifier: PackageName::from_dotted("java"),
        },
    };
    let request = CompletionRequest::at_offset(text, text.len(), fixture.body, site);
    let proposals = engine.complete_sorted(&fixture.world.graph, &request);

    for proposal in &proposals {
        assert!(proposal.relevance <= MAX_RELEVANCE);
        assert_eq!(proposal.replace, request.replace_range);
    }
    assert!(proposals.len() <= 100_000);
}

fn runner() -> &'static utils::TimedRunner {
    static RUNNER: OnceLock<utils::TimedRunner> = OnceLock::new();
    RUNNER.get_or_init(|| utils::TimedRunner::new("fuzz_completion", TIMEOUT, run_one))
}

fuzz_target!(|data: &[u8]| {
    runner().run(data);
});
