mod allocation;
mod relevance;
mod scope_walk;
mod search;
mod shadowing;

use sable_completion::{CompletionEngine, CompletionRequest, Proposal, ProposalKind};
use sable_config::CompletionOptions;
use sable_resolve::ScopeId;
use sable_test_utils::World;
use sable_types::{ClassDef, ClassId, ClassKind, MethodDef, Modifiers, Type};

pub(crate) fn run(world: &World, request: &CompletionRequest) -> Vec<Proposal> {
    run_with(world, request, CompletionOptions::default())
}

pub(crate) fn run_with(
    world: &World,
    request: &CompletionRequest,
    options: CompletionOptions,
) -> Vec<Proposal> {
    sable_test_utils::init_test_tracing();
    let index = world.index();
    let engine = CompletionEngine::new(&world.store, &index, options);
    engine.complete_sorted(&world.graph, request)
}

/// Inserted texts, best first.
pub(crate) fn completions(proposals: &[Proposal]) -> Vec<&str> {
    proposals.iter().map(|p| p.completion.as_str()).collect()
}

pub(crate) fn of_kind(proposals: &[Proposal], kind: ProposalKind) -> Vec<&str> {
    proposals
        .iter()
        .filter(|p| p.kind == kind)
        .map(|p| p.completion.as_str())
        .collect()
}

pub(crate) fn named<'a>(proposals: &'a [Proposal], name: &str) -> Vec<&'a Proposal> {
    proposals.iter().filter(|p| p.name == name).collect()
}

/// Declare `app.Main` (with `run()` and `static main()` added) and return the
/// body scopes of both methods.
pub(crate) struct MainClass {
    pub class: ClassId,
    pub class_scope: ScopeId,
    /// Body of the instance method `run`.
    pub run: ScopeId,
    /// Body of the static method `main`.
    pub main: ScopeId,
}

pub(crate) fn declare_main(world: &mut World, def: ClassDef) -> MainClass {
    let def = def
        .with_method(MethodDef::new("run", vec![], Type::Void))
        .with_method(
            MethodDef::new("main", vec![], Type::Void)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC),
        );
    let class = world.declare(def);
    let class_scope = world.class_scope(world.unit, class);
    let run = world.method_scope(class_scope, class, "run");
    let main = world.method_scope(class_scope, class, "main");
    MainClass {
        class,
        class_scope,
        run,
        main,
    }
}

pub(crate) fn main_class() -> ClassDef {
    ClassDef::new("app.Main", ClassKind::Class)
}
