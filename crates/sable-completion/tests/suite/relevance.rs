use pretty_assertions::assert_eq;
use sable_completion::{
    CompletionEngine, CompletionRequest, CompletionSite, ExpectedTypes, NoGuesser, ProposalKind,
    Tier, TypeKindHint, MAX_RELEVANCE,
};
use sable_config::CompletionOptions;
use sable_core::Name;
use sable_index::AcceptedType;
use sable_resolve::{LocalKind, LocalVar};
use sable_test_utils::World;
use sable_types::{ClassDef, ClassKind, FieldDef, MethodDef, Modifiers, PrimitiveType, Type};

use super::{completions, declare_main, main_class, named, of_kind, run};

fn int() -> Type {
    Type::Primitive(PrimitiveType::Int)
}

fn position(texts: &[&str], text: &str) -> usize {
    texts
        .iter()
        .position(|t| *t == text)
        .unwrap_or_else(|| panic!("{text} not proposed in {texts:?}"))
}

#[test]
fn expected_type_ranks_matching_locals_first() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());
    let object = world.ty("java.lang.Object");
    let string = world.ty("java.lang.String");
    world.local(main.run, "target", object);
    world.local(main.run, "text", string.clone());

    let request = CompletionRequest::new("t", main.run, CompletionSite::Name)
        .with_expected(ExpectedTypes::subtypes_of(vec![string]));
    let proposals = run(&world, &request);
    let texts = completions(&proposals);
    assert!(position(&texts, "text") < position(&texts, "target"));
}

#[test]
fn uninteresting_variable_loses_exactly_one_tier() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());
    world.local(main.run, "count", int());

    let plain = CompletionRequest::new("cou", main.run, CompletionSite::Name);
    let marked = plain.clone().with_uninteresting("count");
    let before = named(&run(&world, &plain), "count")[0].relevance;
    let after = named(&run(&world, &marked), "count")[0].relevance;
    assert_eq!(before - after, Tier::Interesting.weight());
}

#[test]
fn statics_declared_on_the_accessed_type_come_first() {
    let mut world = World::new("app", &[]);
    let statik = Modifiers::PUBLIC | Modifiers::STATIC;
    let base = world.add(
        ClassDef::new("app.Base", ClassKind::Class)
            .with_method(MethodDef::new("create", vec![], Type::Void).with_modifiers(statik)),
    );
    let derived = world.add(
        ClassDef::new("app.Derived", ClassKind::Class)
            .with_super(Type::class(base, vec![]))
            .with_method(
                MethodDef::new("createDefault", vec![], Type::Void).with_modifiers(statik),
            ),
    );
    let main = declare_main(&mut world, main_class());

    let site = CompletionSite::StaticMemberAccess { class: derived };
    let proposals = run(&world, &CompletionRequest::new("cre", main.run, site));
    assert_eq!(completions(&proposals), vec!["createDefault()", "create()"]);
}

#[test]
fn static_access_offers_the_class_literal() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());

    let site = CompletionSite::StaticMemberAccess { class: main.class };
    let proposals = run(&world, &CompletionRequest::new("cla", main.run, site));
    assert_eq!(of_kind(&proposals, ProposalKind::Keyword), vec!["class"]);
}

#[test]
fn enum_switch_offers_its_constants() {
    let mut world = World::new("app", &[]);
    let color = world.add(
        ClassDef::new("app.Color", ClassKind::Enum).with_enum_constants(&["RED", "GREEN"]),
    );
    let main = declare_main(&mut world, main_class());

    let site = CompletionSite::CaseLabel {
        switch_type: Type::class(color, vec![]),
    };
    let proposals = run(&world, &CompletionRequest::new("", main.run, site));
    assert_eq!(completions(&proposals), vec!["RED", "GREEN"]);
}

#[test]
fn int_switch_offers_only_constants() {
    let mut world = World::new("app", &[]);
    let main = declare_main(
        &mut world,
        main_class()
            .with_field(FieldDef::new(
                "MAX",
                int(),
                Modifiers::PRIVATE | Modifiers::STATIC | Modifiers::FINAL,
            ))
            .with_field(FieldDef::new("total", int(), Modifiers::PRIVATE)),
    );
    let mut limit = LocalVar::new("LIMIT", int(), LocalKind::Local);
    limit.is_final = true;
    world.graph.add_local(main.run, limit);
    world.local(main.run, "count", int());

    let site = CompletionSite::CaseLabel { switch_type: int() };
    let proposals = run(&world, &CompletionRequest::new("", main.run, site));
    let mut texts = completions(&proposals);
    texts.sort_unstable();
    assert_eq!(texts, vec!["LIMIT", "MAX"]);
}

#[test]
fn super_access_prefers_the_overridden_method() {
    let mut world = World::new("app", &[]);
    let base = world.add(
        ClassDef::new("app.Base", ClassKind::Class)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .with_method(MethodDef::new("drawAll", vec![], Type::Void))
            .with_method(MethodDef::new("draw", vec![], Type::Void))
            .with_method(
                MethodDef::new("drawOutline", vec![], Type::Void)
                    .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
            ),
    );
    let shape = world.declare(
        ClassDef::new("app.Shape", ClassKind::Class)
            .with_super(Type::class(base, vec![]))
            .with_method(MethodDef::new("draw", vec![], Type::Void))
            .with_method(MethodDef::new("drawOutline", vec![], Type::Void)),
    );
    let class_scope = world.class_scope(world.unit, shape);
    let body = world.method_scope(class_scope, shape, "draw");

    let proposals = run(&world, &CompletionRequest::new("dr", body, CompletionSite::SuperAccess));
    assert_eq!(completions(&proposals), vec!["draw()", "drawAll()"]);
    assert!(proposals[0].relevance - proposals[1].relevance >= Tier::Override.weight());
}

#[test]
fn super_access_is_empty_in_static_context() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());

    let proposals = run(&world, &CompletionRequest::new("", main.main, CompletionSite::SuperAccess));
    assert!(proposals.is_empty());
}

#[test]
fn exception_hint_ranks_throwables_first() {
    let mut world = World::new("app", &[]);
    world.index_only(AcceptedType::new("app.ExtraWidget", ClassKind::Class));
    let main = declare_main(&mut world, main_class());

    let request = CompletionRequest::new("Ex", main.run, CompletionSite::TypeReference)
        .with_type_kind_hint(TypeKindHint::Exception);
    let proposals = run(&world, &request);
    let texts = completions(&proposals);
    assert!(position(&texts, "Exception") < position(&texts, "ExtraWidget"));
}

#[test]
fn written_receiver_resolves_through_the_imports() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());
    let site = CompletionSite::MemberAccess {
        receiver: Type::Named("String".to_string()),
        receiver_name: None,
    };
    let request = CompletionRequest::new("len", main.run, site);

    let proposals = run(&world, &request);
    assert_eq!(completions(&proposals), vec!["length()"]);
    assert!(!proposals[0].missing);
}

#[test]
fn guessed_receiver_members_are_marked_missing() {
    let mut world = World::new("app", &[]);
    world.add(
        ClassDef::new("lib.Parser", ClassKind::Class).with_method(
            MethodDef::new("parse", vec![], Type::Void).with_modifiers(Modifiers::PUBLIC),
        ),
    );
    let main = declare_main(&mut world, main_class());
    let site = CompletionSite::MemberAccess {
        receiver: Type::Named("Parser".to_string()),
        receiver_name: None,
    };
    let request = CompletionRequest::new("par", main.run, site);

    let proposals = run(&world, &request);
    assert_eq!(completions(&proposals), vec!["parse()"]);
    assert!(proposals[0].missing);
    assert_eq!(proposals[0].declaring.as_deref(), Some("lib.Parser"));

    let index = world.index();
    let engine = CompletionEngine::new(&world.store, &index, CompletionOptions::default())
        .with_guesser(NoGuesser);
    assert!(engine.complete_sorted(&world.graph, &request).is_empty());
}

#[test]
fn receiver_of_unknown_type_is_not_guessed_from_its_variable_name() {
    let mut world = World::new("app", &[]);
    world.add(
        ClassDef::new("lib.Parser", ClassKind::Class).with_method(
            MethodDef::new("parse", vec![], Type::Void).with_modifiers(Modifiers::PUBLIC),
        ),
    );
    let main = declare_main(&mut world, main_class());
    let site = CompletionSite::MemberAccess {
        receiver: Type::Unknown,
        receiver_name: Some(Name::from("Parser")),
    };

    let proposals = run(&world, &CompletionRequest::new("par", main.run, site));
    assert!(proposals.is_empty());
}

#[test]
fn relevance_never_exceeds_the_maximum() {
    let mut world = World::new("app", &["java.util.*"]);
    world.index_only(AcceptedType::new("java.util.Objects", ClassKind::Class));
    let main = declare_main(&mut world, main_class());
    world.local(main.run, "object", world.ty("java.lang.Object"));

    let request = CompletionRequest::new("Obj", main.run, CompletionSite::Name)
        .with_expected(ExpectedTypes::subtypes_of(vec![world.ty("java.lang.Object")]))
        .inside_qualified_reference();
    let proposals = run(&world, &request);
    assert!(!proposals.is_empty());
    assert!(proposals.iter().all(|p| p.relevance <= MAX_RELEVANCE));
}
