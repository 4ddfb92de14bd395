use pretty_assertions::assert_eq;
use sable_completion::{CompletionRequest, CompletionSite, ProposalKind};
use sable_config::CompletionOptions;
use sable_core::Name;
use sable_resolve::ScopeKind;
use sable_test_utils::World;
use sable_types::{ClassDef, ClassKind, FieldDef, MethodDef, Modifiers, PrimitiveType, Type};

use super::{completions, declare_main, main_class, named, of_kind, run, run_with};

fn int() -> Type {
    Type::Primitive(PrimitiveType::Int)
}

#[test]
fn inner_local_shadows_outer_local() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());
    world.local(main.run, "value", world.ty("java.lang.String"));
    let block = world.block(main.run);
    world.local(block, "value", int());

    let proposals = run(&world, &CompletionRequest::new("val", block, CompletionSite::Name));
    let locals = named(&proposals, "value");
    assert_eq!(locals.len(), 1);
    assert_eq!(locals[0].signature.as_deref(), Some("value : int"));
}

#[test]
fn static_method_sees_only_static_fields() {
    let mut world = World::new("app", &[]);
    let main = declare_main(
        &mut world,
        main_class()
            .with_field(FieldDef::new("totalCount", int(), Modifiers::PRIVATE))
            .with_field(FieldDef::new(
                "totalLimit",
                int(),
                Modifiers::PRIVATE | Modifiers::STATIC,
            )),
    );

    let from_static = run(&world, &CompletionRequest::new("total", main.main, CompletionSite::Name));
    assert_eq!(completions(&from_static), vec!["totalLimit"]);

    let from_instance = run(&world, &CompletionRequest::new("total", main.run, CompletionSite::Name));
    let mut fields = of_kind(&from_instance, ProposalKind::Field);
    fields.sort_unstable();
    assert_eq!(fields, vec!["totalCount", "totalLimit"]);
}

#[test]
fn this_keyword_needs_an_instance() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());

    let instance = run(&world, &CompletionRequest::new("th", main.run, CompletionSite::Name));
    assert!(of_kind(&instance, ProposalKind::Keyword).contains(&"this"));

    let statik = run(&world, &CompletionRequest::new("th", main.main, CompletionSite::Name));
    assert!(!of_kind(&statik, ProposalKind::Keyword).contains(&"this"));
}

#[test]
fn keywords_are_not_proposed_for_an_empty_token() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());

    let proposals = run(&world, &CompletionRequest::new("", main.run, CompletionSite::Name));
    assert!(of_kind(&proposals, ProposalKind::Keyword).is_empty());

    let proposals = run(&world, &CompletionRequest::new("nu", main.run, CompletionSite::Name));
    assert!(of_kind(&proposals, ProposalKind::Keyword).contains(&"null"));
}

#[test]
fn labels_stop_at_the_lambda_boundary() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());
    let loop_body = world.block(main.run);
    world.graph.add_label(loop_body, "outer");
    let lambda = world.scope(loop_body, ScopeKind::Lambda);
    let inner_body = world.block(lambda);
    world.graph.add_label(inner_body, "inner");

    let inside = run(&world, &CompletionRequest::new("", inner_body, CompletionSite::Label));
    assert_eq!(completions(&inside), vec!["inner"]);

    let outside = run(&world, &CompletionRequest::new("", loop_body, CompletionSite::Label));
    assert_eq!(completions(&outside), vec!["outer"]);
}

#[test]
fn array_receiver_offers_length_not_locals() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());
    world.local(main.run, "length", int());

    let site = CompletionSite::MemberAccess {
        receiver: Type::array(int()),
        receiver_name: Some(Name::from("values")),
    };
    let proposals = run(&world, &CompletionRequest::new("le", main.run, site));
    assert_eq!(completions(&proposals), vec!["length"]);
    assert_eq!(proposals[0].kind, ProposalKind::Field);
    assert_eq!(proposals[0].signature.as_deref(), Some("length : int"));
    assert_eq!(proposals[0].declaring, None);
}

#[test]
fn array_clone_returns_the_array_type() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());

    let site = CompletionSite::MemberAccess {
        receiver: Type::array(int()),
        receiver_name: None,
    };
    let proposals = run(&world, &CompletionRequest::new("clo", main.run, site));
    assert_eq!(completions(&proposals), vec!["clone()"]);
    assert_eq!(proposals[0].signature.as_deref(), Some("clone() : int[]"));
}

#[test]
fn narrowed_receiver_members_are_reached_through_a_cast() {
    let mut world = World::new("app", &[]);
    let double = Type::Primitive(PrimitiveType::Double);
    let shape = world.add(
        ClassDef::new("app.Shape", ClassKind::Class)
            .with_method(MethodDef::new("area", vec![], double.clone())),
    );
    let circle = world.add(
        ClassDef::new("app.Circle", ClassKind::Class)
            .with_super(Type::class(shape, vec![]))
            .with_method(MethodDef::new("area", vec![], double.clone()))
            .with_method(MethodDef::new("radius", vec![], double)),
    );
    let main = declare_main(&mut world, main_class());
    world.param(main.run, "shape", Type::class(shape, vec![]));
    let guard = world.scope(
        main.run,
        ScopeKind::Guard {
            narrowed: vec![(Name::from("shape"), Type::class(circle, vec![]))],
        },
    );

    let site = CompletionSite::MemberAccess {
        receiver: Type::class(shape, vec![]),
        receiver_name: Some(Name::from("shape")),
    };
    let proposals = run(&world, &CompletionRequest::new("", guard, site));
    let texts = completions(&proposals);
    assert!(texts.contains(&"area()"));
    assert!(texts.contains(&"((Circle) shape).radius()"));
    assert!(!texts.contains(&"((Circle) shape).area()"));
    assert_eq!(named(&proposals, "area").len(), 1);
}

#[test]
fn single_static_import_brings_in_one_member() {
    let mut world = World::new("app", &["static java.lang.Math.max"]);
    let main = declare_main(&mut world, main_class());

    let proposals = run(&world, &CompletionRequest::new("m", main.run, CompletionSite::Name));
    let methods = of_kind(&proposals, ProposalKind::Method);
    assert!(methods.contains(&"max()"));
    assert!(!methods.contains(&"min()"));
    assert!(named(&proposals, "max")
        .iter()
        .all(|p| p.required_import.is_none()));
}

#[test]
fn on_demand_static_import_brings_in_all_statics() {
    let mut world = World::new("app", &["static java.lang.Math.*"]);
    let main = declare_main(&mut world, main_class());

    let proposals = run(&world, &CompletionRequest::new("m", main.run, CompletionSite::Name));
    let methods = of_kind(&proposals, ProposalKind::Method);
    assert!(methods.contains(&"max()"));
    assert!(methods.contains(&"min()"));
}

#[test]
fn favorite_members_carry_a_static_import_or_their_type() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());
    let request = CompletionRequest::new("max", main.run, CompletionSite::Name);
    let favorites = CompletionOptions {
        favorite_static_members: vec!["java.lang.Math.max".to_string()],
        ..CompletionOptions::default()
    };

    let imported = run_with(&world, &request, favorites.clone());
    let max = named(&imported, "max");
    assert_eq!(max.len(), 1);
    assert_eq!(max[0].completion, "max()");
    assert_eq!(max[0].required_import.as_deref(), Some("static java.lang.Math.max"));

    let qualified = run_with(
        &world,
        &request,
        CompletionOptions {
            suggest_static_import: false,
            ..favorites
        },
    );
    let max = named(&qualified, "max");
    assert_eq!(max.len(), 1);
    assert_eq!(max[0].completion, "Math.max()");
    assert_eq!(max[0].required_import.as_deref(), Some("java.lang.Math"));

    assert!(named(&run(&world, &request), "max").is_empty());
}
