use pretty_assertions::assert_eq;
use sable_completion::{AllocationStyle, CompletionRequest, CompletionSite, ProposalKind};
use sable_index::{AcceptedConstructor, AcceptedType};
use sable_test_utils::World;
use sable_types::{ClassDef, ClassKind, ConstructorDef, Modifiers, PrimitiveType, Type};

use super::{completions, declare_main, main_class, named, run};

fn collections_world() -> (World, usize) {
    let mut world = World::new("app", &["java.util.*"]);
    world.index_only(AcceptedType::new("java.util.List", ClassKind::Interface));

    let mut abstract_list = AcceptedType::new("java.util.AbstractList", ClassKind::Class);
    abstract_list.modifiers = Modifiers::PUBLIC | Modifiers::ABSTRACT;
    world.index_only(abstract_list.clone());
    world.index_only_constructor(
        AcceptedConstructor::new(abstract_list, &[]).with_modifiers(Modifiers::PROTECTED),
    );

    let array_list = AcceptedType::new("java.util.ArrayList", ClassKind::Class);
    world.index_only(array_list.clone());
    world.index_only_constructor(AcceptedConstructor::new(array_list.clone(), &[]));
    world.index_only_constructor(AcceptedConstructor::new(array_list, &["int"]));

    let main = declare_main(&mut world, main_class());
    (world, main.run)
}

#[test]
fn concrete_class_offers_each_constructor() {
    let (world, body) = collections_world();
    let proposals = run(
        &world,
        &CompletionRequest::new("ArrayL", body, CompletionSite::Allocation),
    );
    assert_eq!(completions(&proposals), vec!["ArrayList()", "ArrayList()"]);
    assert!(proposals.iter().all(|p| p.kind == ProposalKind::Constructor));
    let mut keys: Vec<&str> = proposals.iter().map(|p| p.key.as_str()).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["<init>()", "<init>(int)"]);
}

#[test]
fn interfaces_and_abstract_classes_allocate_anonymously() {
    let (world, body) = collections_world();
    let proposals = run(
        &world,
        &CompletionRequest::new("List", body, CompletionSite::Allocation),
    );

    let list = named(&proposals, "List");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].kind, ProposalKind::AnonymousClass);
    assert_eq!(list[0].allocation, Some(AllocationStyle::Anonymous));

    let abstract_list = named(&proposals, "AbstractList");
    assert_eq!(abstract_list.len(), 1);
    assert_eq!(abstract_list[0].kind, ProposalKind::AnonymousClass);
    assert_eq!(abstract_list[0].modifiers, Modifiers::PROTECTED);

    assert_eq!(named(&proposals, "ArrayList").len(), 2);
}

#[test]
fn declared_class_offers_only_visible_constructors() {
    let int = Type::Primitive(PrimitiveType::Int);
    let mut world = World::new("app", &[]);
    world.declare(
        ClassDef::new("app.Point", ClassKind::Class)
            .with_constructor(ConstructorDef::new(vec![int.clone(), int], Modifiers::PUBLIC))
            .with_constructor(ConstructorDef::new(vec![], Modifiers::PRIVATE)),
    );
    let main = declare_main(&mut world, main_class());

    let proposals = run(
        &world,
        &CompletionRequest::new("Po", main.run, CompletionSite::Allocation),
    );
    assert_eq!(completions(&proposals), vec!["Point()"]);
    assert_eq!(proposals[0].kind, ProposalKind::Constructor);
    assert_eq!(proposals[0].signature.as_deref(), Some("Point(int, int)"));
    assert_eq!(proposals[0].key, "<init>(int,int)");
}

#[test]
fn enums_stay_type_references_and_annotations_are_dropped() {
    let mut world = World::new("app", &[]);
    world.declare(ClassDef::new("app.Color", ClassKind::Enum).with_enum_constants(&["RED"]));
    world.declare(ClassDef::new("app.Marker", ClassKind::Annotation));
    let main = declare_main(&mut world, main_class());

    let colors = run(
        &world,
        &CompletionRequest::new("Colo", main.run, CompletionSite::Allocation),
    );
    assert_eq!(completions(&colors), vec!["Color"]);
    assert_eq!(colors[0].kind, ProposalKind::Type);

    let markers = run(
        &world,
        &CompletionRequest::new("Marker", main.run, CompletionSite::Allocation),
    );
    assert!(markers.is_empty());
}
