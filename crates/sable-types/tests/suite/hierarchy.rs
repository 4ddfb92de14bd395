use pretty_assertions::assert_eq;
use sable_types::{
    is_subclass, is_subtype, supertypes, ClassDef, ClassKind, MethodDef, Modifiers, Type,
    TypeEnv, TypeStore,
};

/// `interface Top`, `interface Left extends Top`, `interface Right extends Top`,
/// `class Bottom implements Left, Right`.
fn diamond() -> (TypeStore, [sable_types::ClassId; 4]) {
    let mut store = TypeStore::with_minimal_jdk();
    let top = store.add_class(
        ClassDef::new("d.Top", ClassKind::Interface)
            .with_method(MethodDef::new("run", vec![], Type::Void)),
    );
    let left = store.add_class(
        ClassDef::new("d.Left", ClassKind::Interface).with_interface(Type::class(top, vec![])),
    );
    let right = store.add_class(
        ClassDef::new("d.Right", ClassKind::Interface).with_interface(Type::class(top, vec![])),
    );
    let bottom = store.add_class(
        ClassDef::new("d.Bottom", ClassKind::Class)
            .with_interface(Type::class(left, vec![]))
            .with_interface(Type::class(right, vec![])),
    );
    (store, [top, left, right, bottom])
}

#[test]
fn supertypes_visit_a_diamond_once() {
    let (store, [top, left, right, bottom]) = diamond();
    let object = store.well_known().object;
    assert_eq!(supertypes(&store, bottom), vec![object, left, right, top]);
}

#[test]
fn subclass_relation_is_reflexive_and_transitive() {
    let (store, [top, left, _, bottom]) = diamond();
    assert!(is_subclass(&store, bottom, bottom));
    assert!(is_subclass(&store, bottom, top));
    assert!(is_subclass(&store, left, store.well_known().object));
    assert!(!is_subclass(&store, top, bottom));
}

#[test]
fn interface_methods_are_implicitly_public_abstract() {
    let (store, [top, ..]) = diamond();
    let run = &store.class(top).expect("Top").methods[0];
    assert!(run.modifiers.contains(Modifiers::PUBLIC | Modifiers::ABSTRACT));
}

#[test]
fn generic_arguments_are_erased() {
    let (store, [top, _, _, bottom]) = diamond();
    let string = Type::class(store.well_known().string, vec![]);
    assert!(is_subtype(
        &store,
        &Type::class(bottom, vec![string]),
        &Type::class(top, vec![])
    ));
    let bounded = Type::type_var("T", Some(Type::class(bottom, vec![])));
    assert!(is_subtype(&store, &bounded, &Type::class(top, vec![])));
}
