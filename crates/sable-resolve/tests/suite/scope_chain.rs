use pretty_assertions::assert_eq;
use sable_core::QualifiedName;
use sable_resolve::{ImportMap, Resolver, ScopeGraph, ScopeKind, TypeLookup};
use sable_types::{ClassDef, ClassKind, Modifiers, TypeStore};

#[test]
fn static_boundaries() {
    let mut store = TypeStore::with_minimal_jdk();
    let outer = store.add_class(ClassDef::new("p.Outer", ClassKind::Class));
    let inner = store.add_member_class(outer, ClassDef::new("Inner", ClassKind::Class));
    let nested = store.add_member_class(
        outer,
        ClassDef::new("Nested", ClassKind::Class).with_modifiers(Modifiers::STATIC),
    );
    let kind = store.add_member_class(outer, ClassDef::new("Kind", ClassKind::Enum));

    assert!(!ScopeKind::Class { class: outer }.is_static_boundary(&store));
    assert!(!ScopeKind::Class { class: inner }.is_static_boundary(&store));
    assert!(ScopeKind::Class { class: nested }.is_static_boundary(&store));
    assert!(ScopeKind::Class { class: kind }.is_static_boundary(&store));
    assert!(ScopeKind::Initializer { is_static: true }.is_static_boundary(&store));
    assert!(!ScopeKind::Block.is_static_boundary(&store));
}

#[test]
fn member_types_resolve_through_enclosing_and_inherited_classes() {
    let mut store = TypeStore::with_minimal_jdk();
    let base = store.add_class(ClassDef::new("p.Base", ClassKind::Class));
    let entry = store.add_member_class(base, ClassDef::new("Entry", ClassKind::Class));
    let derived = store.add_class(
        ClassDef::new("p.Derived", ClassKind::Class)
            .with_super(sable_types::Type::class(base, vec![])),
    );

    let mut graph = ScopeGraph::new();
    let unit = graph.add_compilation_unit(QualifiedName::from_dotted("p"), ImportMap::default());
    graph.declare_type(unit, derived);
    let class_scope = graph.alloc_scope(Some(unit), ScopeKind::Class { class: derived });
    let body = graph.alloc_scope(Some(class_scope), ScopeKind::Block);

    let resolver = Resolver::new(&graph, &store);
    assert_eq!(resolver.resolve_type_name(body, "Entry"), TypeLookup::Found(entry));
    assert_eq!(resolver.resolve_type_name(body, "Base"), TypeLookup::Found(base));
    assert_eq!(
        resolver.resolve_qualified_type(body, &QualifiedName::from_dotted("Base.Entry")),
        Some(entry)
    );
    assert_eq!(graph.declared_types(body), &[derived]);
    assert_eq!(graph.visibility_context(body).class, Some(derived));
}
