use pretty_assertions::assert_eq;
use sable_core::QualifiedName;
use sable_fuzzy::MatchOptions;
use sable_index::{
    AcceptedType, EmptyIndex, IndexSnapshot, MemoryIndex, PackageQuery, SearchIndex, TypeQuery,
};
use sable_types::ClassKind;

fn index() -> MemoryIndex {
    let mut entry = AcceptedType::new("java.util.Entry", ClassKind::Interface);
    entry.enclosing_types = vec!["Map".into()];
    MemoryIndex::build(IndexSnapshot {
        types: vec![
            AcceptedType::new("java.util.HashMap", ClassKind::Class),
            AcceptedType::new("java.util.Map", ClassKind::Interface),
            entry,
            AcceptedType::new("java.util.concurrent.ConcurrentHashMap", ClassKind::Class),
            AcceptedType::new("org.example.NullPointerHelper", ClassKind::Class),
        ],
        constructors: Vec::new(),
        packages: Vec::new(),
    })
}

fn find(index: &MemoryIndex, query: &TypeQuery) -> Vec<String> {
    index
        .find_types(query)
        .map(|t| t.fully_qualified_name().to_dotted())
        .collect()
}

#[test]
fn camel_case_pattern_finds_humps() {
    let query = TypeQuery::new("NPH", MatchOptions::default());
    assert_eq!(find(&index(), &query), vec!["org.example.NullPointerHelper"]);

    let query = TypeQuery::new("NPH", MatchOptions::PREFIX_ONLY);
    assert!(find(&index(), &query).is_empty());
}

#[test]
fn member_types_are_searchable_in_their_container() {
    let query = TypeQuery::new("En", MatchOptions::PREFIX_ONLY)
        .in_container(QualifiedName::from_dotted("java.util.Map"));
    assert_eq!(find(&index(), &query), vec!["java.util.Map.Entry"]);

    let query = TypeQuery::new("En", MatchOptions::PREFIX_ONLY)
        .in_container(QualifiedName::from_dotted("java.util"));
    assert!(find(&index(), &query).is_empty());
}

#[test]
fn results_are_lazy_and_in_index_order() {
    let index = index();
    let query = TypeQuery::new("Map", MatchOptions::default());
    let mut results = index.find_types(&query);
    let first = results.next().expect("one result");
    assert_eq!(first.fully_qualified_name().to_dotted(), "java.util.HashMap");
    let rest: Vec<_> = results.map(|t| t.simple_name.to_string()).collect();
    assert_eq!(rest, vec!["Map", "ConcurrentHashMap"]);
}

#[test]
fn nested_packages_are_reported_one_level_down() {
    let query = PackageQuery {
        pattern: "c".into(),
        parent: Some(QualifiedName::from_dotted("java.util")),
        options: MatchOptions::PREFIX_ONLY,
    };
    let found: Vec<String> = index().find_packages(&query).map(|p| p.to_dotted()).collect();
    assert_eq!(found, vec!["java.util.concurrent"]);
}

#[test]
fn empty_index_finds_nothing() {
    let query = TypeQuery::new("", MatchOptions::ALL);
    assert_eq!(EmptyIndex.find_types(&query).count(), 0);
    assert_eq!(EmptyIndex.find_constructors(&query).count(), 0);
}
