use pretty_assertions::assert_eq;
use sable_fuzzy::MatchOptions;
use sable_index::{MemoryIndex, SearchIndex, TypeQuery};
use sable_types::{
    ClassDef, ClassKind, ConstructorDef, Modifiers, PrimitiveType, Type, TypeEnv, TypeStore,
};

fn store() -> TypeStore {
    let mut store = TypeStore::with_minimal_jdk();
    let string = store.well_known().string;
    let outer = store.add_class(ClassDef::new("com.acme.Registry", ClassKind::Class).with_constructor(
        ConstructorDef::new(
            vec![Type::class(string, vec![]), Type::Primitive(PrimitiveType::Int)],
            Modifiers::PUBLIC,
        ),
    ));
    store.add_member_class(outer, ClassDef::new("Entry", ClassKind::Interface));
    store
}

#[test]
fn constructors_carry_formatted_parameter_types() {
    let index = MemoryIndex::from_type_store(&store());
    let query = TypeQuery::new("Registry", MatchOptions::PREFIX_ONLY);
    let ctors: Vec<_> = index.find_constructors(&query).collect();
    assert_eq!(ctors.len(), 1);
    assert_eq!(ctors[0].params, vec!["String".to_string(), "int".to_string()]);
}

#[test]
fn member_types_record_their_enclosing_types() {
    let index = MemoryIndex::from_type_store(&store());
    let query = TypeQuery::new("Entry", MatchOptions::PREFIX_ONLY);
    let found: Vec<_> = index.find_types(&query).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].type_qualified_name(), "Registry.Entry");
    assert_eq!(found[0].top_level_name().to_dotted(), "com.acme.Registry");
    assert!(found[0].is_static());
}

#[test]
fn jdk_types_are_indexed() {
    let index = MemoryIndex::from_type_store(&store());
    let query = TypeQuery::new("Str", MatchOptions::PREFIX_ONLY);
    let names: Vec<String> = index
        .find_types(&query)
        .map(|t| t.fully_qualified_name().to_dotted())
        .collect();
    assert_eq!(names, vec!["java.lang.String"]);
}
