use pretty_assertions::assert_eq;
use sable_types::{is_subtype, PrimitiveType, Type, TypeEnv, TypeStore};

#[test]
fn default_store_supports_well_known_subtyping_queries() {
    let env = TypeStore::default();

    let object = env.lookup_class("Object").expect("java.lang.Object");
    let cloneable = env.lookup_class("Cloneable").expect("java.lang.Cloneable");
    let serializable = env
        .lookup_class("java.io.Serializable")
        .expect("java.io.Serializable");

    // `int[] <: Object | Cloneable | Serializable`
    let int_array = Type::array(Type::Primitive(PrimitiveType::Int));
    assert!(is_subtype(&env, &int_array, &Type::class(object, vec![])));
    assert!(is_subtype(&env, &int_array, &Type::class(cloneable, vec![])));
    assert!(is_subtype(&env, &int_array, &Type::class(serializable, vec![])));

    let long_array = Type::array(Type::Primitive(PrimitiveType::Long));
    assert!(!is_subtype(&env, &int_array, &long_array));
}

#[test]
fn every_box_unboxes_to_its_primitive() {
    let env = TypeStore::with_minimal_jdk();
    for primitive in PrimitiveType::ALL {
        let id = env.lookup_class(primitive.box_name()).expect("box class");
        assert_eq!(env.well_known().boxed(primitive), id);
        assert_eq!(env.well_known().unboxed(id), Some(primitive));
    }
}

#[test]
fn string_is_a_char_sequence_and_comparable() {
    let env = TypeStore::with_minimal_jdk();
    let string = Type::class(env.well_known().string, vec![]);
    let char_sequence = env.lookup_class("CharSequence").expect("CharSequence");
    let comparable = env.lookup_class("Comparable").expect("Comparable");
    assert!(is_subtype(&env, &string, &Type::class(char_sequence, vec![])));
    assert!(is_subtype(
        &env,
        &string,
        &Type::class(comparable, vec![string.clone()])
    ));
    assert!(is_subtype(&env, &Type::Null, &string));
    assert!(!is_subtype(&env, &Type::Null, &Type::Primitive(PrimitiveType::Int)));
}
