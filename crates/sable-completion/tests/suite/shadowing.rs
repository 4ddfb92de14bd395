use pretty_assertions::assert_eq;
use sable_completion::{CompletionRequest, CompletionSite, ProposalKind};
use sable_config::CompletionOptions;
use sable_test_utils::World;
use sable_types::{ClassDef, ClassKind, FieldDef, MethodDef, Modifiers, PrimitiveType, Type};

use super::{completions, declare_main, main_class, named, of_kind, run, run_with};

fn int() -> Type {
    Type::Primitive(PrimitiveType::Int)
}

#[test]
fn field_hidden_by_parameter_is_qualified_with_this() {
    let mut world = World::new("app", &[]);
    let main = declare_main(
        &mut world,
        main_class().with_field(FieldDef::new("count", int(), Modifiers::PRIVATE)),
    );
    world.param(main.run, "count", int());

    let proposals = run(&world, &CompletionRequest::new("cou", main.run, CompletionSite::Name));
    assert_eq!(completions(&proposals), vec!["count", "this.count"]);
    assert_eq!(proposals[0].kind, ProposalKind::Local);
    assert_eq!(proposals[1].qualification.as_deref(), Some("this"));
}

#[test]
fn overriding_method_is_proposed_once() {
    let mut world = World::new("app", &[]);
    let base = world.add(
        ClassDef::new("app.Base", ClassKind::Class)
            .with_method(MethodDef::new("draw", vec![], Type::Void)),
    );
    let shape = world.add(
        ClassDef::new("app.Shape", ClassKind::Class)
            .with_super(Type::class(base, vec![]))
            .with_method(MethodDef::new("draw", vec![], Type::Void)),
    );
    let main = declare_main(&mut world, main_class());

    let site = CompletionSite::MemberAccess {
        receiver: Type::class(shape, vec![]),
        receiver_name: None,
    };
    let proposals = run(&world, &CompletionRequest::new("dr", main.run, site));
    assert_eq!(completions(&proposals), vec!["draw()"]);
    assert_eq!(proposals[0].declaring.as_deref(), Some("app.Shape"));
}

#[test]
fn interface_reached_twice_is_walked_once() {
    let mut world = World::new("app", &[]);
    let string = world.ty("java.lang.String");
    let named_iface = world.add(
        ClassDef::new("app.Named", ClassKind::Interface)
            .with_method(MethodDef::new("name", vec![], string)),
    );
    let named_ty = Type::class(named_iface, vec![]);
    let animal = world.add(
        ClassDef::new("app.Animal", ClassKind::Class)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .with_interface(named_ty.clone()),
    );
    let dog = world.add(
        ClassDef::new("app.Dog", ClassKind::Class)
            .with_super(Type::class(animal, vec![]))
            .with_interface(named_ty),
    );
    let main = declare_main(&mut world, main_class());

    let site = CompletionSite::MemberAccess {
        receiver: Type::class(dog, vec![]),
        receiver_name: None,
    };
    let proposals = run(&world, &CompletionRequest::new("nam", main.run, site));
    assert_eq!(of_kind(&proposals, ProposalKind::Method), vec!["name()"]);
}

#[test]
fn outer_instance_field_hidden_by_inner_field() {
    let mut world = World::new("app", &[]);
    let outer = world.declare(
        ClassDef::new("app.Outer", ClassKind::Class)
            .with_field(FieldDef::new("size", int(), Modifiers::PRIVATE)),
    );
    let inner = world.add_member(
        outer,
        ClassDef::new("Inner", ClassKind::Class)
            .with_field(FieldDef::new("size", int(), Modifiers::PRIVATE))
            .with_method(MethodDef::new("run", vec![], Type::Void)),
    );
    let outer_scope = world.class_scope(world.unit, outer);
    let inner_scope = world.class_scope(outer_scope, inner);
    let body = world.method_scope(inner_scope, inner, "run");

    let proposals = run(&world, &CompletionRequest::new("si", body, CompletionSite::Name));
    assert_eq!(
        of_kind(&proposals, ProposalKind::Field),
        vec!["size", "Outer.this.size"]
    );
    let hidden = named(&proposals, "size")
        .into_iter()
        .find(|p| p.is_qualified())
        .map(|p| p.declaring.clone());
    assert_eq!(hidden, Some(Some("app.Outer".to_string())));
}

#[test]
fn outer_override_hides_its_superclass_method_behind_the_qualifier() {
    let mut world = World::new("app", &[]);
    let base = world.add(
        ClassDef::new("app.Base", ClassKind::Class)
            .with_method(MethodDef::new("draw", vec![], Type::Void)),
    );
    let outer = world.declare(
        ClassDef::new("app.Outer", ClassKind::Class)
            .with_super(Type::class(base, vec![]))
            .with_method(MethodDef::new("draw", vec![], Type::Void)),
    );
    let inner = world.add_member(
        outer,
        ClassDef::new("Inner", ClassKind::Class)
            .with_method(MethodDef::new("draw", vec![], Type::Void))
            .with_method(MethodDef::new("run", vec![], Type::Void)),
    );
    let outer_scope = world.class_scope(world.unit, outer);
    let inner_scope = world.class_scope(outer_scope, inner);
    let body = world.method_scope(inner_scope, inner, "run");

    let proposals = run(&world, &CompletionRequest::new("dr", body, CompletionSite::Name));
    assert_eq!(
        of_kind(&proposals, ProposalKind::Method),
        vec!["draw()", "Outer.this.draw()"]
    );
    let declaring: Vec<_> = named(&proposals, "draw")
        .into_iter()
        .map(|p| p.declaring.as_deref())
        .collect();
    assert_eq!(declaring, vec![Some("app.Outer.Inner"), Some("app.Outer")]);
}

#[test]
fn outer_static_field_is_qualified_with_the_type() {
    let mut world = World::new("app", &[]);
    let outer = world.declare(
        ClassDef::new("app.Outer", ClassKind::Class).with_field(FieldDef::new(
            "LIMIT",
            int(),
            Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL,
        )),
    );
    let inner = world.add_member(
        outer,
        ClassDef::new("Inner", ClassKind::Class)
            .with_field(FieldDef::new("LIMIT", int(), Modifiers::PRIVATE))
            .with_method(MethodDef::new("run", vec![], Type::Void)),
    );
    let outer_scope = world.class_scope(world.unit, outer);
    let inner_scope = world.class_scope(outer_scope, inner);
    let body = world.method_scope(inner_scope, inner, "run");

    let proposals = run(&world, &CompletionRequest::new("LIM", body, CompletionSite::Name));
    assert_eq!(
        of_kind(&proposals, ProposalKind::Field),
        vec!["LIMIT", "Outer.LIMIT"]
    );
}

#[test]
fn class_method_hides_statically_imported_one() {
    let mut world = World::new("app", &["static java.lang.Math.max"]);
    let main = declare_main(
        &mut world,
        main_class().with_method(
            MethodDef::new("max", vec![int(), int()], int()).with_modifiers(Modifiers::PRIVATE),
        ),
    );

    let proposals = run(&world, &CompletionRequest::new("max", main.run, CompletionSite::Name));
    assert_eq!(
        of_kind(&proposals, ProposalKind::Method),
        vec!["max()", "java.lang.Math.max()"]
    );
}

#[test]
fn record_members_are_proposed_once() {
    let mut world = World::new("app", &[]);
    let point = world.add(
        ClassDef::new("app.Point", ClassKind::Record)
            .with_record_component("x", int())
            .with_record_component("y", int()),
    );
    let main = declare_main(&mut world, main_class());

    let site = CompletionSite::MemberAccess {
        receiver: Type::class(point, vec![]),
        receiver_name: None,
    };
    let proposals = run(&world, &CompletionRequest::new("toS", main.run, site.clone()));
    assert_eq!(of_kind(&proposals, ProposalKind::Method), vec!["toString()"]);
    assert_eq!(proposals[0].declaring.as_deref(), Some("app.Point"));

    let accessors = run(&world, &CompletionRequest::new("", main.run, site));
    assert_eq!(named(&accessors, "x").len(), 1);
    assert_eq!(named(&accessors, "equals").len(), 1);
    assert_eq!(named(&accessors, "hashCode").len(), 1);
}

#[test]
fn forced_qualification_prefixes_members() {
    let mut world = World::new("app", &[]);
    let main = declare_main(
        &mut world,
        main_class()
            .with_field(FieldDef::new("width", int(), Modifiers::PRIVATE))
            .with_field(FieldDef::new(
                "WIDTH_MAX",
                int(),
                Modifiers::PRIVATE | Modifiers::STATIC | Modifiers::FINAL,
            )),
    );
    let options = CompletionOptions {
        force_implicit_qualification: true,
        ..CompletionOptions::default()
    };

    let proposals = run_with(
        &world,
        &CompletionRequest::new("wid", main.run, CompletionSite::Name),
        options,
    );
    let mut fields = of_kind(&proposals, ProposalKind::Field);
    fields.sort_unstable();
    assert_eq!(fields, vec!["Main.WIDTH_MAX", "this.width"]);
}
