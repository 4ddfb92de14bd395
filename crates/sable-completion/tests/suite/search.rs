use pretty_assertions::assert_eq;
use sable_completion::{CompletionRequest, CompletionSite, ProposalKind};
use sable_core::{Name, PackageName};
use sable_index::AcceptedType;
use sable_test_utils::World;
use sable_types::{Accessibility, ClassKind, Modifiers};

use super::{completions, declare_main, main_class, named, of_kind, run};

fn widget_world(imports: &[&str], first: &str, second: &str) -> (World, usize) {
    let mut world = World::new("app", imports);
    world.index_only(AcceptedType::new(first, ClassKind::Class));
    world.index_only(AcceptedType::new(second, ClassKind::Class));
    let main = declare_main(&mut world, main_class());
    (world, main.run)
}

#[test]
fn colliding_on_demand_imports_qualify_both_types() {
    for (first, second) in [("a.Widget", "b.Widget"), ("b.Widget", "a.Widget")] {
        let (world, body) = widget_world(&["a.*", "b.*"], first, second);
        let proposals = run(
            &world,
            &CompletionRequest::new("Wid", body, CompletionSite::TypeReference),
        );
        let mut texts = completions(&proposals);
        texts.sort_unstable();
        assert_eq!(texts, vec!["a.Widget", "b.Widget"]);
        assert!(proposals.iter().all(|p| p.required_import.is_some()));
    }
}

#[test]
fn non_static_member_type_behind_static_import_still_collides() {
    let mut world = World::new("app", &["a.*", "static b.Holder.*"]);
    world.index_only(AcceptedType::new("a.Widget", ClassKind::Class));
    let mut inner = AcceptedType::new("b.Widget", ClassKind::Class);
    inner.enclosing_types = vec![Name::from("Holder")];
    world.index_only(inner);
    let main = declare_main(&mut world, main_class());

    let proposals = run(
        &world,
        &CompletionRequest::new("Wid", main.run, CompletionSite::TypeReference),
    );
    let mut texts = completions(&proposals);
    texts.sort_unstable();
    assert_eq!(texts, vec!["a.Widget", "b.Holder.Widget"]);
    assert!(proposals.iter().all(|p| p.is_qualified()));
    assert!(proposals.iter().all(|p| p.required_import.is_some()));
}

#[test]
fn single_type_import_beats_on_demand_import() {
    for (first, second) in [("a.Widget", "b.Widget"), ("b.Widget", "a.Widget")] {
        let (world, body) = widget_world(&["a.Widget", "b.*"], first, second);
        let proposals = run(
            &world,
            &CompletionRequest::new("Wid", body, CompletionSite::TypeReference),
        );
        assert_eq!(completions(&proposals), vec!["Widget", "b.Widget"]);
        assert_eq!(proposals[0].declaring.as_deref(), Some("a.Widget"));
        assert_eq!(proposals[0].required_import, None);
        assert_eq!(proposals[1].required_import.as_deref(), Some("b.Widget"));
    }
}

#[test]
fn same_package_type_wins_the_simple_name() {
    for (first, second) in [("app.Helper", "other.Helper"), ("other.Helper", "app.Helper")] {
        let (world, body) = widget_world(&[], first, second);
        let proposals = run(
            &world,
            &CompletionRequest::new("Help", body, CompletionSite::TypeReference),
        );
        assert_eq!(completions(&proposals), vec!["Helper", "other.Helper"]);
        assert_eq!(proposals[0].declaring.as_deref(), Some("app.Helper"));
    }
}

#[test]
fn on_demand_import_does_not_reach_subpackages() {
    let (world, body) = widget_world(&["a.*"], "a.Widget", "a.sub.Gadget");
    let proposals = run(
        &world,
        &CompletionRequest::new("Gad", body, CompletionSite::TypeReference),
    );
    assert_eq!(completions(&proposals), vec!["a.sub.Gadget"]);
}

#[test]
fn member_type_of_imported_outer_keeps_outer_qualifier() {
    let mut world = World::new("app", &["java.util.Map"]);
    world.index_only(AcceptedType::new("java.util.Map", ClassKind::Interface));
    let mut entry = AcceptedType::new("java.util.Entry", ClassKind::Interface);
    entry.enclosing_types = vec![Name::from("Map")];
    entry.modifiers = Modifiers::PUBLIC | Modifiers::STATIC;
    world.index_only(entry);
    let main = declare_main(&mut world, main_class());

    let proposals = run(
        &world,
        &CompletionRequest::new("Entr", main.run, CompletionSite::TypeReference),
    );
    assert_eq!(completions(&proposals), vec!["Map.Entry"]);
    assert_eq!(proposals[0].declaring.as_deref(), Some("java.util.Map.Entry"));
    assert_eq!(proposals[0].required_import, None);
}

#[test]
fn scope_types_are_not_repeated_by_the_search() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());

    let proposals = run(
        &world,
        &CompletionRequest::new("Mai", main.run, CompletionSite::TypeReference),
    );
    assert_eq!(completions(&proposals), vec!["Main"]);
}

#[test]
fn java_lang_types_need_no_import() {
    let mut world = World::new("app", &[]);
    let main = declare_main(&mut world, main_class());

    let proposals = run(
        &world,
        &CompletionRequest::new("Strin", main.run, CompletionSite::TypeReference),
    );
    assert_eq!(completions(&proposals), vec!["String"]);
    assert_eq!(proposals[0].required_import, None);
}

#[test]
fn package_private_types_of_other_packages_are_hidden() {
    let mut world = World::new("app", &[]);
    let mut hidden = AcceptedType::new("other.Secretive", ClassKind::Class);
    hidden.modifiers = Modifiers::NONE;
    world.index_only(hidden);
    let mut local = AcceptedType::new("app.Secret", ClassKind::Class);
    local.modifiers = Modifiers::NONE;
    world.index_only(local);
    let main = declare_main(&mut world, main_class());

    let proposals = run(
        &world,
        &CompletionRequest::new("Secret", main.run, CompletionSite::TypeReference),
    );
    assert_eq!(completions(&proposals), vec!["Secret"]);
}

#[test]
fn forbidden_types_are_filtered_and_discouraged_kept() {
    let mut world = World::new("app", &["lib.*"]);
    let mut forbidden = AcceptedType::new("lib.InternalCodec", ClassKind::Class);
    forbidden.access = Accessibility::NonAccessible;
    world.index_only(forbidden);
    let mut discouraged = AcceptedType::new("lib.InternalPool", ClassKind::Class);
    discouraged.access = Accessibility::Discouraged;
    world.index_only(discouraged);
    let main = declare_main(&mut world, main_class());

    let proposals = run(
        &world,
        &CompletionRequest::new("Internal", main.run, CompletionSite::TypeReference),
    );
    assert_eq!(completions(&proposals), vec!["InternalPool"]);
    assert_eq!(proposals[0].access, Accessibility::Discouraged);
}

#[test]
fn qualified_name_lists_types_and_subpackages() {
    let mut world = World::new("app", &[]);
    world.index_only(AcceptedType::new("com.acme.Widget", ClassKind::Class));
    world.index_only(AcceptedType::new("com.acme.tools.Hammer", ClassKind::Class));
    let main = declare_main(&mut world, main_class());

    let site = CompletionSite::QualifiedName {
        qualifier: PackageName::from_dotted("com.acme"),
    };
    let proposals = run(&world, &CompletionRequest::new("", main.run, site));
    assert_eq!(of_kind(&proposals, ProposalKind::Type), vec!["Widget"]);
    assert_eq!(of_kind(&proposals, ProposalKind::Package), vec!["tools"]);
    assert_eq!(
        named(&proposals, "tools")[0].signature.as_deref(),
        Some("com.acme.tools")
    );
}

#[test]
fn bare_name_proposes_top_level_packages() {
    let mut world = World::new("app", &[]);
    world.index_only(AcceptedType::new("com.acme.Widget", ClassKind::Class));
    let main = declare_main(&mut world, main_class());

    let proposals = run(&world, &CompletionRequest::new("co", main.run, CompletionSite::Name));
    assert_eq!(of_kind(&proposals, ProposalKind::Package), vec!["com"]);
}
