use sable_core::PackageName;

use crate::{is_subclass, ClassId, Modifiers, TypeEnv};

/// Where a reference is written: the current package and innermost class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityContext {
    pub package: PackageName,
    pub class: Option<ClassId>,
}

fn outermost(env: &dyn TypeEnv, mut id: ClassId) -> ClassId {
    // Bounded walk; nesting deeper than this is a malformed graph.
    for _ in 0..64 {
        match env.class(id).and_then(|def| def.enclosing) {
            Some(outer) => id = outer,
            None => break,
        }
    }
    id
}

fn enclosing_classes(env: &dyn TypeEnv, start: Option<ClassId>) -> Vec<ClassId> {
    let mut out = Vec::new();
    let mut current = start;
    while let Some(id) = current {
        if out.contains(&id) {
            break;
        }
        out.push(id);
        current = env.class(id).and_then(|def| def.enclosing);
    }
    out
}

/// Language visibility of a member declared in `declaring` with `modifiers`.
pub fn is_member_visible(
    env: &dyn TypeEnv,
    declaring: ClassId,
    modifiers: Modifiers,
    ctx: &VisibilityContext,
) -> bool {
    if modifiers.contains(Modifiers::PUBLIC) {
        return true;
    }
    let Some(def) = env.class(declaring) else {
        return false;
    };
    // Interface members without an access modifier are public.
    if def.is_interface() && !modifiers.is_private() {
        return true;
    }
    if modifiers.is_private() {
        return ctx
            .class
            .is_some_and(|from| outermost(env, from) == outermost(env, declaring));
    }
    if def.package == ctx.package {
        return true;
    }
    if modifiers.contains(Modifiers::PROTECTED) {
        return enclosing_classes(env, ctx.class)
            .into_iter()
            .any(|from| is_subclass(env, from, declaring));
    }
    false
}

/// Language visibility of a type, including every class it is nested in.
pub fn is_class_visible(env: &dyn TypeEnv, id: ClassId, ctx: &VisibilityContext) -> bool {
    let Some(def) = env.class(id) else {
        return false;
    };
    match def.enclosing {
        None => def.modifiers.contains(Modifiers::PUBLIC) || def.package == ctx.package,
        Some(outer) => {
            is_member_visible(env, outer, def.modifiers, ctx) && is_class_visible(env, outer, ctx)
        }
    }
}
