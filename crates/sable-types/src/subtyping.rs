//! Erasure-based subtyping.
//!
//! Completion only ranks candidates, so generic arguments are ignored: every
//! query erases both sides first.

use std::collections::{HashSet, VecDeque};

use crate::{ClassId, PrimitiveType, Type, TypeEnv};

pub fn erasure(env: &dyn TypeEnv, ty: &Type) -> Type {
    match ty {
        Type::Class(ct) => Type::class(ct.def, vec![]),
        Type::Array(elem) => Type::array(erasure(env, elem)),
        Type::TypeVar(tv) => match &tv.bound {
            Some(bound) => erasure(env, bound),
            None => Type::class(env.well_known().object, vec![]),
        },
        other => other.clone(),
    }
}

/// Direct supertypes of `id`: the superclass first, then interfaces in declaration order.
fn direct_supertypes(env: &dyn TypeEnv, id: ClassId) -> Vec<ClassId> {
    let Some(def) = env.class(id) else {
        return Vec::new();
    };
    def.super_class
        .iter()
        .chain(def.interfaces.iter())
        .filter_map(Type::class_id)
        .collect()
}

/// All proper supertypes of `id` in breadth-first order, each listed once.
pub fn supertypes(env: &dyn TypeEnv, id: ClassId) -> Vec<ClassId> {
    let mut seen = HashSet::new();
    seen.insert(id);
    let mut queue: VecDeque<ClassId> = direct_supertypes(env, id).into();
    let mut out = Vec::new();
    while let Some(next) = queue.pop_front() {
        if !seen.insert(next) {
            continue;
        }
        out.push(next);
        queue.extend(direct_supertypes(env, next));
    }
    out
}

/// `id` followed by its superclasses, root last. Stops on malformed cycles.
pub fn superclass_chain(env: &dyn TypeEnv, id: ClassId) -> Vec<ClassId> {
    let mut out = Vec::new();
    let mut current = Some(id);
    while let Some(class) = current {
        if out.contains(&class) {
            break;
        }
        out.push(class);
        current = env
            .class(class)
            .and_then(|def| def.super_class.as_ref())
            .and_then(Type::class_id);
    }
    out
}

/// Reflexive, transitive subclass/subinterface relation.
pub fn is_subclass(env: &dyn TypeEnv, sub: ClassId, sup: ClassId) -> bool {
    if sub == sup {
        return true;
    }
    if sup == env.well_known().object {
        return env.class(sub).is_some();
    }
    supertypes(env, sub).contains(&sup)
}

pub fn is_subtype(env: &dyn TypeEnv, sub: &Type, sup: &Type) -> bool {
    let sub = erasure(env, sub);
    let sup = erasure(env, sup);
    if sub == sup {
        return !sub.is_erroneous();
    }
    let wk = env.well_known();
    match (&sub, &sup) {
        (Type::Primitive(a), Type::Primitive(b)) => a.widens_to(*b),
        (Type::Null, sup) => sup.is_reference() && !sup.is_erroneous(),
        (Type::Class(a), Type::Class(b)) => is_subclass(env, a.def, b.def),
        (Type::Array(_), Type::Class(b)) => {
            b.def == wk.object || b.def == wk.cloneable || b.def == wk.serializable
        }
        (Type::Array(a), Type::Array(b)) => match (a.as_ref(), b.as_ref()) {
            (Type::Primitive(x), Type::Primitive(y)) => x == y,
            (a, b) if a.is_reference() && b.is_reference() => is_subtype(env, a, b),
            _ => false,
        },
        _ => false,
    }
}

pub fn unboxed(env: &dyn TypeEnv, ty: &Type) -> Option<PrimitiveType> {
    match ty {
        Type::Class(ct) => env.well_known().unboxed(ct.def),
        _ => None,
    }
}

pub fn boxed(env: &dyn TypeEnv, primitive: PrimitiveType) -> Type {
    Type::class(env.well_known().boxed(primitive), vec![])
}

/// Assignment compatibility that needs a boxing or unboxing conversion.
///
/// Returns `false` when plain subtyping already holds.
pub fn is_assignable_with_boxing(env: &dyn TypeEnv, from: &Type, to: &Type) -> bool {
    if is_subtype(env, from, to) {
        return false;
    }
    match (from, to) {
        (Type::Primitive(p), to) if to.is_reference() => is_subtype(env, &boxed(env, *p), to),
        (from, Type::Primitive(q)) => unboxed(env, from).is_some_and(|p| p.widens_to(*q)),
        _ => false,
    }
}
