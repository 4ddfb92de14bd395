//! Shadowing and duplicate resolution over the raw scope-walk output.
//!
//! Candidates arrive in discovery order, innermost scope first. For each pair
//! of members with the same name and clashing signatures:
//!
//! 1. Found through the same root and declared by related classes: the more
//!    specific declaration wins and takes the other's place in the list.
//! 2. Found through the same root, unrelated declarers: the first one wins.
//! 3. Found through different roots: the later one is hidden and is kept only
//!    with an explicit qualifier (`Outer.this.x`, `Math.max`).
//!
//! Fields hidden by a local of the same name are qualified the same way, and
//! the members a record generates are scored as the `Object` methods they
//! implement.

use sable_core::Cancelled;
use sable_types::{
    is_subclass, is_subsignature, ClassId, ClassKind, MethodRef, Modifiers, TypeEnv,
};

use crate::candidate::{Candidate, CandidateKind, Origin, Symbol};
use crate::context::CompletionSite;
use crate::session::CompletionSession;

const RECORD_GENERATED: &[&str] = &["equals", "hashCode", "toString"];

pub(crate) fn resolve(
    session: &mut CompletionSession<'_>,
    candidates: Vec<Candidate>,
) -> Result<Vec<Candidate>, Cancelled> {
    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        session.tick()?;
        match candidate.kind {
            CandidateKind::Type => {
                if let Some(candidate) = claim_type(session, candidate) {
                    kept.push(candidate);
                }
            }
            CandidateKind::Field | CandidateKind::Method => {
                resolve_member(session, &mut kept, candidate);
            }
            _ => kept.push(candidate),
        }
    }

    qualify_fields_hidden_by_locals(session, &mut kept);
    attribute_record_members(session.env, &mut kept);
    if session.options.force_implicit_qualification
        && session.request.site == CompletionSite::Name
    {
        force_qualification(session, &mut kept);
    }
    Ok(kept)
}

/// Register a scope-visible type. The first type to take a simple name keeps
/// it; later ones with the same simple name are written fully qualified.
fn claim_type(session: &mut CompletionSession<'_>, mut candidate: Candidate) -> Option<Candidate> {
    let Some(name) = candidate.type_name(session.env) else {
        return Some(candidate);
    };
    if !session.known.insert(name.clone()) {
        session.counters.duplicate += 1;
        return None;
    }
    if !session.known.claim(&candidate.name, &name) {
        candidate.must_qualify = true;
        candidate.qualifier = name
            .parent()
            .filter(|parent| !parent.is_empty())
            .map(|parent| parent.to_dotted());
    }
    Some(candidate)
}

fn resolve_member(session: &mut CompletionSession<'_>, kept: &mut Vec<Candidate>, mut candidate: Candidate) {
    let env = session.env;
    let mut hidden = false;
    for slot in 0..kept.len() {
        let existing = &kept[slot];
        if existing.kind != candidate.kind
            || existing.name != candidate.name
            || !signatures_clash(env, existing, &candidate)
        {
            continue;
        }

        if existing.declaring == candidate.declaring && existing.symbol == candidate.symbol {
            session.counters.duplicate += 1;
            return;
        }

        if existing.chain_root() == candidate.chain_root() {
            session.counters.duplicate += 1;
            if overrides(env, &candidate, existing) {
                // The descendant takes the slot and keeps its qualification.
                if existing.must_qualify && candidate.qualifier.is_none() {
                    candidate.must_qualify = true;
                    candidate.qualifier = receiver_qualifier(session, &candidate);
                }
                kept[slot] = candidate;
            }
            return;
        }

        hidden = true;
    }

    // Reachable only past a declaration found first through another root.
    if hidden && candidate.qualifier.is_none() {
        candidate.must_qualify = true;
        candidate.qualifier = receiver_qualifier(session, &candidate);
    }
    kept.push(candidate);
}

/// `true` if `later` is declared by a proper subtype of `earlier`'s declarer.
fn overrides(env: &dyn TypeEnv, later: &Candidate, earlier: &Candidate) -> bool {
    match (later.declaring, earlier.declaring) {
        (Some(sub), Some(sup)) if sub != sup => {
            is_subclass(env, sub, sup) && !is_subclass(env, sup, sub)
        }
        _ => false,
    }
}

fn signatures_clash(env: &dyn TypeEnv, a: &Candidate, b: &Candidate) -> bool {
    match (&a.symbol, &b.symbol) {
        (Symbol::Method(x), Symbol::Method(y)) => match (env.method(*x), env.method(*y)) {
            (Some(x), Some(y)) => is_subsignature(env, x, y) || is_subsignature(env, y, x),
            _ => false,
        },
        // Fields hide by name alone.
        _ if a.kind == CandidateKind::Field => true,
        _ => a.erased_signature(env) == b.erased_signature(env),
    }
}

/// Qualifier that reaches a member through the class its search started at:
/// `this` for the innermost class, `Outer.this` for enclosing instances and the
/// type name for statics.
fn receiver_qualifier(session: &CompletionSession<'_>, candidate: &Candidate) -> Option<String> {
    let env = session.env;
    let root = candidate.chain_root().or(candidate.declaring)?;
    let def = env.class(root)?;
    if matches!(candidate.origin, Origin::StaticImport | Origin::Favorite) {
        return Some(def.name.to_dotted());
    }
    let type_name = type_qualified_name(env, root);
    if candidate.is_static() {
        Some(type_name)
    } else if session.visibility.class == Some(root) {
        Some("this".to_string())
    } else {
        Some(format!("{type_name}.this"))
    }
}

/// `Outer.Inner` for member types, the simple name for top-level ones.
fn type_qualified_name(env: &dyn TypeEnv, id: ClassId) -> String {
    match env.class(id) {
        Some(def) => def.name.segments()[def.package.len().min(def.name.len())..]
            .iter()
            .map(|segment| segment.as_str())
            .collect::<Vec<_>>()
            .join("."),
        None => String::new(),
    }
}

fn qualify_fields_hidden_by_locals(session: &CompletionSession<'_>, kept: &mut [Candidate]) {
    let locals: Vec<_> = kept
        .iter()
        .filter(|c| c.kind == CandidateKind::Local)
        .map(|c| c.name.clone())
        .collect();
    if locals.is_empty() {
        return;
    }
    for candidate in kept.iter_mut() {
        if candidate.kind != CandidateKind::Field
            || candidate.must_qualify
            || !locals.contains(&candidate.name)
        {
            continue;
        }
        candidate.must_qualify = true;
        candidate.qualifier = receiver_qualifier(session, candidate);
    }
}

fn attribute_record_members(env: &dyn TypeEnv, kept: &mut [Candidate]) {
    let object = env.well_known().object;
    let Some(object_def) = env.class(object) else {
        return;
    };
    for candidate in kept.iter_mut() {
        let Symbol::Method(method) = &candidate.symbol else {
            continue;
        };
        if !candidate.modifiers.contains(Modifiers::MANDATED)
            || !RECORD_GENERATED.contains(&candidate.name.as_str())
            || env.class(method.class).map(|def| def.kind) != Some(ClassKind::Record)
        {
            continue;
        }
        let Some(def) = env.method(*method) else {
            continue;
        };
        candidate.scored_as = object_def
            .methods
            .iter()
            .position(|m| m.name == def.name && is_subsignature(env, m, def))
            .map(|index| MethodRef {
                class: object,
                index: index as u32,
            });
    }
}

fn force_qualification(session: &CompletionSession<'_>, kept: &mut [Candidate]) {
    for candidate in kept.iter_mut() {
        if !candidate.is_member()
            || candidate.qualifier.is_some()
            || !matches!(
                candidate.origin,
                Origin::Declared | Origin::Inherited | Origin::Interface
            )
        {
            continue;
        }
        candidate.qualifier = receiver_qualifier(session, candidate);
    }
}
