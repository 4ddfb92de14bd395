//! Relevance as a mixed-radix number.
//!
//! Each tier contributes `value * weight`, and every weight exceeds the largest
//! total all lower tiers can reach. A candidate that wins a higher tier
//! therefore outranks any candidate that only wins lower ones.

use sable_fuzzy::MatchKind;
use sable_resolve::ScopeGraph;
use sable_types::{
    erased_signature, erasure, is_assignable_with_boxing, is_subclass, is_subtype, Accessibility,
    ClassKind, Modifiers, Type, TypeEnv,
};

use crate::candidate::{Candidate, CandidateKind, Symbol};
use crate::context::{CompletionRequest, CompletionSite, TypeFilter, TypeKindHint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Candidate is fully resolved; guessed receivers score zero.
    Resolved,
    /// Not one of the request's uninteresting variables.
    Interesting,
    NameMatch,
    ExpectedType,
    /// Enum constant of an expected enum type.
    EnumConstant,
    Accessibility,
    /// Qualified or unqualified, whichever the position prefers.
    Qualification,
    /// Type kind matches the hint (`throws` wants exceptions, `@` wants annotations).
    Kind,
    /// Declared by the class named at a `Type.` access rather than inherited.
    NonInherited,
    /// Final constants at a `case` label.
    Constant,
    /// Same erased signature as the method the `super.` access is written in.
    Override,
}

impl Tier {
    pub const ALL: [Tier; TIER_COUNT] = [
        Tier::Resolved,
        Tier::Interesting,
        Tier::NameMatch,
        Tier::ExpectedType,
        Tier::EnumConstant,
        Tier::Accessibility,
        Tier::Qualification,
        Tier::Kind,
        Tier::NonInherited,
        Tier::Constant,
        Tier::Override,
    ];

    pub const fn max_value(self) -> u32 {
        TIER_MAXIMA[self as usize]
    }

    pub const fn weight(self) -> u32 {
        TIER_WEIGHTS[self as usize]
    }
}

pub const TIER_COUNT: usize = 11;

/// Largest value each tier can take, lowest tier first.
pub const TIER_MAXIMA: [u32; TIER_COUNT] = [
    1,
    1,
    MatchKind::Exact as u32 * 2 + 1,
    4,
    1,
    2,
    1,
    1,
    1,
    1,
    1,
];

pub const TIER_WEIGHTS: [u32; TIER_COUNT] = weights();

/// Highest relevance any candidate can score.
pub const MAX_RELEVANCE: u32 = max_relevance();

const fn weights() -> [u32; TIER_COUNT] {
    let mut out = [0; TIER_COUNT];
    let mut weight = 1;
    let mut i = 0;
    while i < TIER_COUNT {
        out[i] = weight;
        weight *= TIER_MAXIMA[i] + 1;
        i += 1;
    }
    out
}

const fn max_relevance() -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < TIER_COUNT {
        total += TIER_MAXIMA[i] * TIER_WEIGHTS[i];
        i += 1;
    }
    total
}

/// Per-tier values of one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelevanceFactors {
    values: [u32; TIER_COUNT],
}

impl RelevanceFactors {
    pub fn get(&self, tier: Tier) -> u32 {
        self.values[tier as usize]
    }

    fn set(&mut self, tier: Tier, value: u32) {
        self.values[tier as usize] = value.min(tier.max_value());
    }

    pub fn total(&self) -> u32 {
        Tier::ALL
            .iter()
            .map(|tier| self.get(*tier) * tier.weight())
            .sum()
    }
}

/// Relevance of `candidate`. Depends on nothing but its arguments.
pub fn score(
    candidate: &Candidate,
    request: &CompletionRequest,
    env: &dyn TypeEnv,
    graph: &ScopeGraph,
) -> u32 {
    factors(candidate, request, env, graph).total()
}

pub fn factors(
    candidate: &Candidate,
    request: &CompletionRequest,
    env: &dyn TypeEnv,
    graph: &ScopeGraph,
) -> RelevanceFactors {
    let mut out = RelevanceFactors::default();
    // Record-generated members score like the `Object` methods they implement.
    let (declaring, modifiers) = match candidate.scored_as.and_then(|m| env.method(m).map(|d| (m, d))) {
        Some((method, def)) => (Some(method.class), def.modifiers),
        None => (candidate.declaring, candidate.modifiers),
    };

    out.set(Tier::Resolved, u32::from(candidate.resolved && !candidate.missing));
    let interesting = match candidate.kind {
        CandidateKind::Local | CandidateKind::Field => {
            !request.is_uninteresting(candidate.name.as_str())
        }
        _ => true,
    };
    out.set(Tier::Interesting, u32::from(interesting));
    out.set(
        Tier::NameMatch,
        candidate.name_match.kind.tier() * 2 + u32::from(candidate.name_match.case_exact),
    );
    out.set(Tier::ExpectedType, expected_type(candidate, request, env));
    out.set(Tier::EnumConstant, u32::from(is_expected_enum_constant(candidate, modifiers, request, env)));
    out.set(
        Tier::Accessibility,
        match candidate.access {
            Accessibility::Accessible => 2,
            Accessibility::Discouraged => 1,
            Accessibility::NonAccessible => 0,
        },
    );
    let prefers_qualified = request.inside_qualified_reference;
    out.set(
        Tier::Qualification,
        u32::from(candidate.must_qualify == prefers_qualified),
    );
    out.set(
        Tier::Kind,
        u32::from(
            request
                .type_kind_hint
                .is_some_and(|hint| matches_kind_hint(candidate, hint, env)),
        ),
    );

    match &request.site {
        CompletionSite::StaticMemberAccess { class } => {
            out.set(
                Tier::NonInherited,
                u32::from(candidate.is_member() && declaring == Some(*class)),
            );
        }
        CompletionSite::CaseLabel { .. } => {
            let constant = candidate.is_final() || modifiers.contains(Modifiers::ENUM);
            out.set(
                Tier::Constant,
                u32::from(matches!(candidate.kind, CandidateKind::Field | CandidateKind::Local) && constant),
            );
        }
        CompletionSite::SuperAccess => {
            out.set(Tier::Override, u32::from(overrides_enclosing(candidate, request, env, graph)));
        }
        _ => {}
    }
    out
}

/// 4 exact, 3 compatible, 2 compatible through boxing, 1 unrelated or no
/// expectation, 0 for `void` where a value is expected and for guessed members.
fn expected_type(candidate: &Candidate, request: &CompletionRequest, env: &dyn TypeEnv) -> u32 {
    if candidate.missing {
        return 0;
    }
    if request.expected.is_empty() {
        return 1;
    }
    let Some(ty) = candidate_type(candidate, env) else {
        return 1;
    };
    if ty.is_void() {
        return 0;
    }
    let filter = request.expected.filter;
    request
        .expected
        .types
        .iter()
        .map(|expected| relate(&ty, expected, filter, env))
        .max()
        .unwrap_or(1)
}

fn relate(ty: &Type, expected: &Type, filter: TypeFilter, env: &dyn TypeEnv) -> u32 {
    if same_erasure(ty, expected, env) {
        return 4;
    }
    let (sub, sup) = match filter {
        TypeFilter::Subtype => (ty, expected),
        TypeFilter::Supertype => (expected, ty),
        TypeFilter::Exact => return 1,
    };
    if is_subtype(env, sub, sup) {
        3
    } else if is_assignable_with_boxing(env, sub, sup) {
        2
    } else {
        1
    }
}

fn same_erasure(a: &Type, b: &Type, env: &dyn TypeEnv) -> bool {
    match (a, b) {
        (Type::Named(x), Type::Named(y)) => x == y,
        _ => erasure(env, a) == erasure(env, b),
    }
}

/// Type a candidate evaluates to: the value type for variables and methods,
/// the denoted type for types and constructors.
fn candidate_type(candidate: &Candidate, env: &dyn TypeEnv) -> Option<Type> {
    match &candidate.symbol {
        Symbol::Type(id) => Some(Type::class(*id, vec![])),
        Symbol::Constructor(ctor) => Some(Type::class(ctor.class, vec![])),
        Symbol::IndexedType(_) | Symbol::IndexedConstructor(_) => {
            let name = candidate.type_name(env)?;
            Some(match env.lookup_class(&name.to_dotted()) {
                Some(id) => Type::class(id, vec![]),
                None => Type::Named(name.to_dotted()),
            })
        }
        Symbol::Package(_) | Symbol::Label | Symbol::Keyword => None,
        Symbol::Local { .. }
        | Symbol::Field(_)
        | Symbol::Method(_)
        | Symbol::ArrayLength
        | Symbol::ArrayClone(_) => match &candidate.ty {
            Type::Unknown => None,
            ty => Some(ty.clone()),
        },
    }
}

fn is_expected_enum_constant(
    candidate: &Candidate,
    modifiers: Modifiers,
    request: &CompletionRequest,
    env: &dyn TypeEnv,
) -> bool {
    candidate.kind == CandidateKind::Field
        && modifiers.contains(Modifiers::ENUM)
        && request
            .expected
            .types
            .iter()
            .any(|expected| same_erasure(&candidate.ty, expected, env))
}

fn matches_kind_hint(candidate: &Candidate, hint: TypeKindHint, env: &dyn TypeEnv) -> bool {
    if !matches!(candidate.kind, CandidateKind::Type | CandidateKind::Constructor) {
        return false;
    }
    let (kind, class) = match &candidate.symbol {
        Symbol::Type(id) => (env.class(*id).map(|def| def.kind), Some(*id)),
        Symbol::Constructor(ctor) => (env.class(ctor.class).map(|def| def.kind), Some(ctor.class)),
        Symbol::IndexedType(fact) => (Some(fact.kind), None),
        Symbol::IndexedConstructor(fact) => (Some(fact.declaring.kind), None),
        _ => (None, None),
    };
    match hint {
        TypeKindHint::Class => matches!(kind, Some(ClassKind::Class | ClassKind::Record)),
        TypeKindHint::Interface => kind == Some(ClassKind::Interface),
        TypeKindHint::Annotation => kind == Some(ClassKind::Annotation),
        TypeKindHint::Enum => kind == Some(ClassKind::Enum),
        TypeKindHint::Exception => match class {
            Some(id) => is_subclass(env, id, env.well_known().throwable),
            None => {
                let name = candidate.name.as_str();
                kind == Some(ClassKind::Class) && (name.ends_with("Exception") || name.ends_with("Error"))
            }
        },
    }
}

fn overrides_enclosing(
    candidate: &Candidate,
    request: &CompletionRequest,
    env: &dyn TypeEnv,
    graph: &ScopeGraph,
) -> bool {
    let Symbol::Method(method) = &candidate.symbol else {
        return false;
    };
    let (Some(current), Some(candidate_def)) = (
        graph.enclosing_method(request.scope).and_then(|m| env.method(m)),
        env.method(*method),
    ) else {
        return false;
    };
    erased_signature(env, current) == erased_signature(env, candidate_def)
}
