//! Types, constructors and packages found by searching the whole classpath.
//!
//! The index result is drained completely before anything is classified: an
//! on-demand import only becomes ambiguous once a second type with the same
//! simple name shows up, and that can happen anywhere in the stream.
//!
//! Each surviving type fact is placed into one of four buckets, in precedence
//! order: named by a single-type import, declared in the current package,
//! matched by an on-demand import, or none of these. Only the last bucket is
//! written fully qualified up front.

use std::collections::{HashMap, HashSet};

use sable_core::{Cancelled, Name, PackageName, QualifiedName};
use sable_index::{AcceptedConstructor, AcceptedType, PackageQuery, TypeQuery};
use sable_resolve::{ImportMap, OnDemandSource};
use sable_types::{
    is_member_visible, ClassId, ClassKind, ConstructorRef, Modifiers, Type, TypeEnv,
};

use crate::candidate::{AllocationStyle, Candidate, CandidateKind, Origin, Symbol};
use crate::context::CompletionSite;
use crate::session::CompletionSession;

/// Whether the request searches the classpath at all. An empty token only
/// searches below an explicit package qualifier.
pub(crate) fn searches_classpath(session: &CompletionSession<'_>) -> bool {
    let site = &session.request.site;
    site.wants_types()
        && (!session.request.token.is_empty()
            || matches!(site, CompletionSite::QualifiedName { .. }))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Placement {
    /// Written exactly as the user typed its qualifier.
    BelowQualifier,
    /// Visible through a single-type import of the type or of an enclosing type.
    Imported { qualifier: Option<String> },
    SamePackage { qualifier: Option<String> },
    OnDemand,
    /// Matched an on-demand container but the import cannot reach it.
    OnDemandUnreachable,
    Qualified,
}

impl Placement {
    fn precedence(&self) -> u8 {
        match self {
            Placement::BelowQualifier => 0,
            Placement::Imported { .. } => 1,
            Placement::SamePackage { .. } => 2,
            Placement::OnDemand => 3,
            Placement::OnDemandUnreachable | Placement::Qualified => 4,
        }
    }

    /// Written unqualified; the simple name must be claimed.
    fn is_bare(&self) -> bool {
        matches!(
            self,
            Placement::Imported { qualifier: None }
                | Placement::SamePackage { qualifier: None }
                | Placement::OnDemand
        )
    }
}

struct Found {
    fact: AcceptedType,
    name: QualifiedName,
    candidate: Candidate,
    placement: Placement,
    /// Some on-demand import names the fact's container.
    on_demand: bool,
}

pub(crate) fn search_types(session: &mut CompletionSession<'_>) -> Result<Vec<Candidate>, Cancelled> {
    let site = session.request.site.clone();
    let mut query = TypeQuery::new(session.request.token.clone(), session.match_options());
    if let CompletionSite::QualifiedName { qualifier } = &site {
        query = query.in_container(qualifier.clone());
    }

    let index = session.index;
    let mut facts: Vec<AcceptedType> = Vec::new();
    let mut seen: HashSet<QualifiedName> = HashSet::new();
    for fact in index.find_types(&query) {
        session.tick()?;
        if seen.insert(fact.fully_qualified_name()) {
            facts.push(fact);
        }
    }
    let mut constructors: HashMap<QualifiedName, Vec<AcceptedConstructor>> = HashMap::new();
    if site == CompletionSite::Allocation {
        for ctor in index.find_constructors(&query) {
            session.tick()?;
            let declaring = ctor.declaring.fully_qualified_name();
            if seen.insert(declaring.clone()) {
                facts.push(ctor.declaring.clone());
            }
            constructors.entry(declaring).or_default().push(ctor);
        }
    }
    tracing::trace!(
        target: "sable.completion",
        facts = facts.len(),
        constructors = constructors.len(),
        "drained type search"
    );

    let (package, imports) = match session.graph.compilation_unit(session.request.scope) {
        Some((package, imports)) => (package.clone(), imports.clone()),
        None => (PackageName::default(), ImportMap::default()),
    };

    let mut found: Vec<Found> = Vec::new();
    for fact in facts {
        session.tick()?;
        let name = fact.fully_qualified_name();
        if session.known.contains(&name) {
            session.counters.duplicate += 1;
            continue;
        }
        if session.is_forbidden_name(&name) {
            continue;
        }
        let Some(name_match) = session.match_name(fact.simple_name.as_str()) else {
            continue;
        };
        if session.options.check_visibility && !is_fact_visible(&fact, &package) {
            session.counters.invisible += 1;
            continue;
        }
        if !session.admit_access(fact.access, fact.modifiers) {
            continue;
        }
        session.known.insert(name.clone());

        let placement = if matches!(site, CompletionSite::QualifiedName { .. }) {
            Placement::BelowQualifier
        } else {
            place(&fact, &name, &package, &imports)
        };
        let mut candidate = Candidate::new(
            CandidateKind::Type,
            Symbol::IndexedType(fact.clone()),
            fact.simple_name.clone(),
            name_match,
        );
        candidate.ty = match session.env.lookup_class(&name.to_dotted()) {
            Some(id) => Type::class(id, vec![]),
            None => Type::Named(name.to_dotted()),
        };
        candidate.modifiers = fact.modifiers;
        candidate.access = fact.access;
        let on_demand = matches!(
            placement,
            Placement::OnDemand | Placement::OnDemandUnreachable
        );
        found.push(Found {
            fact,
            name,
            candidate,
            placement,
            on_demand,
        });
    }

    qualify_on_demand_collisions(&mut found);
    claim_simple_names(session, &mut found);

    let mut out = Vec::with_capacity(found.len());
    for entry in found {
        let candidate = finish(entry.candidate, &entry.placement, &entry.name);
        if site == CompletionSite::Allocation {
            let ctors = constructors.remove(&entry.name).unwrap_or_default();
            out.extend(indexed_allocations(session, &entry.fact, candidate, &ctors, &package));
            session.known.mark_constructors_known(&entry.name);
        } else {
            out.push(candidate);
        }
    }
    Ok(out)
}

fn is_fact_visible(fact: &AcceptedType, package: &PackageName) -> bool {
    let same_package = fact.package == *package;
    if fact.modifiers.contains(Modifiers::PUBLIC) {
        return true;
    }
    if fact.modifiers.is_private() {
        return false;
    }
    same_package
}

fn place(
    fact: &AcceptedType,
    name: &QualifiedName,
    package: &PackageName,
    imports: &ImportMap,
) -> Placement {
    if let Some(import) = imports.single_type(fact.simple_name.as_str()) {
        return if import.path == *name {
            Placement::Imported { qualifier: None }
        } else {
            Placement::Qualified
        };
    }
    // `import java.util.Map;` makes `Map.Entry` writable.
    for (depth, outer) in fact.enclosing_types.iter().enumerate() {
        let outer_name = fact
            .package
            .join(&QualifiedName::new(fact.enclosing_types[..=depth].to_vec()));
        if imports
            .single_type(outer.as_str())
            .is_some_and(|import| import.path == outer_name)
        {
            return Placement::Imported {
                qualifier: Some(join(&fact.enclosing_types[depth..])),
            };
        }
    }
    if fact.package == *package {
        return Placement::SamePackage {
            qualifier: fact
                .is_member_type()
                .then(|| join(&fact.enclosing_types)),
        };
    }
    let container = fact.container();
    let mut placement = Placement::Qualified;
    for (path, source) in imports.on_demand() {
        if path != container {
            continue;
        }
        if source == OnDemandSource::Static && !fact.is_static() {
            placement = Placement::OnDemandUnreachable;
            continue;
        }
        return Placement::OnDemand;
    }
    placement
}

fn join(names: &[Name]) -> String {
    names
        .iter()
        .map(Name::as_str)
        .collect::<Vec<_>>()
        .join(".")
}

/// Claim bare simple names in precedence order; losers are qualified.
fn claim_simple_names(session: &mut CompletionSession<'_>, found: &mut [Found]) {
    let mut order: Vec<usize> = (0..found.len()).collect();
    order.sort_by_key(|i| found[*i].placement.precedence());
    for i in order {
        let entry = &mut found[i];
        if !entry.placement.is_bare() {
            continue;
        }
        if !session.known.claim(&entry.fact.simple_name, &entry.name) {
            entry.placement = Placement::Qualified;
        }
    }
}

/// Two distinct types reachable on demand under one simple name make every
/// on-demand type with that name ambiguous, including ones found earlier.
/// Runs before any simple name is claimed.
fn qualify_on_demand_collisions(found: &mut [Found]) {
    let mut by_name: HashMap<Name, HashSet<QualifiedName>> = HashMap::new();
    for entry in found.iter() {
        if entry.on_demand {
            by_name
                .entry(entry.fact.simple_name.clone())
                .or_default()
                .insert(entry.name.clone());
        }
    }
    for entry in found.iter_mut() {
        let ambiguous = by_name
            .get(&entry.fact.simple_name)
            .is_some_and(|names| names.len() > 1);
        if ambiguous && entry.placement == Placement::OnDemand {
            tracing::trace!(
                target: "sable.completion",
                name = %entry.name,
                "on-demand import is ambiguous"
            );
            entry.placement = Placement::Qualified;
        }
    }
}

fn finish(mut candidate: Candidate, placement: &Placement, name: &QualifiedName) -> Candidate {
    match placement {
        Placement::BelowQualifier => candidate.origin = Origin::Search,
        Placement::Imported { qualifier } => {
            candidate.origin = Origin::ExplicitImport;
            candidate.qualifier = qualifier.clone();
        }
        Placement::SamePackage { qualifier } => {
            candidate.origin = Origin::Search;
            candidate.qualifier = qualifier.clone();
        }
        Placement::OnDemand => candidate.origin = Origin::OnDemandImport,
        Placement::OnDemandUnreachable | Placement::Qualified => {
            candidate.origin = Origin::Search;
            candidate.must_qualify = true;
            candidate.qualifier = name
                .parent()
                .filter(|parent| !parent.is_empty())
                .map(|parent| parent.to_dotted());
            // Types in the unnamed package cannot be imported.
            if candidate.qualifier.is_some() {
                candidate.required_import = Some(name.to_dotted());
            }
        }
    }
    candidate
}

enum AllocationPlan {
    /// Not instantiable and not useful as a type at an allocation.
    Drop,
    KeepType,
    Constructors(AllocationStyle),
}

fn allocation_plan(kind: ClassKind, is_abstract: bool) -> AllocationPlan {
    match kind {
        ClassKind::Annotation => AllocationPlan::Drop,
        ClassKind::Enum => AllocationPlan::KeepType,
        ClassKind::Interface => AllocationPlan::Constructors(AllocationStyle::Anonymous),
        ClassKind::Class | ClassKind::Record if is_abstract => {
            AllocationPlan::Constructors(AllocationStyle::Anonymous)
        }
        ClassKind::Class | ClassKind::Record => AllocationPlan::Constructors(AllocationStyle::Direct),
    }
}

fn constructor_from(type_candidate: &Candidate, symbol: Symbol, style: AllocationStyle) -> Candidate {
    let mut ctor = type_candidate.clone();
    ctor.kind = CandidateKind::Constructor;
    ctor.symbol = symbol;
    ctor.allocation = Some(style);
    ctor
}

fn indexed_allocations(
    session: &mut CompletionSession<'_>,
    fact: &AcceptedType,
    type_candidate: Candidate,
    ctors: &[AcceptedConstructor],
    package: &PackageName,
) -> Vec<Candidate> {
    let style = match allocation_plan(fact.kind, fact.is_abstract()) {
        AllocationPlan::Drop => return Vec::new(),
        AllocationPlan::KeepType => return vec![type_candidate],
        AllocationPlan::Constructors(style) => style,
    };
    if fact.kind == ClassKind::Interface {
        return vec![constructor_from(
            &type_candidate,
            Symbol::IndexedType(fact.clone()),
            style,
        )];
    }

    let mut out = Vec::new();
    for ctor in ctors {
        let visible = ctor.modifiers.contains(Modifiers::PUBLIC)
            || (fact.package == *package && !ctor.modifiers.is_private())
            || (style == AllocationStyle::Anonymous && ctor.modifiers.contains(Modifiers::PROTECTED));
        if session.options.check_visibility && !visible {
            session.counters.invisible += 1;
            continue;
        }
        if !session.admit_access(ctor.access, ctor.modifiers) {
            continue;
        }
        let mut candidate =
            constructor_from(&type_candidate, Symbol::IndexedConstructor(ctor.clone()), style);
        candidate.modifiers = ctor.modifiers;
        candidate.access = ctor.access.max(fact.access);
        out.push(candidate);
    }
    if out.is_empty() {
        if ctors.is_empty() && style == AllocationStyle::Anonymous {
            out.push(constructor_from(
                &type_candidate,
                Symbol::IndexedType(fact.clone()),
                style,
            ));
        } else {
            out.push(type_candidate);
        }
    }
    out
}

/// Replace scope-visible type candidates at an allocation with their constructors.
pub(crate) fn expand_allocations(
    session: &mut CompletionSession<'_>,
    candidates: Vec<Candidate>,
) -> Result<Vec<Candidate>, Cancelled> {
    let env = session.env;
    let mut out = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        session.tick()?;
        let Symbol::Type(id) = &candidate.symbol else {
            out.push(candidate);
            continue;
        };
        let id = *id;
        if let Some(name) = candidate.type_name(env) {
            session.known.mark_constructors_known(&name);
        }
        out.extend(declared_allocations(session, env, id, candidate));
    }
    Ok(out)
}

fn declared_allocations(
    session: &mut CompletionSession<'_>,
    env: &dyn TypeEnv,
    id: ClassId,
    type_candidate: Candidate,
) -> Vec<Candidate> {
    let Some(def) = env.class(id) else {
        return vec![type_candidate];
    };
    let style = match allocation_plan(def.kind, def.is_abstract()) {
        AllocationPlan::Drop => return Vec::new(),
        AllocationPlan::KeepType => return vec![type_candidate],
        AllocationPlan::Constructors(style) => style,
    };
    if def.kind == ClassKind::Interface || def.constructors.is_empty() {
        // Interfaces and classes relying on the implicit default constructor.
        return vec![constructor_from(&type_candidate, Symbol::Type(id), style)];
    }

    let mut out = Vec::new();
    for (index, ctor) in def.constructors.iter().enumerate() {
        let visible = is_member_visible(env, id, ctor.modifiers, &session.visibility)
            || (style == AllocationStyle::Anonymous && ctor.modifiers.contains(Modifiers::PROTECTED));
        if session.options.check_visibility && !visible {
            session.counters.invisible += 1;
            continue;
        }
        if !session.admit_access(ctor.access.max(def.access), ctor.modifiers) {
            continue;
        }
        let mut candidate = constructor_from(
            &type_candidate,
            Symbol::Constructor(ConstructorRef {
                class: id,
                index: index as u32,
            }),
            style,
        );
        candidate.modifiers = ctor.modifiers;
        candidate.access = ctor.access.max(def.access);
        out.push(candidate);
    }
    if out.is_empty() {
        out.push(type_candidate);
    }
    out
}

pub(crate) fn search_packages(session: &mut CompletionSession<'_>) -> Result<Vec<Candidate>, Cancelled> {
    let parent = match &session.request.site {
        CompletionSite::QualifiedName { qualifier } => Some(qualifier.clone()),
        _ if session.request.token.is_empty() => return Ok(Vec::new()),
        _ => None,
    };
    let depth = parent.as_ref().map_or(0, QualifiedName::len);
    let query = PackageQuery {
        pattern: session.request.token.clone(),
        parent,
        options: session.match_options(),
    };

    let index = session.index;
    let mut seen: HashSet<PackageName> = HashSet::new();
    let mut out = Vec::new();
    for package in index.find_packages(&query) {
        session.tick()?;
        let Some(segment) = package.segments().get(depth).cloned() else {
            continue;
        };
        if !seen.insert(package.clone()) {
            continue;
        }
        let Some(name_match) = session.match_name(segment.as_str()) else {
            continue;
        };
        let mut candidate = Candidate::new(
            CandidateKind::Package,
            Symbol::Package(package),
            segment,
            name_match,
        );
        candidate.origin = Origin::Search;
        out.push(candidate);
    }
    Ok(out)
}
