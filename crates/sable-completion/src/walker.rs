//! Candidates reachable from the cursor without a classpath search.
//!
//! Scopes are walked innermost first. At every class boundary the class's own
//! members come first, then its superclass chain, then every superinterface
//! (breadth first, each interface once). The compilation unit contributes
//! declared types, single-type imports, static imports and favorites. Once a
//! static method, static initializer or static nested type has been crossed,
//! only static members of outer classes are collected.

use std::collections::{HashSet, VecDeque};

use sable_config::FavoritePattern;
use sable_core::{Cancelled, Name, QualifiedName};
use sable_fuzzy::MatchKind;
use sable_resolve::{ImportMap, LocalVar, Resolver, ScopeKind};
use sable_types::{
    erasure, format_type, is_class_visible, superclass_chain, supertypes, ClassId, ClassKind,
    FieldRef, MethodRef, Modifiers, PrimitiveType, Type, TypeEnv,
};

use crate::candidate::{Candidate, CandidateKind, Origin, Symbol};
use crate::context::CompletionSite;
use crate::session::CompletionSession;

const EXPRESSION_KEYWORDS: &[&str] = &["false", "new", "null", "true"];
const INSTANCE_KEYWORDS: &[&str] = &["super", "this"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkMode {
    /// Variables, members and types.
    Expression,
    /// Types only.
    Types,
    /// Constant fields and final locals, for `case` labels.
    Constants,
}

impl WalkMode {
    fn wants_variables(self) -> bool {
        !matches!(self, WalkMode::Types)
    }

    fn wants_types(self) -> bool {
        !matches!(self, WalkMode::Constants)
    }
}

/// Why static members only are wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StaticRequirement {
    /// Anything goes.
    None,
    /// A static boundary was crossed; rejected instance members are counted.
    Context,
    /// The construct itself only reaches statics (`Type.`, static imports).
    Construct,
}

#[derive(Debug, Clone)]
struct MemberFilter {
    statics: StaticRequirement,
    fields: bool,
    methods: bool,
    exclude_abstract: bool,
    constants_only: bool,
    only_name: Option<Name>,
    skip_names: &'static [&'static str],
}

impl Default for MemberFilter {
    fn default() -> Self {
        Self {
            statics: StaticRequirement::None,
            fields: true,
            methods: true,
            exclude_abstract: false,
            constants_only: false,
            only_name: None,
            skip_names: &[],
        }
    }
}

impl MemberFilter {
    fn statics(statics: StaticRequirement) -> Self {
        Self {
            statics,
            ..Self::default()
        }
    }

    fn accepts_name(&self, name: &str) -> bool {
        self.only_name.as_ref().map_or(true, |only| only == name)
            && !self.skip_names.contains(&name)
    }
}

pub(crate) struct ScopeWalker<'s, 'a> {
    session: &'s mut CompletionSession<'a>,
    out: Vec<Candidate>,
}

impl<'s, 'a> ScopeWalker<'s, 'a> {
    pub(crate) fn new(session: &'s mut CompletionSession<'a>) -> Self {
        Self {
            session,
            out: Vec::new(),
        }
    }

    /// Raw candidates in discovery order; duplicates are left to the dedup pass.
    pub(crate) fn collect(mut self) -> Result<Vec<Candidate>, Cancelled> {
        let site = self.session.request.site.clone();
        match &site {
            CompletionSite::Name => {
                self.walk_scopes(WalkMode::Expression)?;
                self.keywords();
            }
            CompletionSite::TypeReference | CompletionSite::Allocation => {
                self.walk_scopes(WalkMode::Types)?;
            }
            CompletionSite::MemberAccess {
                receiver,
                receiver_name,
            } => self.member_access(receiver, receiver_name.as_ref())?,
            CompletionSite::StaticMemberAccess { class } => self.static_member_access(*class)?,
            CompletionSite::SuperAccess => self.super_access()?,
            CompletionSite::CaseLabel { switch_type } => self.case_label(switch_type)?,
            CompletionSite::Label => self.labels(),
            CompletionSite::QualifiedName { .. } | CompletionSite::None => {}
        }
        tracing::trace!(
            target: "sable.completion",
            site = site.tag(),
            candidates = self.out.len(),
            "scope walk finished"
        );
        Ok(self.out)
    }

    fn env(&self) -> &'a dyn TypeEnv {
        self.session.env
    }

    fn walk_scopes(&mut self, mode: WalkMode) -> Result<(), Cancelled> {
        let graph = self.session.graph;
        let env = self.env();
        let mut static_only = false;
        let mut seen_locals: HashSet<Name> = HashSet::new();

        for (_, data) in graph.ancestors(self.session.request.scope) {
            if mode.wants_variables() {
                // Later declarations in the same scope shadow earlier ones.
                for local in data.locals().iter().rev() {
                    if seen_locals.insert(local.name.clone()) {
                        self.local(local, mode)?;
                    }
                }
            }

            match data.kind() {
                ScopeKind::Class { class } => {
                    if mode.wants_variables() {
                        let mut filter = MemberFilter::statics(if static_only {
                            StaticRequirement::Context
                        } else {
                            StaticRequirement::None
                        });
                        filter.constants_only = mode == WalkMode::Constants;
                        self.hierarchy_members(*class, *class, Origin::Declared, &filter)?;
                    }
                    if mode.wants_types() {
                        self.member_types(*class, Origin::Declared)?;
                    }
                    if data.kind().is_static_boundary(env) {
                        static_only = true;
                    }
                }
                ScopeKind::CompilationUnit { imports, types, .. } => {
                    if mode.wants_types() {
                        for id in types {
                            self.push_type(*id, Origin::Declared)?;
                        }
                        self.single_type_imports(imports)?;
                    }
                    if mode.wants_variables() {
                        self.static_imports(imports, mode)?;
                        self.favorites(imports, mode)?;
                    }
                }
                ScopeKind::Method { .. } | ScopeKind::Initializer { .. } => {
                    if data.kind().is_static_boundary(env) {
                        static_only = true;
                    }
                }
                ScopeKind::Block | ScopeKind::Lambda | ScopeKind::Guard { .. } => {}
            }
        }
        Ok(())
    }

    fn local(&mut self, local: &LocalVar, mode: WalkMode) -> Result<(), Cancelled> {
        self.session.tick()?;
        if mode == WalkMode::Constants && !local.is_final {
            return Ok(());
        }
        let Some(name_match) = self.session.match_name(local.name.as_str()) else {
            return Ok(());
        };
        let mut candidate = Candidate::new(
            CandidateKind::Local,
            Symbol::Local {
                ty: local.ty.clone(),
                is_final: local.is_final,
            },
            local.name.clone(),
            name_match,
        );
        candidate.ty = local.ty.clone();
        candidate.origin = Origin::LocalScope;
        if local.is_final {
            candidate.modifiers = Modifiers::FINAL;
        }
        self.out.push(candidate);
        Ok(())
    }

    /// Members of `start`, its superclasses and all its superinterfaces.
    ///
    /// `root` is the class the search is attributed to (the enclosing class or
    /// the receiver type); `first_origin` tags members declared on `start`.
    fn hierarchy_members(
        &mut self,
        start: ClassId,
        root: ClassId,
        first_origin: Origin,
        filter: &MemberFilter,
    ) -> Result<(), Cancelled> {
        let env = self.env();
        let chain = superclass_chain(env, start);

        let mut path = vec![root];
        if start != root {
            path.push(start);
        }
        for (depth, class) in chain.iter().enumerate() {
            if depth > 0 {
                path.push(*class);
            }
            let origin = if depth == 0 {
                first_origin
            } else {
                Origin::Inherited
            };
            self.declared_members(*class, &path, origin, depth == 0, filter)?;
        }

        let mut visited: HashSet<ClassId> = HashSet::new();
        let mut worklist: VecDeque<(ClassId, Vec<ClassId>)> = VecDeque::new();
        for (depth, class) in chain.iter().enumerate() {
            let mut through = vec![root];
            through.extend(chain[..=depth].iter().copied().filter(|c| *c != root));
            for iface in direct_interfaces(env, *class) {
                worklist.push_back((iface, through.clone()));
            }
        }
        while let Some((iface, mut through)) = worklist.pop_front() {
            if !visited.insert(iface) {
                continue;
            }
            through.push(iface);
            let origin = if iface == start {
                first_origin
            } else {
                Origin::Interface
            };
            self.declared_members(iface, &through, origin, iface == start, filter)?;
            for next in direct_interfaces(env, iface) {
                if !visited.contains(&next) {
                    worklist.push_back((next, through.clone()));
                }
            }
        }

        // Interfaces expose the public members of the root object type.
        let object = env.well_known().object;
        if !chain.contains(&object) && !visited.contains(&object) {
            let mut through = path.clone();
            through.push(object);
            self.declared_members(object, &through, Origin::Inherited, false, filter)?;
        }
        Ok(())
    }

    fn declared_members(
        &mut self,
        class: ClassId,
        path: &[ClassId],
        origin: Origin,
        is_start: bool,
        filter: &MemberFilter,
    ) -> Result<(), Cancelled> {
        let env = self.env();
        let Some(def) = env.class(class) else {
            return Ok(());
        };
        let is_interface = def.is_interface();

        if filter.fields {
            for (index, field) in def.fields.iter().enumerate() {
                self.session.tick()?;
                if !filter.accepts_name(field.name.as_str()) {
                    continue;
                }
                if !is_start && field.modifiers.is_private() {
                    continue;
                }
                if !self.static_ok(field.modifiers, filter.statics) {
                    continue;
                }
                if filter.constants_only && !(field.is_constant() || field.is_enum_constant()) {
                    continue;
                }
                let Some(name_match) = self.session.match_name(field.name.as_str()) else {
                    continue;
                };
                if !self
                    .session
                    .admit_member(class, field.modifiers, field.access)
                {
                    continue;
                }
                let mut candidate = Candidate::new(
                    CandidateKind::Field,
                    Symbol::Field(FieldRef {
                        class,
                        index: index as u32,
                    }),
                    field.name.clone(),
                    name_match,
                );
                candidate.declaring = Some(class);
                candidate.ty = field.ty.clone();
                candidate.modifiers = field.modifiers;
                candidate.access = field.access.max(def.access);
                candidate.origin = origin;
                candidate.chain = path.to_vec();
                self.out.push(candidate);
            }
        }

        if filter.methods {
            for (index, method) in def.methods.iter().enumerate() {
                self.session.tick()?;
                if !filter.accepts_name(method.name.as_str()) {
                    continue;
                }
                if !is_start && method.modifiers.is_private() {
                    continue;
                }
                // Static interface methods are only reachable through the interface itself.
                if is_interface && !is_start && method.is_static() {
                    continue;
                }
                if filter.exclude_abstract && method.is_abstract() {
                    continue;
                }
                if filter.constants_only || !self.static_ok(method.modifiers, filter.statics) {
                    continue;
                }
                let Some(name_match) = self.session.match_name(method.name.as_str()) else {
                    continue;
                };
                if !self
                    .session
                    .admit_member(class, method.modifiers, method.access)
                {
                    continue;
                }
                let mut candidate = Candidate::new(
                    CandidateKind::Method,
                    Symbol::Method(MethodRef {
                        class,
                        index: index as u32,
                    }),
                    method.name.clone(),
                    name_match,
                );
                candidate.declaring = Some(class);
                candidate.ty = method.return_type.clone();
                candidate.modifiers = method.modifiers;
                candidate.access = method.access.max(def.access);
                candidate.origin = origin;
                candidate.chain = path.to_vec();
                self.out.push(candidate);
            }
        }
        Ok(())
    }

    fn static_ok(&mut self, modifiers: Modifiers, statics: StaticRequirement) -> bool {
        match statics {
            StaticRequirement::None => true,
            _ if modifiers.is_static() => true,
            StaticRequirement::Context => {
                self.session.counters.static_context += 1;
                false
            }
            StaticRequirement::Construct => false,
        }
    }

    /// Member types declared on `class` or inherited from its supertypes.
    fn member_types(&mut self, class: ClassId, origin: Origin) -> Result<(), Cancelled> {
        let env = self.env();
        let owners: Vec<ClassId> = std::iter::once(class)
            .chain(supertypes(env, class))
            .collect();
        for (depth, owner) in owners.into_iter().enumerate() {
            let Some(def) = env.class(owner) else {
                continue;
            };
            for member in &def.member_types {
                if depth > 0
                    && env
                        .class(*member)
                        .is_some_and(|m| m.modifiers.is_private())
                {
                    continue;
                }
                let origin = if depth == 0 { origin } else { Origin::Inherited };
                self.push_type(*member, origin)?;
            }
        }
        Ok(())
    }

    fn push_type(&mut self, id: ClassId, origin: Origin) -> Result<(), Cancelled> {
        self.session.tick()?;
        if self.session.is_forbidden(id) {
            return Ok(());
        }
        let env = self.env();
        let Some(def) = env.class(id) else {
            return Ok(());
        };
        let Some(name_match) = self.session.match_name(def.simple_name()) else {
            return Ok(());
        };
        if self.session.options.check_visibility
            && !is_class_visible(env, id, &self.session.visibility)
        {
            self.session.counters.invisible += 1;
            return Ok(());
        }
        if !self.session.admit_access(def.access, def.modifiers) {
            return Ok(());
        }
        let mut candidate = Candidate::new(
            CandidateKind::Type,
            Symbol::Type(id),
            Name::from(def.simple_name()),
            name_match,
        );
        candidate.declaring = Some(id);
        candidate.ty = Type::class(id, vec![]);
        candidate.modifiers = def.modifiers;
        candidate.access = def.access;
        candidate.origin = origin;
        self.out.push(candidate);
        Ok(())
    }

    fn single_type_imports(&mut self, imports: &ImportMap) -> Result<(), Cancelled> {
        let env = self.env();
        for import in &imports.type_single {
            // Types only the index knows are classified by the search batch.
            if let Some(id) = env.lookup_class(&import.path.to_dotted()) {
                self.push_type(id, Origin::ExplicitImport)?;
            }
        }
        Ok(())
    }

    fn static_imports(&mut self, imports: &ImportMap, mode: WalkMode) -> Result<(), Cancelled> {
        let env = self.env();
        for import in &imports.static_single {
            let Some(ty) = env.lookup_class(&import.ty.to_dotted()) else {
                continue;
            };
            let mut filter = MemberFilter::statics(StaticRequirement::Construct);
            filter.only_name = Some(import.member.clone());
            filter.constants_only = mode == WalkMode::Constants;
            self.imported_members(ty, Origin::StaticImport, &filter)?;
        }
        for import in &imports.static_star {
            let Some(ty) = env.lookup_class(&import.ty.to_dotted()) else {
                continue;
            };
            let mut filter = MemberFilter::statics(StaticRequirement::Construct);
            filter.constants_only = mode == WalkMode::Constants;
            self.imported_members(ty, Origin::StaticImport, &filter)?;
        }
        Ok(())
    }

    fn imported_members(
        &mut self,
        ty: ClassId,
        origin: Origin,
        filter: &MemberFilter,
    ) -> Result<usize, Cancelled> {
        let before = self.out.len();
        self.hierarchy_members(ty, ty, origin, filter)?;
        for candidate in &mut self.out[before..] {
            candidate.origin = origin;
        }
        Ok(self.out.len() - before)
    }

    fn favorites(&mut self, imports: &ImportMap, mode: WalkMode) -> Result<(), Cancelled> {
        if mode != WalkMode::Expression {
            return Ok(());
        }
        let env = self.env();
        let favorites: Vec<FavoritePattern> = self.session.favorites.clone();
        for favorite in favorites {
            let Some(ty) = env.lookup_class(&favorite.ty.to_dotted()) else {
                continue;
            };
            let star_imported = imports.static_star.iter().any(|i| i.ty == favorite.ty);
            let member_imported = |name: &str| {
                star_imported
                    || imports
                        .static_single
                        .iter()
                        .any(|i| i.ty == favorite.ty && i.member == name)
            };
            if favorite.member.as_ref().is_some_and(|m| member_imported(m.as_str()))
                || star_imported
            {
                continue;
            }

            let mut filter = MemberFilter::statics(StaticRequirement::Construct);
            filter.only_name = favorite.member.clone();
            let before = self.out.len();
            self.imported_members(ty, Origin::Favorite, &filter)?;

            let type_name = favorite.ty.to_dotted();
            let simple = favorite
                .ty
                .last()
                .map(|n| n.to_string())
                .unwrap_or_default();
            let suggest_static_import = self.session.options.suggest_static_import;
            for candidate in &mut self.out[before..] {
                if member_imported(candidate.name.as_str()) {
                    continue;
                }
                if suggest_static_import {
                    candidate.required_import = Some(format!("static {type_name}.{}", candidate.name));
                } else {
                    candidate.must_qualify = true;
                    candidate.qualifier = Some(simple.clone());
                    candidate.required_import = Some(type_name.clone());
                }
            }
        }
        Ok(())
    }

    fn keywords(&mut self) {
        if self.session.request.token.is_empty() {
            return;
        }
        let instance = !self.in_static_context() && self.session.visibility.class.is_some();
        let keywords = EXPRESSION_KEYWORDS
            .iter()
            .chain(INSTANCE_KEYWORDS.iter().filter(|_| instance));
        for keyword in keywords {
            self.push_keyword(keyword);
        }
    }

    fn push_keyword(&mut self, keyword: &str) {
        // Keywords are typed out, never abbreviated.
        let Some(name_match) = self
            .session
            .matcher
            .matches(keyword)
            .filter(|m| m.kind >= MatchKind::Prefix)
        else {
            return;
        };
        self.out.push(Candidate::new(
            CandidateKind::Keyword,
            Symbol::Keyword,
            Name::from(keyword),
            name_match,
        ));
    }

    /// `true` if the innermost enclosing class is entered through a static boundary.
    fn in_static_context(&self) -> bool {
        let env = self.env();
        for (_, data) in self.session.graph.ancestors(self.session.request.scope) {
            match data.kind() {
                ScopeKind::Class { .. } => return false,
                kind if kind.is_static_boundary(env) => return true,
                _ => {}
            }
        }
        false
    }

    fn labels(&mut self) {
        let graph = self.session.graph;
        let mut seen: HashSet<Name> = HashSet::new();
        for (_, data) in graph.ancestors(self.session.request.scope) {
            for label in data.labels().iter().rev() {
                if !seen.insert(label.clone()) {
                    continue;
                }
                if let Some(name_match) = self.session.match_name(label.as_str()) {
                    self.out.push(Candidate::new(
                        CandidateKind::Label,
                        Symbol::Label,
                        label.clone(),
                        name_match,
                    ));
                }
            }
            // Labels do not cross method, lambda or class bodies.
            if matches!(
                data.kind(),
                ScopeKind::Method { .. }
                    | ScopeKind::Lambda
                    | ScopeKind::Class { .. }
                    | ScopeKind::Initializer { .. }
            ) {
                break;
            }
        }
    }

    fn member_access(
        &mut self,
        receiver: &Type,
        receiver_name: Option<&Name>,
    ) -> Result<(), Cancelled> {
        let env = self.env();
        let declared_class = match erasure(env, receiver) {
            Type::Array(_) => {
                self.array_members(receiver)?;
                let object = env.well_known().object;
                let filter = MemberFilter {
                    skip_names: &["clone"],
                    ..MemberFilter::default()
                };
                self.hierarchy_members(object, object, Origin::Inherited, &filter)?;
                None
            }
            Type::Class(ct) => {
                self.hierarchy_members(ct.def, ct.def, Origin::Declared, &MemberFilter::default())?;
                Some(ct.def)
            }
            Type::Named(written) => {
                let resolver = Resolver::new(self.session.graph, env);
                let path = QualifiedName::from_dotted(&written);
                match resolver.resolve_qualified_type(self.session.request.scope, &path) {
                    Some(id) => {
                        self.hierarchy_members(id, id, Origin::Declared, &MemberFilter::default())?;
                        Some(id)
                    }
                    None => {
                        self.guessed_members(&written)?;
                        None
                    }
                }
            }
            // A variable name says nothing about its type; only a written type is guessed from.
            Type::Unknown | Type::Void | Type::Null | Type::Primitive(_) | Type::TypeVar(_) => None,
        };

        if let Some(name) = receiver_name {
            self.narrowed_members(name, declared_class)?;
        }
        Ok(())
    }

    fn array_members(&mut self, array: &Type) -> Result<(), Cancelled> {
        self.session.tick()?;
        if let Some(name_match) = self.session.match_name("length") {
            let mut length =
                Candidate::new(CandidateKind::Field, Symbol::ArrayLength, Name::from("length"), name_match);
            length.ty = Type::Primitive(PrimitiveType::Int);
            length.modifiers = Modifiers::PUBLIC | Modifiers::FINAL;
            self.out.push(length);
        }
        if let Some(name_match) = self.session.match_name("clone") {
            let mut clone = Candidate::new(
                CandidateKind::Method,
                Symbol::ArrayClone(array.clone()),
                Name::from("clone"),
                name_match,
            );
            clone.ty = array.clone();
            clone.modifiers = Modifiers::PUBLIC;
            self.out.push(clone);
        }
        Ok(())
    }

    fn guessed_members(&mut self, written: &str) -> Result<(), Cancelled> {
        let session = &*self.session;
        let Some(guess) = session.guesser.guess(written, session.env, session.index) else {
            return Ok(());
        };
        let before = self.out.len();
        self.hierarchy_members(guess, guess, Origin::Declared, &MemberFilter::default())?;
        for candidate in &mut self.out[before..] {
            candidate.missing = true;
            candidate.resolved = false;
        }
        Ok(())
    }

    /// Members only the `instanceof`-narrowed type has, reached through a cast.
    fn narrowed_members(&mut self, name: &Name, declared: Option<ClassId>) -> Result<(), Cancelled> {
        let env = self.env();
        let Some(narrowed) = self
            .session
            .graph
            .narrowed_type(self.session.request.scope, name.as_str())
            .cloned()
        else {
            return Ok(());
        };
        let Some(narrowed_class) = erasure(env, &narrowed).class_id() else {
            return Ok(());
        };
        if Some(narrowed_class) == declared {
            return Ok(());
        }

        let before = self.out.len();
        self.hierarchy_members(
            narrowed_class,
            narrowed_class,
            Origin::Declared,
            &MemberFilter::default(),
        )?;
        let added = self.out.split_off(before);
        let cast = format!("(({}) {name})", format_type(env, &narrowed));
        for mut candidate in added {
            let signature = candidate.erased_signature(env);
            let reachable_uncast = self.out[..before].iter().any(|existing| {
                existing.name == candidate.name
                    && existing.kind == candidate.kind
                    && existing.erased_signature(env) == signature
            });
            if reachable_uncast {
                self.session.counters.duplicate += 1;
                continue;
            }
            candidate.casted_receiver = Some(narrowed.clone());
            candidate.must_qualify = true;
            candidate.qualifier = Some(cast.clone());
            self.out.push(candidate);
        }
        Ok(())
    }

    fn static_member_access(&mut self, class: ClassId) -> Result<(), Cancelled> {
        self.hierarchy_members(
            class,
            class,
            Origin::Declared,
            &MemberFilter::statics(StaticRequirement::Construct),
        )?;
        self.member_types(class, Origin::Declared)?;
        self.push_keyword("class");
        Ok(())
    }

    fn super_access(&mut self) -> Result<(), Cancelled> {
        if self.in_static_context() {
            return Ok(());
        }
        let env = self.env();
        let Some(current) = self.session.visibility.class else {
            return Ok(());
        };
        let Some(superclass) = env
            .class(current)
            .and_then(|def| def.super_class.as_ref())
            .and_then(Type::class_id)
        else {
            return Ok(());
        };
        let filter = MemberFilter {
            exclude_abstract: true,
            ..MemberFilter::default()
        };
        self.hierarchy_members(superclass, current, Origin::Inherited, &filter)
    }

    fn case_label(&mut self, switch_type: &Type) -> Result<(), Cancelled> {
        let env = self.env();
        let enum_class = switch_type
            .class_id()
            .filter(|id| env.class(*id).is_some_and(|def| def.kind == ClassKind::Enum));
        match enum_class {
            // Enum constants are written unqualified in case labels.
            Some(id) => {
                let filter = MemberFilter {
                    methods: false,
                    constants_only: true,
                    ..MemberFilter::default()
                };
                let before = self.out.len();
                self.declared_members(id, &[id], Origin::Declared, true, &filter)?;
                let constants: Vec<Candidate> = self
                    .out
                    .split_off(before)
                    .into_iter()
                    .filter(|c| c.modifiers.contains(Modifiers::ENUM))
                    .collect();
                self.out.extend(constants);
                Ok(())
            }
            None => self.walk_scopes(WalkMode::Constants),
        }
    }
}

fn direct_interfaces(env: &dyn TypeEnv, class: ClassId) -> Vec<ClassId> {
    env.class(class)
        .map(|def| def.interfaces.iter().filter_map(Type::class_id).collect())
        .unwrap_or_default()
}
