use std::collections::HashMap;

use sable_config::{CompletionOptions, FavoritePattern};
use sable_core::{Cancelled, CancellationToken, Checkpoint, Name, QualifiedName};
use sable_fuzzy::{MatchOptions, NameMatch, NameMatcher};
use sable_index::SearchIndex;
use sable_resolve::ScopeGraph;
use sable_types::{is_member_visible, Accessibility, ClassId, Modifiers, TypeEnv, VisibilityContext};

use crate::context::CompletionRequest;
use crate::guess::MissingTypeGuesser;
use crate::requestor::FilterCounters;

/// Whether the constructors of a known type were proposed already.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructorState {
    UnknownConstructors,
    KnownConstructors,
}

/// Types proposed so far in one request, keyed by fully-qualified name.
///
/// Keeps the scope walk and the index search from proposing the same type
/// twice, and records which type owns each unqualified simple name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownTypes {
    types: HashMap<QualifiedName, ConstructorState>,
    claimed: HashMap<Name, QualifiedName>,
}

impl KnownTypes {
    /// Register `name`; `false` if it was already known.
    pub fn insert(&mut self, name: QualifiedName) -> bool {
        if self.types.contains_key(&name) {
            return false;
        }
        self.types.insert(name, ConstructorState::UnknownConstructors);
        true
    }

    pub fn state(&self, name: &QualifiedName) -> Option<ConstructorState> {
        self.types.get(name).copied()
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.types.contains_key(name)
    }

    pub fn mark_constructors_known(&mut self, name: &QualifiedName) {
        if let Some(state) = self.types.get_mut(name) {
            *state = ConstructorState::KnownConstructors;
        } else {
            self.types
                .insert(name.clone(), ConstructorState::KnownConstructors);
        }
    }

    /// Let `owner` use `simple` unqualified. Returns `false` if another type holds it.
    pub fn claim(&mut self, simple: &Name, owner: &QualifiedName) -> bool {
        match self.claimed.get(simple) {
            Some(existing) => existing == owner,
            None => {
                self.claimed.insert(simple.clone(), owner.clone());
                true
            }
        }
    }

    pub fn claimant(&self, simple: &str) -> Option<&QualifiedName> {
        self.claimed.get(&Name::from(simple))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// All state of one completion request. Built by the engine, dropped when the request ends.
pub(crate) struct CompletionSession<'a> {
    pub(crate) request: &'a CompletionRequest,
    pub(crate) options: &'a CompletionOptions,
    pub(crate) env: &'a dyn TypeEnv,
    pub(crate) graph: &'a ScopeGraph,
    pub(crate) index: &'a dyn SearchIndex,
    pub(crate) guesser: &'a dyn MissingTypeGuesser,
    pub(crate) matcher: NameMatcher,
    pub(crate) favorites: Vec<FavoritePattern>,
    pub(crate) visibility: VisibilityContext,
    pub(crate) known: KnownTypes,
    pub(crate) counters: FilterCounters,
    checkpoint: Checkpoint,
}

impl<'a> CompletionSession<'a> {
    pub(crate) fn new(
        request: &'a CompletionRequest,
        options: &'a CompletionOptions,
        env: &'a dyn TypeEnv,
        graph: &'a ScopeGraph,
        index: &'a dyn SearchIndex,
        guesser: &'a dyn MissingTypeGuesser,
        token: CancellationToken,
    ) -> Self {
        let match_options = match_options(options);
        Self {
            request,
            options,
            env,
            graph,
            index,
            guesser,
            matcher: NameMatcher::new(&request.token, match_options),
            favorites: options.favorites(),
            visibility: graph.visibility_context(request.scope),
            known: KnownTypes::default(),
            counters: FilterCounters::default(),
            checkpoint: Checkpoint::new(token),
        }
    }

    pub(crate) fn match_options(&self) -> MatchOptions {
        self.matcher.options()
    }

    /// Count one processed candidate; polls cancellation periodically.
    pub(crate) fn tick(&mut self) -> Result<(), Cancelled> {
        self.checkpoint.tick()
    }

    pub(crate) fn check_cancelled(&self) -> Result<(), Cancelled> {
        self.checkpoint.check()
    }

    pub(crate) fn match_name(&mut self, name: &str) -> Option<NameMatch> {
        let found = self.matcher.matches(name);
        if found.is_none() {
            self.counters.name_mismatch += 1;
        }
        found
    }

    /// Access-rule and deprecation filtering.
    pub(crate) fn admit_access(&mut self, access: Accessibility, modifiers: Modifiers) -> bool {
        match access {
            Accessibility::NonAccessible if self.options.check_forbidden_reference => {
                self.counters.forbidden_reference += 1;
                return false;
            }
            Accessibility::Discouraged if self.options.check_discouraged_reference => {
                self.counters.discouraged_reference += 1;
                return false;
            }
            _ => {}
        }
        if self.options.check_deprecation && modifiers.is_deprecated() {
            self.counters.deprecated += 1;
            return false;
        }
        true
    }

    /// Language visibility (when enabled) followed by [`Self::admit_access`].
    pub(crate) fn admit_member(
        &mut self,
        declaring: ClassId,
        modifiers: Modifiers,
        access: Accessibility,
    ) -> bool {
        if self.options.check_visibility
            && !is_member_visible(self.env, declaring, modifiers, &self.visibility)
        {
            self.counters.invisible += 1;
            return false;
        }
        let class_access = self
            .env
            .class(declaring)
            .map_or(Accessibility::Accessible, |def| def.access);
        self.admit_access(access.max(class_access), modifiers)
    }

    pub(crate) fn is_forbidden(&self, class: ClassId) -> bool {
        self.request.forbidden.contains(&class)
    }

    pub(crate) fn is_forbidden_name(&self, name: &QualifiedName) -> bool {
        self.request.forbidden.iter().any(|id| {
            self.env
                .class(*id)
                .is_some_and(|def| def.name == *name)
        })
    }
}

pub(crate) fn match_options(options: &CompletionOptions) -> MatchOptions {
    MatchOptions {
        camel_case: options.camel_case_match,
        substring: options.substring_match,
        subword: options.subword_match,
    }
}
