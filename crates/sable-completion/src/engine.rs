use sable_config::CompletionOptions;
use sable_core::{CancellationToken, Cancelled};
use sable_index::SearchIndex;
use sable_resolve::ScopeGraph;
use sable_types::TypeEnv;

use crate::batch;
use crate::candidate::Candidate;
use crate::context::{CompletionRequest, CompletionSite};
use crate::dedup;
use crate::guess::{IndexGuesser, MissingTypeGuesser};
use crate::proposal::{build_proposal, proposal_kind, Proposal};
use crate::relevance;
use crate::requestor::{CollectingRequestor, CompletionFailure, CompletionRequestor};
use crate::session::CompletionSession;
use crate::walker::ScopeWalker;

/// How a request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Completed { proposals: usize },
    /// Cancelled mid-request; the `emitted` proposals already delivered stand.
    Cancelled { emitted: usize },
}

impl CompletionOutcome {
    pub fn emitted(&self) -> usize {
        match self {
            CompletionOutcome::Completed { proposals } => *proposals,
            CompletionOutcome::Cancelled { emitted } => *emitted,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CompletionOutcome::Cancelled { .. })
    }
}

/// Produces proposals for one compilation unit against one classpath.
///
/// The engine holds no per-request state; every [`CompletionEngine::complete`]
/// call builds its own session, so one engine can serve many requests.
pub struct CompletionEngine<'a> {
    env: &'a dyn TypeEnv,
    index: &'a dyn SearchIndex,
    options: CompletionOptions,
    guesser: Box<dyn MissingTypeGuesser + 'a>,
}

impl<'a> CompletionEngine<'a> {
    pub fn new(env: &'a dyn TypeEnv, index: &'a dyn SearchIndex, options: CompletionOptions) -> Self {
        Self {
            env,
            index,
            options,
            guesser: Box::new(IndexGuesser),
        }
    }

    #[must_use]
    pub fn with_guesser(mut self, guesser: impl MissingTypeGuesser + 'a) -> Self {
        self.guesser = Box::new(guesser);
        self
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    /// Run one request, streaming proposals into `requestor`.
    ///
    /// `begin` and `end` are always called, also when `cancel` fires. When
    /// nothing was proposed the requestor gets a [`CompletionFailure`] listing
    /// why candidates were filtered.
    #[tracing::instrument(
        level = "debug",
        target = "sable.completion",
        skip_all,
        fields(site = request.site.tag(), token = %request.token)
    )]
    pub fn complete(
        &self,
        graph: &ScopeGraph,
        request: &CompletionRequest,
        requestor: &mut dyn CompletionRequestor,
        cancel: &CancellationToken,
    ) -> CompletionOutcome {
        requestor.begin(request);
        let mut session = CompletionSession::new(
            request,
            &self.options,
            self.env,
            graph,
            self.index,
            &*self.guesser,
            cancel.clone(),
        );

        let mut emitted = 0;
        let outcome = match run(&mut session, requestor, &mut emitted) {
            Ok(()) => CompletionOutcome::Completed { proposals: emitted },
            Err(Cancelled) => {
                tracing::debug!(target: "sable.completion", emitted, "completion cancelled");
                CompletionOutcome::Cancelled { emitted }
            }
        };

        if let CompletionOutcome::Completed { proposals: 0 } = outcome {
            requestor.no_proposals(CompletionFailure {
                token: request.token.clone(),
                site: request.site.tag(),
                filtered: session.counters,
            });
        }
        tracing::debug!(
            target: "sable.completion",
            emitted,
            filtered = session.counters.total(),
            known_types = session.known.len(),
            "completion finished"
        );
        requestor.end();
        outcome
    }

    /// Run a request to completion and return its proposals, best first.
    pub fn complete_sorted(&self, graph: &ScopeGraph, request: &CompletionRequest) -> Vec<Proposal> {
        let mut requestor = CollectingRequestor::new();
        self.complete(graph, request, &mut requestor, &CancellationToken::new());
        requestor.sorted().into_iter().cloned().collect()
    }
}

fn run(
    session: &mut CompletionSession<'_>,
    requestor: &mut dyn CompletionRequestor,
    emitted: &mut usize,
) -> Result<(), Cancelled> {
    session.check_cancelled()?;
    let site = session.request.site.clone();
    if site == CompletionSite::None {
        return Ok(());
    }

    let raw = ScopeWalker::new(session).collect()?;
    let mut resolved = dedup::resolve(session, raw)?;
    if site == CompletionSite::Allocation {
        resolved = batch::expand_allocations(session, resolved)?;
    }
    emit(session, requestor, resolved, emitted)?;

    if batch::searches_classpath(session) {
        let found = batch::search_types(session)?;
        emit(session, requestor, found, emitted)?;
    }
    if site.wants_packages() {
        let packages = batch::search_packages(session)?;
        emit(session, requestor, packages, emitted)?;
    }
    Ok(())
}

fn emit(
    session: &mut CompletionSession<'_>,
    requestor: &mut dyn CompletionRequestor,
    candidates: Vec<Candidate>,
    emitted: &mut usize,
) -> Result<(), Cancelled> {
    for candidate in candidates {
        session.tick()?;
        if requestor.is_ignored(proposal_kind(&candidate)) {
            session.counters.ignored_kind += 1;
            continue;
        }
        let relevance = relevance::score(&candidate, session.request, session.env, session.graph);
        requestor.accept(build_proposal(
            &candidate,
            relevance,
            session.request.replace_range,
            session.env,
        ));
        *emitted += 1;
    }
    Ok(())
}
