use crate::context::CompletionRequest;
use crate::proposal::{Proposal, ProposalKind};

/// Why candidates were dropped before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounters {
    pub name_mismatch: u32,
    pub invisible: u32,
    pub forbidden_reference: u32,
    pub discouraged_reference: u32,
    pub deprecated: u32,
    pub static_context: u32,
    pub duplicate: u32,
    pub ignored_kind: u32,
}

impl FilterCounters {
    pub fn total(&self) -> u32 {
        self.name_mismatch
            + self.invisible
            + self.forbidden_reference
            + self.discouraged_reference
            + self.deprecated
            + self.static_context
            + self.duplicate
            + self.ignored_kind
    }
}

/// Reported once when a request produced no proposal at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionFailure {
    pub token: String,
    /// [`crate::CompletionSite::tag`] of the request.
    pub site: &'static str,
    pub filtered: FilterCounters,
}

/// Receives proposals as they are produced.
///
/// `begin` and `end` bracket every request, cancelled ones included.
pub trait CompletionRequestor {
    fn begin(&mut self, _request: &CompletionRequest) {}

    fn accept(&mut self, proposal: Proposal);

    fn no_proposals(&mut self, _failure: CompletionFailure) {}

    fn end(&mut self) {}

    /// Kinds the client never shows; the engine skips them before scoring.
    fn is_ignored(&self, _kind: ProposalKind) -> bool {
        false
    }
}

/// Requestor that keeps everything, for tests and batch clients.
#[derive(Debug, Default)]
pub struct CollectingRequestor {
    pub proposals: Vec<Proposal>,
    pub failure: Option<CompletionFailure>,
    pub ignored: Vec<ProposalKind>,
    pub began: bool,
    pub ended: bool,
}

impl CollectingRequestor {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ignoring(mut self, kind: ProposalKind) -> Self {
        self.ignored.push(kind);
        self
    }

    /// Proposals by descending relevance; ties keep emission order.
    pub fn sorted(&self) -> Vec<&Proposal> {
        let mut out: Vec<&Proposal> = self.proposals.iter().collect();
        out.sort_by(|a, b| b.relevance.cmp(&a.relevance));
        out
    }

    pub fn completions(&self) -> Vec<&str> {
        self.sorted()
            .into_iter()
            .map(|p| p.completion.as_str())
            .collect()
    }
}

impl CompletionRequestor for CollectingRequestor {
    fn begin(&mut self, _request: &CompletionRequest) {
        self.began = true;
    }

    fn accept(&mut self, proposal: Proposal) {
        self.proposals.push(proposal);
    }

    fn no_proposals(&mut self, failure: CompletionFailure) {
        self.failure = Some(failure);
    }

    fn end(&mut self) {
        self.ended = true;
    }

    fn is_ignored(&self, kind: ProposalKind) -> bool {
        self.ignored.contains(&kind)
    }
}
