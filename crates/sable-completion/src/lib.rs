//! Completion proposals for a cursor in a Java compilation unit.
//!
//! A request runs in fixed stages:
//!
//! 1. the scope walk collects locals, members, imported and declared types
//!    reachable from the cursor, innermost scope first;
//! 2. shadowing and duplicate resolution drops overridden or re-reached
//!    members and qualifies hidden ones;
//! 3. each survivor is scored and streamed to the [`CompletionRequestor`];
//! 4. the classpath search drains the [`sable_index::SearchIndex`] for types
//!    (and constructors at `new`), decides how each must be written, then
//!    scores and streams those too.
//!
//! Relevance is a mixed-radix number built from independent tiers, see
//! [`relevance`]. Cancellation is cooperative: the request polls its
//! [`sable_core::CancellationToken`] every few candidates and stops between
//! proposals.

#![forbid(unsafe_code)]

mod batch;
mod candidate;
mod context;
mod dedup;
mod engine;
mod guess;
mod proposal;
pub mod relevance;
mod requestor;
mod session;
mod walker;

pub use candidate::{AllocationStyle, Candidate, CandidateKind, Origin, Symbol};
pub use context::{CompletionRequest, CompletionSite, ExpectedTypes, TypeFilter, TypeKindHint};
pub use engine::{CompletionEngine, CompletionOutcome};
pub use guess::{IndexGuesser, MissingTypeGuesser, NoGuesser};
pub use proposal::{Proposal, ProposalKind};
pub use relevance::{RelevanceFactors, Tier, MAX_RELEVANCE};
pub use requestor::{CollectingRequestor, CompletionFailure, CompletionRequestor, FilterCounters};
pub use session::{ConstructorState, KnownTypes};
