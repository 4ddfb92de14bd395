use sable_fuzzy::MatchOptions;
use sable_index::{SearchIndex, TypeQuery};
use sable_types::{ClassId, TypeEnv};

/// Picks a plausible type for a receiver that did not resolve.
///
/// Members of the guessed type are proposed as "missing" and ranked below
/// everything resolved.
pub trait MissingTypeGuesser {
    fn guess(&self, written: &str, env: &dyn TypeEnv, index: &dyn SearchIndex) -> Option<ClassId>;
}

/// Never guesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGuesser;

impl MissingTypeGuesser for NoGuesser {
    fn guess(&self, _written: &str, _env: &dyn TypeEnv, _index: &dyn SearchIndex) -> Option<ClassId> {
        None
    }
}

/// Looks the written simple name up in the search index and takes the first
/// indexed type with exactly that name that the type environment also knows.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexGuesser;

impl MissingTypeGuesser for IndexGuesser {
    fn guess(&self, written: &str, env: &dyn TypeEnv, index: &dyn SearchIndex) -> Option<ClassId> {
        let simple = written.rsplit('.').next().unwrap_or(written).trim();
        if simple.is_empty() {
            return None;
        }
        if let Some(id) = env.lookup_class(written) {
            return Some(id);
        }
        let query = TypeQuery::new(simple, MatchOptions::PREFIX_ONLY);
        let guessed = index
            .find_types(&query)
            .filter(|fact| fact.simple_name == simple)
            .find_map(|fact| env.lookup_class(&fact.fully_qualified_name().to_dotted()));
        if let Some(id) = guessed {
            tracing::debug!(target: "sable.completion", written, ?id, "guessed missing receiver type");
        }
        guessed
    }
}
