use std::path::Path;

use sable_core::{Name, PackageName, QualifiedName};
use sable_fuzzy::NameMatcher;
use sable_types::{format_type, TypeEnv, TypeStore};

use crate::{
    AcceptedConstructor, AcceptedType, Facts, IndexError, IndexSnapshot, PackageQuery,
    SearchIndex, TypeQuery,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStrategy {
    /// Only the bucket keyed by the pattern's first byte can match.
    Prefix,
    FullScan,
}

/// Ids grouped by the ASCII-lowercased first byte of the name and of its first hump.
#[derive(Debug, Clone)]
struct Buckets {
    prefix1: Vec<Vec<u32>>,
}

impl Buckets {
    fn build<'n>(names: impl Iterator<Item = &'n Name>) -> Self {
        let mut prefix1: Vec<Vec<u32>> = vec![Vec::new(); 256];
        for (id, name) in names.enumerate() {
            let bytes = name.as_str().as_bytes();
            let first = bytes.first().map(|b| b.to_ascii_lowercase());
            // `$Proxy` and `_Impl` start their first hump after the separator.
            let hump = bytes
                .iter()
                .find(|b| !matches!(b, b'_' | b'$'))
                .map(|b| b.to_ascii_lowercase());
            if let Some(key) = first {
                prefix1[key as usize].push(id as u32);
            }
            if let Some(key) = hump {
                if Some(key) != first {
                    prefix1[key as usize].push(id as u32);
                }
            }
        }
        for bucket in &mut prefix1 {
            bucket.sort_unstable();
        }
        Self { prefix1 }
    }

    fn get(&self, key: u8) -> &[u32] {
        &self.prefix1[key.to_ascii_lowercase() as usize]
    }
}

/// A [`SearchIndex`] held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryIndex {
    types: Vec<AcceptedType>,
    constructors: Vec<AcceptedConstructor>,
    /// Sorted; every package's parents are present too.
    packages: Vec<PackageName>,
    type_buckets: Buckets,
    constructor_buckets: Buckets,
}

impl Default for MemoryIndex {
    fn default() -> Self {
        Self::build(IndexSnapshot::default())
    }
}

impl MemoryIndex {
    pub fn build(snapshot: IndexSnapshot) -> Self {
        let IndexSnapshot {
            types,
            constructors,
            packages,
        } = snapshot;

        let mut all_packages: Vec<PackageName> = Vec::new();
        let declared = types
            .iter()
            .map(|t| &t.package)
            .chain(constructors.iter().map(|c| &c.declaring.package))
            .chain(packages.iter());
        for package in declared {
            let mut current = Some(package.clone());
            while let Some(pkg) = current {
                if pkg.is_empty() {
                    break;
                }
                current = pkg.parent();
                all_packages.push(pkg);
            }
        }
        all_packages.sort();
        all_packages.dedup();

        let type_buckets = Buckets::build(types.iter().map(|t| &t.simple_name));
        let constructor_buckets =
            Buckets::build(constructors.iter().map(|c| &c.declaring.simple_name));

        tracing::debug!(
            target: "sable.index",
            types = types.len(),
            constructors = constructors.len(),
            packages = all_packages.len(),
            "built in-memory search index"
        );

        Self {
            types,
            constructors,
            packages: all_packages,
            type_buckets,
            constructor_buckets,
        }
    }

    /// Index every class of `store`, constructors included.
    pub fn from_type_store(store: &TypeStore) -> Self {
        let mut snapshot = IndexSnapshot::default();
        for (_, def) in store.iter() {
            let mut enclosing_types = Vec::new();
            let mut outer = def.enclosing;
            while let Some(id) = outer {
                let Some(outer_def) = store.class(id) else {
                    break;
                };
                if enclosing_types.len() > 64 {
                    break;
                }
                enclosing_types.push(Name::from(outer_def.simple_name()));
                outer = outer_def.enclosing;
            }
            enclosing_types.reverse();

            let ty = AcceptedType {
                package: def.package.clone(),
                enclosing_types,
                simple_name: Name::from(def.simple_name()),
                modifiers: def.modifiers,
                kind: def.kind,
                access: def.access,
            };
            for ctor in &def.constructors {
                snapshot.constructors.push(AcceptedConstructor {
                    declaring: ty.clone(),
                    params: ctor.params.iter().map(|p| format_type(store, p)).collect(),
                    param_names: ctor.param_names.clone(),
                    modifiers: ctor.modifiers,
                    access: ctor.access,
                });
            }
            snapshot.types.push(ty);
        }
        Self::build(snapshot)
    }

    /// Build an index from a JSON snapshot on disk.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        IndexSnapshot::load(path).map(Self::build)
    }

    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            types: self.types.clone(),
            constructors: self.constructors.clone(),
            packages: self.packages.clone(),
        }
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn strategy(query: &TypeQuery) -> CandidateStrategy {
        let first = query.pattern.as_bytes().first();
        match first {
            Some(b) if !matches!(b, b'_' | b'$') => {
                if query.options.substring || query.options.subword {
                    CandidateStrategy::FullScan
                } else {
                    CandidateStrategy::Prefix
                }
            }
            _ => CandidateStrategy::FullScan,
        }
    }

    fn candidate_ids<'a>(
        buckets: &'a Buckets,
        len: usize,
        query: &TypeQuery,
    ) -> Box<dyn Iterator<Item = usize> + 'a> {
        match (Self::strategy(query), query.pattern.as_bytes().first()) {
            (CandidateStrategy::Prefix, Some(&key)) => {
                Box::new(buckets.get(key).iter().map(|&id| id as usize))
            }
            _ => Box::new(0..len),
        }
    }
}

fn container_matches(container: &Option<QualifiedName>, ty: &AcceptedType) -> bool {
    container.as_ref().map_or(true, |c| ty.container() == *c)
}

impl SearchIndex for MemoryIndex {
    fn find_types<'a>(&'a self, query: &TypeQuery) -> Facts<'a, AcceptedType> {
        let matcher = NameMatcher::new(&query.pattern, query.options);
        let container = query.container.clone();
        Box::new(
            Self::candidate_ids(&self.type_buckets, self.types.len(), query)
                .filter_map(move |id| self.types.get(id))
                .filter(move |ty| {
                    container_matches(&container, ty)
                        && matcher.matches(ty.simple_name.as_str()).is_some()
                })
                .cloned(),
        )
    }

    fn find_constructors<'a>(&'a self, query: &TypeQuery) -> Facts<'a, AcceptedConstructor> {
        let matcher = NameMatcher::new(&query.pattern, query.options);
        let container = query.container.clone();
        Box::new(
            Self::candidate_ids(&self.constructor_buckets, self.constructors.len(), query)
                .filter_map(move |id| self.constructors.get(id))
                .filter(move |ctor| {
                    container_matches(&container, &ctor.declaring)
                        && matcher
                            .matches(ctor.declaring.simple_name.as_str())
                            .is_some()
                })
                .cloned(),
        )
    }

    fn find_packages<'a>(&'a self, query: &PackageQuery) -> Facts<'a, PackageName> {
        let matcher = NameMatcher::new(&query.pattern, query.options);
        let parent = query.parent.clone().unwrap_or_default();
        let depth = parent.len();
        let mut last: Option<PackageName> = None;
        Box::new(self.packages.iter().filter_map(move |pkg| {
            if pkg.len() <= depth || !pkg.starts_with(&parent) {
                return None;
            }
            let next = &pkg.segments()[depth];
            matcher.matches(next.as_str())?;
            let truncated = QualifiedName::new(pkg.segments()[..=depth].to_vec());
            if last.as_ref() == Some(&truncated) {
                return None;
            }
            last = Some(truncated.clone());
            Some(truncated)
        }))
    }
}
