use sable_core::QualifiedName;
use sable_types::{supertypes, ClassId, TypeEnv};

use crate::scopes::{ScopeGraph, ScopeId, ScopeKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeLookup {
    Found(ClassId),
    Ambiguous(Vec<ClassId>),
    NotFound,
}

impl TypeLookup {
    #[must_use]
    pub fn found(self) -> Option<ClassId> {
        match self {
            TypeLookup::Found(id) => Some(id),
            TypeLookup::Ambiguous(_) | TypeLookup::NotFound => None,
        }
    }
}

/// Type-namespace resolution against a [`ScopeGraph`] and a [`TypeEnv`].
pub struct Resolver<'a> {
    graph: &'a ScopeGraph,
    env: &'a dyn TypeEnv,
}

impl<'a> Resolver<'a> {
    pub fn new(graph: &'a ScopeGraph, env: &'a dyn TypeEnv) -> Self {
        Self { graph, env }
    }

    /// Member type `name` declared in `class` or inherited from one of its supertypes.
    pub fn member_type(&self, class: ClassId, name: &str) -> Option<ClassId> {
        std::iter::once(class)
            .chain(supertypes(self.env, class))
            .find_map(|owner| {
                self.env.class(owner)?.member_types.iter().copied().find(|id| {
                    self.env
                        .class(*id)
                        .is_some_and(|def| def.simple_name() == name)
                })
            })
    }

    /// Resolve a simple type name as seen from `scope`.
    ///
    /// Lookup order: member types of enclosing classes (innermost first), types
    /// declared in the file, single-type imports, the current package, then all
    /// on-demand imports together (including the implicit `java.lang.*`).
    /// Several distinct on-demand matches are ambiguous.
    pub fn resolve_type_name(&self, scope: ScopeId, name: &str) -> TypeLookup {
        for (_, data) in self.graph.ancestors(scope) {
            match data.kind() {
                ScopeKind::Class { class } => {
                    if self
                        .env
                        .class(*class)
                        .is_some_and(|def| def.simple_name() == name)
                    {
                        return TypeLookup::Found(*class);
                    }
                    if let Some(id) = self.member_type(*class, name) {
                        return TypeLookup::Found(id);
                    }
                }
                ScopeKind::CompilationUnit {
                    package,
                    imports,
                    types,
                } => {
                    if let Some(id) = types.iter().copied().find(|id| {
                        self.env
                            .class(*id)
                            .is_some_and(|def| def.simple_name() == name)
                    }) {
                        return TypeLookup::Found(id);
                    }

                    if let Some(import) = imports.single_type(name) {
                        if let Some(id) = self.env.lookup_class(&import.path.to_dotted()) {
                            return TypeLookup::Found(id);
                        }
                    }

                    if let Some(id) = self.env.lookup_class(&package.child(name).to_dotted()) {
                        return TypeLookup::Found(id);
                    }

                    let mut found: Vec<ClassId> = Vec::new();
                    for (container, _) in imports.on_demand() {
                        let id = self
                            .env
                            .lookup_class(&container.child(name).to_dotted())
                            .or_else(|| {
                                let owner = self.env.lookup_class(&container.to_dotted())?;
                                self.member_type(owner, name)
                            });
                        if let Some(id) = id {
                            if !found.contains(&id) {
                                found.push(id);
                            }
                        }
                    }
                    return match found.len() {
                        0 => TypeLookup::NotFound,
                        1 => TypeLookup::Found(found[0]),
                        _ => {
                            tracing::debug!(
                                target: "sable.resolve",
                                name,
                                candidates = found.len(),
                                "ambiguous on-demand type import"
                            );
                            TypeLookup::Ambiguous(found)
                        }
                    };
                }
                _ => {}
            }
        }
        TypeLookup::NotFound
    }

    /// Resolve a dotted type reference such as `Map.Entry` or `java.util.Map`.
    pub fn resolve_qualified_type(&self, scope: ScopeId, path: &QualifiedName) -> Option<ClassId> {
        if let Some(id) = self.env.lookup_class(&path.to_dotted()) {
            return Some(id);
        }
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.resolve_type_name(scope, first.as_str()).found()?;
        for segment in rest {
            current = self.member_type(current, segment.as_str())?;
        }
        Some(current)
    }
}
