use sable_core::{Name, PackageName};
use sable_types::{ClassId, ClassKind, MethodRef, Type, TypeEnv, VisibilityContext};

use crate::import_map::ImportMap;

pub type ScopeId = usize;

/// Parent-linked lexical scopes of one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeGraph {
    scopes: Vec<ScopeData>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeData {
    pub(crate) parent: Option<ScopeId>,
    pub(crate) kind: ScopeKind,
    pub(crate) locals: Vec<LocalVar>,
    pub(crate) labels: Vec<Name>,
}

impl ScopeData {
    #[must_use]
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    #[must_use]
    pub fn kind(&self) -> &ScopeKind {
        &self.kind
    }

    /// Locals in declaration order.
    #[must_use]
    pub fn locals(&self) -> &[LocalVar] {
        &self.locals
    }

    #[must_use]
    pub fn labels(&self) -> &[Name] {
        &self.labels
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    CompilationUnit {
        package: PackageName,
        imports: ImportMap,
        /// Top-level types declared in this file.
        types: Vec<ClassId>,
    },
    Class {
        class: ClassId,
    },
    Method {
        method: Option<MethodRef>,
        is_static: bool,
        is_constructor: bool,
    },
    Initializer {
        is_static: bool,
    },
    Block,
    Lambda,
    /// The region where an `instanceof` pattern narrows a variable's static type.
    Guard {
        narrowed: Vec<(Name, Type)>,
    },
}

impl ScopeKind {
    /// `true` if code inside this scope has no enclosing instance beyond it.
    pub fn is_static_boundary(&self, env: &dyn TypeEnv) -> bool {
        match self {
            ScopeKind::Method { is_static, .. } | ScopeKind::Initializer { is_static } => {
                *is_static
            }
            // Nested interfaces, enums and records are implicitly static.
            ScopeKind::Class { class } => env.class(*class).is_some_and(|def| {
                def.enclosing.is_some()
                    && (def.modifiers.is_static() || def.kind != ClassKind::Class)
            }),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalKind {
    Local,
    Parameter,
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVar {
    pub name: Name,
    pub ty: Type,
    pub kind: LocalKind,
    pub is_final: bool,
}

impl LocalVar {
    pub fn new(name: impl Into<Name>, ty: Type, kind: LocalKind) -> Self {
        Self {
            name: name.into(),
            ty,
            kind,
            is_final: false,
        }
    }
}

impl ScopeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    #[must_use]
    pub fn scope(&self, id: ScopeId) -> Option<&ScopeData> {
        self.scopes.get(id)
    }

    pub fn alloc_scope(&mut self, parent: Option<ScopeId>, kind: ScopeKind) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(ScopeData {
            parent,
            kind,
            locals: Vec::new(),
            labels: Vec::new(),
        });
        id
    }

    pub fn add_compilation_unit(&mut self, package: PackageName, imports: ImportMap) -> ScopeId {
        self.alloc_scope(
            None,
            ScopeKind::CompilationUnit {
                package,
                imports,
                types: Vec::new(),
            },
        )
    }

    /// Record a top-level type declared in the compilation unit owning `scope`.
    pub fn declare_type(&mut self, scope: ScopeId, class: ClassId) {
        let Some(unit) = self.compilation_unit_id(scope) else {
            return;
        };
        if let Some(ScopeKind::CompilationUnit { types, .. }) =
            self.scopes.get_mut(unit).map(|s| &mut s.kind)
        {
            if !types.contains(&class) {
                types.push(class);
            }
        }
    }

    pub fn add_local(&mut self, scope: ScopeId, local: LocalVar) {
        if let Some(data) = self.scopes.get_mut(scope) {
            data.locals.push(local);
        }
    }

    pub fn add_label(&mut self, scope: ScopeId, label: impl Into<Name>) {
        if let Some(data) = self.scopes.get_mut(scope) {
            data.labels.push(label.into());
        }
    }

    /// `scope` and its parents, innermost first.
    pub fn ancestors(&self, scope: ScopeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.scope(scope).map(|_| scope),
            remaining: self.scopes.len(),
        }
    }

    fn compilation_unit_id(&self, scope: ScopeId) -> Option<ScopeId> {
        self.ancestors(scope)
            .find(|(_, data)| matches!(data.kind, ScopeKind::CompilationUnit { .. }))
            .map(|(id, _)| id)
    }

    /// Package and imports of the compilation unit containing `scope`.
    pub fn compilation_unit(&self, scope: ScopeId) -> Option<(&PackageName, &ImportMap)> {
        self.ancestors(scope).find_map(|(_, data)| match &data.kind {
            ScopeKind::CompilationUnit {
                package, imports, ..
            } => Some((package, imports)),
            _ => None,
        })
    }

    pub fn declared_types(&self, scope: ScopeId) -> &[ClassId] {
        self.ancestors(scope)
            .find_map(|(_, data)| match &data.kind {
                ScopeKind::CompilationUnit { types, .. } => Some(types.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Innermost class whose body contains `scope`.
    pub fn enclosing_class(&self, scope: ScopeId) -> Option<ClassId> {
        self.ancestors(scope).find_map(|(_, data)| match data.kind {
            ScopeKind::Class { class } => Some(class),
            _ => None,
        })
    }

    /// Innermost method whose body contains `scope`.
    pub fn enclosing_method(&self, scope: ScopeId) -> Option<MethodRef> {
        self.ancestors(scope).find_map(|(_, data)| match data.kind {
            ScopeKind::Method { method, .. } => method,
            _ => None,
        })
    }

    /// Nearest local, parameter or pattern binding named `name`.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<&LocalVar> {
        for (_, data) in self.ancestors(scope) {
            if let Some(local) = data.locals.iter().rev().find(|l| l.name == name) {
                return Some(local);
            }
        }
        None
    }

    /// Static type of `name` as narrowed by the innermost enclosing `instanceof` guard.
    pub fn narrowed_type(&self, scope: ScopeId, name: &str) -> Option<&Type> {
        self.ancestors(scope).find_map(|(_, data)| match &data.kind {
            ScopeKind::Guard { narrowed } => narrowed
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, ty)| ty),
            _ => None,
        })
    }

    pub fn visibility_context(&self, scope: ScopeId) -> VisibilityContext {
        VisibilityContext {
            package: self
                .compilation_unit(scope)
                .map(|(package, _)| package.clone())
                .unwrap_or_default(),
            class: self.enclosing_class(scope),
        }
    }
}

pub struct Ancestors<'a> {
    graph: &'a ScopeGraph,
    next: Option<ScopeId>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (ScopeId, &'a ScopeData);

    fn next(&mut self) -> Option<Self::Item> {
        // A parent cycle would otherwise loop forever.
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let id = self.next?;
        let data = self.graph.scope(id)?;
        self.next = data.parent;
        Some((id, data))
    }
}
