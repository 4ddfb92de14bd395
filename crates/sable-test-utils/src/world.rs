use sable_core::QualifiedName;
use sable_index::{AcceptedConstructor, AcceptedType, MemoryIndex};
use sable_resolve::{ImportMap, LocalKind, LocalVar, ScopeGraph, ScopeId, ScopeKind};
use sable_types::{ClassDef, ClassId, MethodRef, Type, TypeEnv, TypeStore};

/// One compilation unit plus the classpath it compiles against.
///
/// ```rust,ignore
/// let mut world = World::new("app", &["java.util.*"]);
/// let main = world.declare(ClassDef::new("app.Main", ClassKind::Class));
/// let body = world.method_scope(world.class_scope(world.unit, main), main, "run");
/// world.local(body, "count", Type::Primitive(PrimitiveType::Int));
/// ```
#[derive(Debug, Clone)]
pub struct World {
    pub store: TypeStore,
    pub graph: ScopeGraph,
    /// The compilation-unit scope.
    pub unit: ScopeId,
    indexed_types: Vec<AcceptedType>,
    indexed_constructors: Vec<AcceptedConstructor>,
}

impl World {
    pub fn new(package: &str, imports: &[&str]) -> Self {
        let imports = ImportMap::from_decls(imports.iter().copied()).expect("valid imports");
        let mut graph = ScopeGraph::new();
        let unit = graph.add_compilation_unit(QualifiedName::from_dotted(package), imports);
        Self {
            store: TypeStore::with_minimal_jdk(),
            graph,
            unit,
            indexed_types: Vec::new(),
            indexed_constructors: Vec::new(),
        }
    }

    /// Add a classpath type.
    pub fn add(&mut self, def: ClassDef) -> ClassId {
        self.store.add_class(def)
    }

    /// Add a type declared in this compilation unit.
    pub fn declare(&mut self, def: ClassDef) -> ClassId {
        let id = self.store.add_class(def);
        self.graph.declare_type(self.unit, id);
        id
    }

    pub fn add_member(&mut self, outer: ClassId, def: ClassDef) -> ClassId {
        self.store.add_member_class(outer, def)
    }

    /// A type only the search index knows about.
    pub fn index_only(&mut self, fact: AcceptedType) {
        self.indexed_types.push(fact);
    }

    pub fn index_only_constructor(&mut self, fact: AcceptedConstructor) {
        self.indexed_constructors.push(fact);
    }

    pub fn class(&self, name: &str) -> ClassId {
        self.store
            .lookup_class(name)
            .unwrap_or_else(|| panic!("no class named {name}"))
    }

    pub fn ty(&self, name: &str) -> Type {
        Type::class(self.class(name), vec![])
    }

    pub fn scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        self.graph.alloc_scope(Some(parent), kind)
    }

    pub fn class_scope(&mut self, parent: ScopeId, class: ClassId) -> ScopeId {
        self.scope(parent, ScopeKind::Class { class })
    }

    /// Body of the first method of `class` named `name`.
    pub fn method_scope(&mut self, parent: ScopeId, class: ClassId, name: &str) -> ScopeId {
        let def = self.store.class(class).expect("class in store");
        let index = def
            .methods
            .iter()
            .position(|m| m.name == name)
            .unwrap_or_else(|| panic!("no method {name} in {}", def.name));
        let is_static = def.methods[index].is_static();
        self.scope(
            parent,
            ScopeKind::Method {
                method: Some(MethodRef {
                    class,
                    index: index as u32,
                }),
                is_static,
                is_constructor: false,
            },
        )
    }

    pub fn block(&mut self, parent: ScopeId) -> ScopeId {
        self.scope(parent, ScopeKind::Block)
    }

    pub fn local(&mut self, scope: ScopeId, name: &str, ty: Type) {
        self.graph
            .add_local(scope, LocalVar::new(name, ty, LocalKind::Local));
    }

    pub fn param(&mut self, scope: ScopeId, name: &str, ty: Type) {
        self.graph
            .add_local(scope, LocalVar::new(name, ty, LocalKind::Parameter));
    }

    /// Index every stored class plus the index-only facts.
    pub fn index(&self) -> MemoryIndex {
        let mut snapshot = MemoryIndex::from_type_store(&self.store).snapshot();
        snapshot.types.extend(self.indexed_types.iter().cloned());
        snapshot
            .constructors
            .extend(self.indexed_constructors.iter().cloned());
        MemoryIndex::build(snapshot)
    }
}
