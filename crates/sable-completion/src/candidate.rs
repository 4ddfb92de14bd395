use sable_core::{Name, PackageName, QualifiedName};
use sable_fuzzy::NameMatch;
use sable_index::{AcceptedConstructor, AcceptedType};
use sable_types::{
    erased_signature, Accessibility, ClassId, ConstructorRef, ErasedSignature, FieldRef,
    MethodRef, Modifiers, Type, TypeEnv,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Field,
    Method,
    Constructor,
    Type,
    Package,
    Module,
    Label,
    Keyword,
    Local,
}

/// How a candidate was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    LocalScope,
    /// Declared by the class the search started at.
    Declared,
    /// Found on a superclass.
    Inherited,
    /// Found on a superinterface.
    Interface,
    ExplicitImport,
    OnDemandImport,
    StaticImport,
    Favorite,
    Search,
    /// Made up by the engine: array members, keywords, labels.
    Synthetic,
}

/// Where a candidate's data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Local { ty: Type, is_final: bool },
    Field(FieldRef),
    Method(MethodRef),
    Constructor(ConstructorRef),
    Type(ClassId),
    /// `length` of an array.
    ArrayLength,
    /// `clone()` of an array, returning the array type.
    ArrayClone(Type),
    IndexedType(AcceptedType),
    IndexedConstructor(AcceptedConstructor),
    Package(PackageName),
    Label,
    Keyword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationStyle {
    Direct,
    /// `new Type() { ... }` for interfaces and abstract classes.
    Anonymous,
}

/// A symbol that passed name matching, before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub symbol: Symbol,
    pub name: Name,
    /// Class declaring the member, or the type itself for type candidates.
    pub declaring: Option<ClassId>,
    /// Field type, method return type, or the type a type candidate denotes.
    pub ty: Type,
    pub modifiers: Modifiers,
    pub access: Accessibility,
    pub origin: Origin,
    /// The class the search started at, then the supertypes the member was found through.
    pub chain: Vec<ClassId>,
    pub name_match: NameMatch,
    pub must_qualify: bool,
    /// Text written before `.` when qualified: `this`, `Outer.this`, `Math`, `((Circle) s)`.
    pub qualifier: Option<String>,
    pub resolved: bool,
    /// Found on a guessed type for an unresolvable receiver.
    pub missing: bool,
    /// Receiver cast synthesized from an `instanceof` guard.
    pub casted_receiver: Option<Type>,
    /// Import a client should add when accepting, `static` prefixed for members.
    pub required_import: Option<String>,
    pub allocation: Option<AllocationStyle>,
    /// Method whose attributes score this candidate (record-synthesized members).
    pub scored_as: Option<MethodRef>,
}

impl Candidate {
    pub fn new(kind: CandidateKind, symbol: Symbol, name: Name, name_match: NameMatch) -> Self {
        Self {
            kind,
            symbol,
            name,
            declaring: None,
            ty: Type::Unknown,
            modifiers: Modifiers::NONE,
            access: Accessibility::Accessible,
            origin: Origin::Synthetic,
            chain: Vec::new(),
            name_match,
            must_qualify: false,
            qualifier: None,
            resolved: true,
            missing: false,
            casted_receiver: None,
            required_import: None,
            allocation: None,
            scored_as: None,
        }
    }

    pub fn is_member(&self) -> bool {
        matches!(self.kind, CandidateKind::Field | CandidateKind::Method)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    /// The class the search that found this candidate started at.
    pub fn chain_root(&self) -> Option<ClassId> {
        self.chain.first().copied()
    }

    /// Identity used by override and hiding checks; `None` for non-members.
    pub fn erased_signature(&self, env: &dyn TypeEnv) -> Option<ErasedSignature> {
        match &self.symbol {
            Symbol::Field(_) | Symbol::ArrayLength => Some(ErasedSignature::field(self.name.clone())),
            Symbol::Method(method) => env.method(*method).map(|def| erased_signature(env, def)),
            Symbol::ArrayClone(_) => Some(ErasedSignature {
                name: self.name.clone(),
                params: Some(Vec::new()),
            }),
            _ => None,
        }
    }

    /// Fully-qualified name of the type a type or constructor candidate denotes.
    pub fn type_name(&self, env: &dyn TypeEnv) -> Option<QualifiedName> {
        match &self.symbol {
            Symbol::Type(id) => env.class(*id).map(|def| def.name.clone()),
            Symbol::Constructor(ctor) => env.class(ctor.class).map(|def| def.name.clone()),
            Symbol::IndexedType(fact) => Some(fact.fully_qualified_name()),
            Symbol::IndexedConstructor(fact) => Some(fact.declaring.fully_qualified_name()),
            _ => None,
        }
    }

    /// The `Local` variant's finality or the member's `final` modifier.
    pub fn is_final(&self) -> bool {
        match &self.symbol {
            Symbol::Local { is_final, .. } => *is_final,
            _ => self.modifiers.is_final(),
        }
    }
}
