//! Binding and type graph model used by Sable.
//!
//! This is not a type checker. It models exactly the queries completion needs:
//! declared members, supertypes, modifiers and workspace accessibility, erasure,
//! subtyping (with boxing), and language visibility.

#![forbid(unsafe_code)]

mod signature;
mod store;
mod subtyping;
mod visibility;

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use sable_core::{Name, PackageName, QualifiedName};
use serde::{Deserialize, Serialize};

pub use signature::{
    erased_signature, format_method, format_type, is_subsignature, ErasedSignature,
};
pub use store::TypeStore;
pub use subtyping::{
    boxed, erasure, is_assignable_with_boxing, is_subclass, is_subtype, superclass_chain,
    supertypes, unboxed,
};
pub use visibility::{is_class_visible, is_member_visible, VisibilityContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(u32);

impl ClassId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Char,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        PrimitiveType::ALL.into_iter().find(|p| p.keyword() == text)
    }

    /// Fully-qualified name of the wrapper class.
    pub fn box_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Identity or widening primitive conversion.
    pub fn widens_to(self, target: PrimitiveType) -> bool {
        use PrimitiveType::*;
        if self == target {
            return true;
        }
        matches!(
            (self, target),
            (Byte, Short | Int | Long | Float | Double)
                | (Short, Int | Long | Float | Double)
                | (Char, Int | Long | Float | Double)
                | (Int, Long | Float | Double)
                | (Long, Float | Double)
                | (Float, Double)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassType {
    pub def: ClassId,
    pub args: Vec<Type>,
}

/// A type variable together with its (erased) upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeVar {
    pub name: Name,
    pub bound: Option<Box<Type>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Void,
    Null,
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<Type>),
    TypeVar(TypeVar),
    /// A type referenced by name that is not present in the environment.
    Named(String),
    Unknown,
}

impl Type {
    pub fn class(def: ClassId, args: Vec<Type>) -> Type {
        Type::Class(ClassType { def, args })
    }

    pub fn array(element: Type) -> Type {
        Type::Array(Box::new(element))
    }

    pub fn type_var(name: impl Into<Name>, bound: Option<Type>) -> Type {
        Type::TypeVar(TypeVar {
            name: name.into(),
            bound: bound.map(Box::new),
        })
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Type::Class(_) | Type::Array(_) | Type::TypeVar(_) | Type::Null | Type::Named(_)
        )
    }

    /// `true` for types that could not be resolved.
    pub fn is_erroneous(&self) -> bool {
        matches!(self, Type::Named(_) | Type::Unknown)
    }

    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            Type::Class(ct) => Some(ct.def),
            _ => None,
        }
    }

    pub fn array_element(&self) -> Option<&Type> {
        match self {
            Type::Array(elem) => Some(elem),
            _ => None,
        }
    }
}

/// Declaration modifiers plus a few flags the completion engine needs to see.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(u16);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const PUBLIC: Modifiers = Modifiers(1 << 0);
    pub const PRIVATE: Modifiers = Modifiers(1 << 1);
    pub const PROTECTED: Modifiers = Modifiers(1 << 2);
    pub const STATIC: Modifiers = Modifiers(1 << 3);
    pub const FINAL: Modifiers = Modifiers(1 << 4);
    pub const ABSTRACT: Modifiers = Modifiers(1 << 5);
    pub const DEFAULT: Modifiers = Modifiers(1 << 6);
    pub const DEPRECATED: Modifiers = Modifiers(1 << 7);
    /// Implicitly declared by the language (enum `values`, record accessors, ...).
    pub const MANDATED: Modifiers = Modifiers(1 << 8);
    /// An enum constant.
    pub const ENUM: Modifiers = Modifiers(1 << 9);
    pub const VARARGS: Modifiers = Modifiers(1 << 10);

    const NAMES: [(Modifiers, &'static str); 11] = [
        (Modifiers::PUBLIC, "public"),
        (Modifiers::PRIVATE, "private"),
        (Modifiers::PROTECTED, "protected"),
        (Modifiers::STATIC, "static"),
        (Modifiers::FINAL, "final"),
        (Modifiers::ABSTRACT, "abstract"),
        (Modifiers::DEFAULT, "default"),
        (Modifiers::DEPRECATED, "deprecated"),
        (Modifiers::MANDATED, "mandated"),
        (Modifiers::ENUM, "enum"),
        (Modifiers::VARARGS, "varargs"),
    ];

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    pub fn is_static(self) -> bool {
        self.contains(Modifiers::STATIC)
    }

    pub fn is_final(self) -> bool {
        self.contains(Modifiers::FINAL)
    }

    pub fn is_abstract(self) -> bool {
        self.contains(Modifiers::ABSTRACT)
    }

    pub fn is_deprecated(self) -> bool {
        self.contains(Modifiers::DEPRECATED)
    }

    pub fn is_private(self) -> bool {
        self.contains(Modifiers::PRIVATE)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        self.union(rhs)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (flag, name) in Modifiers::NAMES {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

/// Workspace-level access rule verdict, independent of language visibility.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    Accessible,
    Discouraged,
    NonAccessible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

impl ClassKind {
    pub fn is_interface_like(self) -> bool {
        matches!(self, ClassKind::Interface | ClassKind::Annotation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: Name,
    pub ty: Type,
    pub modifiers: Modifiers,
    pub access: Accessibility,
}

impl FieldDef {
    pub fn new(name: impl Into<Name>, ty: Type, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers,
            access: Accessibility::Accessible,
        }
    }

    pub fn is_enum_constant(&self) -> bool {
        self.modifiers.contains(Modifiers::ENUM)
    }

    /// A `static final` field.
    pub fn is_constant(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC | Modifiers::FINAL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: Name,
    pub type_params: Vec<Name>,
    pub params: Vec<Type>,
    pub param_names: Vec<Name>,
    pub return_type: Type,
    pub modifiers: Modifiers,
    pub access: Accessibility,
}

impl MethodDef {
    pub fn new(name: impl Into<Name>, params: Vec<Type>, return_type: Type) -> Self {
        let param_names = (0..params.len())
            .map(|idx| Name::new(format!("arg{idx}")))
            .collect();
        Self {
            name: name.into(),
            type_params: Vec::new(),
            params,
            param_names,
            return_type,
            modifiers: Modifiers::PUBLIC,
            access: Accessibility::Accessible,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_param_names(mut self, names: &[&str]) -> Self {
        self.param_names = names.iter().map(|n| Name::from(*n)).collect();
        self
    }

    #[must_use]
    pub fn with_access(mut self, access: Accessibility) -> Self {
        self.access = access;
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDef {
    pub params: Vec<Type>,
    pub param_names: Vec<Name>,
    pub modifiers: Modifiers,
    pub access: Accessibility,
}

impl ConstructorDef {
    pub fn new(params: Vec<Type>, modifiers: Modifiers) -> Self {
        let param_names = (0..params.len())
            .map(|idx| Name::new(format!("arg{idx}")))
            .collect();
        Self {
            params,
            param_names,
            modifiers,
            access: Accessibility::Accessible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordComponent {
    pub name: Name,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    /// Fully-qualified source name (`java.util.Map.Entry`).
    pub name: QualifiedName,
    pub package: PackageName,
    pub enclosing: Option<ClassId>,
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    pub access: Accessibility,
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
    pub type_params: Vec<Name>,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
    pub constructors: Vec<ConstructorDef>,
    pub member_types: Vec<ClassId>,
    pub record_components: Vec<RecordComponent>,
}

impl ClassDef {
    /// A top-level type; the package is everything before the last segment.
    pub fn new(name: &str, kind: ClassKind) -> Self {
        let name = QualifiedName::from_dotted(name);
        let package = name.parent().unwrap_or_default();
        Self {
            name,
            package,
            enclosing: None,
            kind,
            modifiers: Modifiers::PUBLIC,
            access: Accessibility::Accessible,
            super_class: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            member_types: Vec::new(),
            record_components: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_access(mut self, access: Accessibility) -> Self {
        self.access = access;
        self
    }

    #[must_use]
    pub fn with_super(mut self, super_class: Type) -> Self {
        self.super_class = Some(super_class);
        self
    }

    #[must_use]
    pub fn with_interface(mut self, iface: Type) -> Self {
        self.interfaces.push(iface);
        self
    }

    #[must_use]
    pub fn with_type_params(mut self, params: &[&str]) -> Self {
        self.type_params = params.iter().map(|p| Name::from(*p)).collect();
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, ctor: ConstructorDef) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Enum constants are typed as the enum itself once the class is added to a store.
    #[must_use]
    pub fn with_enum_constants(mut self, names: &[&str]) -> Self {
        for name in names {
            self.fields.push(FieldDef::new(
                *name,
                Type::Unknown,
                Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL | Modifiers::ENUM,
            ));
        }
        self
    }

    #[must_use]
    pub fn with_record_component(mut self, name: &str, ty: Type) -> Self {
        self.record_components.push(RecordComponent {
            name: Name::from(name),
            ty,
        });
        self
    }

    pub fn simple_name(&self) -> &str {
        self.name.last().map(Name::as_str).unwrap_or("")
    }

    pub fn is_interface(&self) -> bool {
        self.kind.is_interface_like()
    }

    pub fn is_abstract(&self) -> bool {
        self.is_interface() || self.modifiers.is_abstract()
    }

    pub fn is_deprecated(&self) -> bool {
        self.modifiers.is_deprecated()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldRef {
    pub class: ClassId,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodRef {
    pub class: ClassId,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstructorRef {
    pub class: ClassId,
    pub index: u32,
}

/// Ids of the types the language itself refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub object: ClassId,
    pub string: ClassId,
    pub cloneable: ClassId,
    pub serializable: ClassId,
    pub enum_: ClassId,
    pub record: ClassId,
    pub throwable: ClassId,
    pub exception: ClassId,
    pub(crate) boxes: [ClassId; 8],
}

impl WellKnownTypes {
    pub fn boxed(&self, primitive: PrimitiveType) -> ClassId {
        self.boxes[primitive.index()]
    }

    pub fn unboxed(&self, class: ClassId) -> Option<PrimitiveType> {
        PrimitiveType::ALL
            .into_iter()
            .find(|p| self.boxes[p.index()] == class)
    }
}

pub trait TypeEnv {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;

    /// Resolve a fully-qualified name. Simple names of `java.lang` types resolve implicitly.
    fn lookup_class(&self, name: &str) -> Option<ClassId>;

    fn well_known(&self) -> &WellKnownTypes;

    fn field(&self, field: FieldRef) -> Option<&FieldDef> {
        self.class(field.class)?.fields.get(field.index as usize)
    }

    fn method(&self, method: MethodRef) -> Option<&MethodDef> {
        self.class(method.class)?.methods.get(method.index as usize)
    }

    fn constructor(&self, ctor: ConstructorRef) -> Option<&ConstructorDef> {
        self.class(ctor.class)?.constructors.get(ctor.index as usize)
    }
}
