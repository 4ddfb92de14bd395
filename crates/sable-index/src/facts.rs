use sable_core::{Name, PackageName, QualifiedName};
use sable_types::{Accessibility, ClassKind, Modifiers};
use serde::{Deserialize, Serialize};

fn default_kind() -> ClassKind {
    ClassKind::Class
}

/// A type reported by the index, not yet checked against imports or scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcceptedType {
    #[serde(default)]
    pub package: PackageName,
    /// Outermost first; empty for top-level types.
    #[serde(default)]
    pub enclosing_types: Vec<Name>,
    pub simple_name: Name,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default = "default_kind")]
    pub kind: ClassKind,
    #[serde(default)]
    pub access: Accessibility,
}

impl AcceptedType {
    /// A public top-level class named by its fully-qualified name.
    pub fn new(fully_qualified: &str, kind: ClassKind) -> Self {
        let name = QualifiedName::from_dotted(fully_qualified);
        Self {
            package: name.parent().unwrap_or_default(),
            enclosing_types: Vec::new(),
            simple_name: name.last().cloned().unwrap_or_else(|| Name::new("")),
            modifiers: Modifiers::PUBLIC,
            kind,
            access: Accessibility::Accessible,
        }
    }

    /// Package followed by the enclosing types: the name a member type is qualified with.
    pub fn container(&self) -> QualifiedName {
        self.package
            .join(&QualifiedName::new(self.enclosing_types.clone()))
    }

    pub fn fully_qualified_name(&self) -> QualifiedName {
        self.container().child(self.simple_name.clone())
    }

    /// Fully-qualified name of the outermost type (the fact itself when top-level).
    pub fn top_level_name(&self) -> QualifiedName {
        match self.enclosing_types.first() {
            Some(outer) => self.package.child(outer.clone()),
            None => self.fully_qualified_name(),
        }
    }

    /// `Outer.Inner` for member types, the simple name otherwise.
    pub fn type_qualified_name(&self) -> String {
        let mut out = String::new();
        for outer in &self.enclosing_types {
            out.push_str(outer.as_str());
            out.push('.');
        }
        out.push_str(self.simple_name.as_str());
        out
    }

    pub fn is_member_type(&self) -> bool {
        !self.enclosing_types.is_empty()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
            || (self.is_member_type() && !matches!(self.kind, ClassKind::Class))
    }

    pub fn is_abstract(&self) -> bool {
        self.kind.is_interface_like() || self.modifiers.is_abstract()
    }

    pub fn is_deprecated(&self) -> bool {
        self.modifiers.is_deprecated()
    }
}

/// A constructor reported by the index, together with its declaring type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcceptedConstructor {
    pub declaring: AcceptedType,
    /// Parameter types as written in source (`int`, `java.lang.String`).
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub param_names: Vec<Name>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub access: Accessibility,
}

impl AcceptedConstructor {
    pub fn new(declaring: AcceptedType, params: &[&str]) -> Self {
        Self {
            declaring,
            params: params.iter().map(|p| p.to_string()).collect(),
            param_names: (0..params.len())
                .map(|idx| Name::new(format!("arg{idx}")))
                .collect(),
            modifiers: Modifiers::PUBLIC,
            access: Accessibility::Accessible,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
