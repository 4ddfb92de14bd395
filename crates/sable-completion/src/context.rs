use sable_core::text::{completion_prefix, TextRange};
use sable_core::{Name, PackageName};
use sable_resolve::ScopeId;
use sable_types::{ClassId, Type};

/// How a candidate's type must relate to an expected type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TypeFilter {
    /// The candidate may be a subtype of the expected type (assignment context).
    #[default]
    Subtype,
    /// The candidate may be a supertype (`catch` clauses, cast targets).
    Supertype,
    Exact,
}

/// Types the surrounding context requires or prefers, most likely first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedTypes {
    pub types: Vec<Type>,
    pub filter: TypeFilter,
}

impl ExpectedTypes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn subtypes_of(types: Vec<Type>) -> Self {
        Self {
            types,
            filter: TypeFilter::Subtype,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// The kind of type a position asks for, used for the kind bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKindHint {
    Class,
    Interface,
    Annotation,
    /// `throws`/`catch` positions.
    Exception,
    Enum,
}

/// What the cursor sits in, as decided by the caller's syntax analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionSite {
    /// A bare name in an expression or statement.
    Name,
    /// `expr.|`. `receiver_name` is set when the receiver is a simple variable,
    /// which lets `instanceof` narrowing synthesize a casted receiver.
    MemberAccess {
        receiver: Type,
        receiver_name: Option<Name>,
    },
    /// `Type.|`
    StaticMemberAccess { class: ClassId },
    /// `super.|`
    SuperAccess,
    /// `case |` in a switch over `switch_type`.
    CaseLabel { switch_type: Type },
    /// `new |`
    Allocation,
    /// A position where only a type can be written.
    TypeReference,
    /// `java.ut|`: packages and types below a package qualifier.
    QualifiedName { qualifier: PackageName },
    /// `break |` / `continue |`
    Label,
    /// No completable construct at the cursor.
    None,
}

impl CompletionSite {
    /// Short tag used in logs and failure reports.
    pub fn tag(&self) -> &'static str {
        match self {
            CompletionSite::Name => "name",
            CompletionSite::MemberAccess { .. } => "member_access",
            CompletionSite::StaticMemberAccess { .. } => "static_member_access",
            CompletionSite::SuperAccess => "super_access",
            CompletionSite::CaseLabel { .. } => "case_label",
            CompletionSite::Allocation => "allocation",
            CompletionSite::TypeReference => "type_reference",
            CompletionSite::QualifiedName { .. } => "qualified_name",
            CompletionSite::Label => "label",
            CompletionSite::None => "none",
        }
    }

    pub(crate) fn wants_types(&self) -> bool {
        matches!(
            self,
            CompletionSite::Name
                | CompletionSite::TypeReference
                | CompletionSite::Allocation
                | CompletionSite::QualifiedName { .. }
        )
    }

    pub(crate) fn wants_packages(&self) -> bool {
        matches!(
            self,
            CompletionSite::Name | CompletionSite::TypeReference | CompletionSite::QualifiedName { .. }
        )
    }
}

/// Everything one completion request knows about the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Identifier fragment before the cursor.
    pub token: String,
    pub replace_range: TextRange,
    /// Innermost scope containing the cursor.
    pub scope: ScopeId,
    pub site: CompletionSite,
    pub expected: ExpectedTypes,
    /// Types being declared at the cursor; never proposed.
    pub forbidden: Vec<ClassId>,
    /// Variables that would be pointless to propose, such as the one being initialized.
    pub uninteresting: Vec<Name>,
    pub inside_qualified_reference: bool,
    pub type_kind_hint: Option<TypeKindHint>,
}

impl CompletionRequest {
    pub fn new(token: impl Into<String>, scope: ScopeId, site: CompletionSite) -> Self {
        let token = token.into();
        let len = u32::try_from(token.len()).unwrap_or(u32::MAX);
        Self {
            token,
            replace_range: TextRange::new(0.into(), len.into()),
            scope,
            site,
            expected: ExpectedTypes::none(),
            forbidden: Vec::new(),
            uninteresting: Vec::new(),
            inside_qualified_reference: false,
            type_kind_hint: None,
        }
    }

    /// Take the token and replace range from the identifier before `offset` in `text`.
    pub fn at_offset(text: &str, offset: usize, scope: ScopeId, site: CompletionSite) -> Self {
        let prefix = completion_prefix(text, offset);
        Self {
            replace_range: prefix.range,
            ..Self::new(prefix.token, scope, site)
        }
    }

    #[must_use]
    pub fn with_expected(mut self, expected: ExpectedTypes) -> Self {
        self.expected = expected;
        self
    }

    #[must_use]
    pub fn with_forbidden(mut self, class: ClassId) -> Self {
        self.forbidden.push(class);
        self
    }

    #[must_use]
    pub fn with_uninteresting(mut self, name: impl Into<Name>) -> Self {
        self.uninteresting.push(name.into());
        self
    }

    #[must_use]
    pub fn with_type_kind_hint(mut self, hint: TypeKindHint) -> Self {
        self.type_kind_hint = Some(hint);
        self
    }

    #[must_use]
    pub fn inside_qualified_reference(mut self) -> Self {
        self.inside_qualified_reference = true;
        self
    }

    pub fn is_uninteresting(&self, name: &str) -> bool {
        self.uninteresting.iter().any(|n| n == name)
    }
}
