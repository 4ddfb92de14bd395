use sable_core::text::TextRange;
use sable_types::{erasure, format_method, format_type, Accessibility, Modifiers, Type, TypeEnv};

use crate::candidate::{AllocationStyle, Candidate, CandidateKind, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProposalKind {
    Local,
    Field,
    Method,
    Constructor,
    /// `new Type() { ... }`
    AnonymousClass,
    Type,
    Package,
    Module,
    Label,
    Keyword,
}

/// One finished completion. Immutable once handed to the requestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub kind: ProposalKind,
    /// Text inserted over `replace`, qualifier included.
    pub completion: String,
    /// Label shown for the proposal: the bare name.
    pub name: String,
    pub replace: TextRange,
    pub relevance: u32,
    /// Fully-qualified name of the declaring type.
    pub declaring: Option<String>,
    /// `max(int a, int b) : int`, `length : int`, ...
    pub signature: Option<String>,
    /// Name plus erased parameter types; together with `declaring` this identifies the symbol.
    pub key: String,
    pub modifiers: Modifiers,
    pub access: Accessibility,
    /// Qualifier text the proposal was forced to carry.
    pub qualification: Option<String>,
    pub required_import: Option<String>,
    pub allocation: Option<AllocationStyle>,
    /// Proposed from a guessed receiver type.
    pub missing: bool,
}

impl Proposal {
    pub fn is_qualified(&self) -> bool {
        self.qualification.is_some()
    }

    /// `(declaring type, erased signature)`.
    pub fn identity(&self) -> (Option<&str>, &str) {
        (self.declaring.as_deref(), self.key.as_str())
    }
}

/// Turn a scored candidate into the immutable proposal handed to the requestor.
pub(crate) fn build_proposal(
    candidate: &Candidate,
    relevance: u32,
    replace: TextRange,
    env: &dyn TypeEnv,
) -> Proposal {
    let kind = proposal_kind(candidate);
    let name = candidate.name.to_string();
    let text = match candidate.kind {
        CandidateKind::Method | CandidateKind::Constructor => format!("{name}()"),
        _ => name.clone(),
    };
    let completion = match &candidate.qualifier {
        Some(qualifier) => format!("{qualifier}.{text}"),
        None => text,
    };
    let declaring = match candidate.kind {
        CandidateKind::Type | CandidateKind::Constructor => {
            candidate.type_name(env).map(|n| n.to_dotted())
        }
        _ => candidate
            .declaring
            .and_then(|id| env.class(id))
            .map(|def| def.name.to_dotted()),
    };
    Proposal {
        kind,
        completion,
        signature: signature(candidate, env),
        key: key(candidate, env),
        name,
        replace,
        relevance,
        declaring,
        modifiers: candidate.modifiers,
        access: candidate.access,
        qualification: candidate.qualifier.clone(),
        required_import: candidate.required_import.clone(),
        allocation: candidate.allocation,
        missing: candidate.missing,
    }
}

pub(crate) fn proposal_kind(candidate: &Candidate) -> ProposalKind {
    match candidate.kind {
        CandidateKind::Local => ProposalKind::Local,
        CandidateKind::Field => ProposalKind::Field,
        CandidateKind::Method => ProposalKind::Method,
        CandidateKind::Constructor if candidate.allocation == Some(AllocationStyle::Anonymous) => {
            ProposalKind::AnonymousClass
        }
        CandidateKind::Constructor => ProposalKind::Constructor,
        CandidateKind::Type => ProposalKind::Type,
        CandidateKind::Package => ProposalKind::Package,
        CandidateKind::Module => ProposalKind::Module,
        CandidateKind::Label => ProposalKind::Label,
        CandidateKind::Keyword => ProposalKind::Keyword,
    }
}

fn signature(candidate: &Candidate, env: &dyn TypeEnv) -> Option<String> {
    let name = &candidate.name;
    match &candidate.symbol {
        Symbol::Local { ty, .. } => Some(format!("{name} : {}", format_type(env, ty))),
        Symbol::Field(_) | Symbol::ArrayLength => {
            Some(format!("{name} : {}", format_type(env, &candidate.ty)))
        }
        Symbol::Method(method) => env.method(*method).map(|def| format_method(env, def)),
        Symbol::ArrayClone(array) => Some(format!("clone() : {}", format_type(env, array))),
        Symbol::Constructor(ctor) => env.constructor(*ctor).map(|def| {
            let params: Vec<String> = def.params.iter().map(|p| format_type(env, p)).collect();
            format!("{name}({})", params.join(", "))
        }),
        Symbol::IndexedConstructor(ctor) => Some(format!("{name}({})", ctor.params.join(", "))),
        Symbol::Type(_) | Symbol::IndexedType(_) if candidate.kind == CandidateKind::Constructor => {
            Some(format!("{name}()"))
        }
        Symbol::Type(_) | Symbol::IndexedType(_) => candidate.type_name(env).map(|n| n.to_dotted()),
        Symbol::Package(package) => Some(package.to_dotted()),
        Symbol::Label | Symbol::Keyword => None,
    }
}

/// Name plus erased parameter types; the fully-qualified name for types.
fn key(candidate: &Candidate, env: &dyn TypeEnv) -> String {
    let erased = |params: &[Type]| -> String {
        params
            .iter()
            .map(|p| format_type(env, &erasure(env, p)))
            .collect::<Vec<_>>()
            .join(",")
    };
    match &candidate.symbol {
        Symbol::Method(method) => match env.method(*method) {
            Some(def) => format!("{}({})", def.name, erased(&def.params)),
            None => candidate.name.to_string(),
        },
        Symbol::ArrayClone(_) => "clone()".to_string(),
        Symbol::Constructor(ctor) => match env.constructor(*ctor) {
            Some(def) => format!("<init>({})", erased(&def.params)),
            None => "<init>()".to_string(),
        },
        Symbol::IndexedConstructor(ctor) => format!("<init>({})", ctor.params.join(",")),
        Symbol::Type(_) | Symbol::IndexedType(_) if candidate.kind == CandidateKind::Constructor => {
            "<init>()".to_string()
        }
        Symbol::Type(_) | Symbol::IndexedType(_) => candidate
            .type_name(env)
            .map(|n| n.to_dotted())
            .unwrap_or_else(|| candidate.name.to_string()),
        Symbol::Package(package) => package.to_dotted(),
        Symbol::Local { .. }
        | Symbol::Field(_)
        | Symbol::ArrayLength
        | Symbol::Label
        | Symbol::Keyword => candidate.name.to_string(),
    }
}
