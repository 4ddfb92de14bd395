use std::fmt::Write;

use sable_core::Name;

use crate::{erasure, MethodDef, Type, TypeEnv};

/// A method name with erased parameter types, the identity used for override
/// and hiding comparisons. Fields have no parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErasedSignature {
    pub name: Name,
    pub params: Option<Vec<Type>>,
}

impl ErasedSignature {
    pub fn field(name: Name) -> Self {
        Self { name, params: None }
    }
}

pub fn erased_signature(env: &dyn TypeEnv, method: &MethodDef) -> ErasedSignature {
    ErasedSignature {
        name: method.name.clone(),
        params: Some(method.params.iter().map(|p| erasure(env, p)).collect()),
    }
}

/// `true` if `a` has the same name as `b` and its parameters match either `b`'s
/// declared parameters or their erasure.
pub fn is_subsignature(env: &dyn TypeEnv, a: &MethodDef, b: &MethodDef) -> bool {
    if a.name != b.name || a.params.len() != b.params.len() {
        return false;
    }
    if a.params == b.params {
        return true;
    }
    a.params
        .iter()
        .zip(&b.params)
        .all(|(x, y)| erasure(env, x) == erasure(env, y))
}

/// Render a type with simple class names: `Map<String, int[]>`.
pub fn format_type(env: &dyn TypeEnv, ty: &Type) -> String {
    let mut out = String::new();
    write_type(env, ty, &mut out);
    out
}

fn write_type(env: &dyn TypeEnv, ty: &Type, out: &mut String) {
    match ty {
        Type::Void => out.push_str("void"),
        Type::Null => out.push_str("null"),
        Type::Primitive(p) => out.push_str(p.keyword()),
        Type::Class(ct) => {
            match env.class(ct.def) {
                Some(def) => out.push_str(def.simple_name()),
                None => out.push('?'),
            }
            if !ct.args.is_empty() {
                out.push('<');
                for (idx, arg) in ct.args.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    write_type(env, arg, out);
                }
                out.push('>');
            }
        }
        Type::Array(elem) => {
            write_type(env, elem, out);
            out.push_str("[]");
        }
        Type::TypeVar(tv) => out.push_str(tv.name.as_str()),
        Type::Named(name) => {
            let simple = name.rsplit('.').next().unwrap_or(name);
            out.push_str(simple);
        }
        Type::Unknown => out.push('?'),
    }
}

/// `name(Type a, Type b) : Return`, the label shape completion lists use.
pub fn format_method(env: &dyn TypeEnv, method: &MethodDef) -> String {
    let mut out = String::new();
    out.push_str(method.name.as_str());
    out.push('(');
    for (idx, param) in method.params.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        write_type(env, param, &mut out);
        if let Some(name) = method.param_names.get(idx) {
            let _ = write!(out, " {name}");
        }
    }
    out.push_str(") : ");
    write_type(env, &method.return_type, &mut out);
    out
}
