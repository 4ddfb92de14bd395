use sable_core::{Name, QualifiedName};
use thiserror::Error;

/// The package every compilation unit imports on demand.
pub const IMPLICIT_PACKAGE: &str = "java.lang";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("empty import declaration")]
    Empty,
    #[error("static import `{0}` must name a member of a type")]
    StaticWithoutType(String),
    #[error("malformed import `{0}`")]
    Malformed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportMap {
    pub type_single: Vec<TypeSingleImport>,
    pub type_star: Vec<TypeStarImport>,
    pub static_single: Vec<StaticSingleImport>,
    pub static_star: Vec<StaticStarImport>,
}

/// `import a.b.C;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSingleImport {
    pub path: QualifiedName,
    pub imported: Name,
}

/// `import a.b.*;` where `a.b` is a package or a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeStarImport {
    pub path: QualifiedName,
}

/// `import static a.b.C.m;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSingleImport {
    pub ty: QualifiedName,
    pub member: Name,
}

/// `import static a.b.C.*;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticStarImport {
    pub ty: QualifiedName,
}

/// Where an on-demand import came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnDemandSource {
    /// `import a.b.*;`
    Type,
    /// `import static a.b.C.*;`
    Static,
    /// The implicit `java.lang.*`.
    Implicit,
}

impl ImportMap {
    /// Build from declarations written without the `import` keyword and `;`,
    /// e.g. `java.util.*` or `static java.lang.Math.max`.
    pub fn from_decls<'a>(
        decls: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ImportError> {
        let mut out = ImportMap::default();
        for decl in decls {
            out.push_decl(decl)?;
        }
        Ok(out)
    }

    pub fn push_decl(&mut self, decl: &str) -> Result<(), ImportError> {
        let decl = decl.trim();
        let decl = decl.strip_prefix("import ").unwrap_or(decl);
        let decl = decl.trim_end_matches(';').trim();
        if decl.is_empty() {
            return Err(ImportError::Empty);
        }

        let (is_static, path) = match decl.strip_prefix("static ") {
            Some(rest) => (true, rest.trim()),
            None => (false, decl),
        };
        let (is_star, path) = match path.strip_suffix(".*") {
            Some(rest) => (true, rest),
            None => (false, path),
        };
        if path.split('.').any(|seg| !sable_core::text::is_identifier(seg.trim())) {
            return Err(ImportError::Malformed(decl.to_string()));
        }
        let path = QualifiedName::from_dotted(path);

        match (is_static, is_star) {
            (false, false) => {
                let Some(imported) = path.last().cloned() else {
                    return Err(ImportError::Malformed(decl.to_string()));
                };
                self.type_single.push(TypeSingleImport { path, imported });
            }
            (false, true) => self.type_star.push(TypeStarImport { path }),
            (true, false) => {
                let (Some(ty), Some(member)) = (path.parent(), path.last().cloned()) else {
                    return Err(ImportError::StaticWithoutType(decl.to_string()));
                };
                self.static_single.push(StaticSingleImport { ty, member });
            }
            (true, true) => self.static_star.push(StaticStarImport { ty: path }),
        }
        Ok(())
    }

    /// The explicit single-type import declaring `simple`, if any.
    pub fn single_type(&self, simple: &str) -> Option<&TypeSingleImport> {
        self.type_single.iter().find(|i| i.imported == simple)
    }

    /// On-demand containers in declaration order, static ones after type ones,
    /// followed by the implicit package.
    pub fn on_demand(&self) -> Vec<(QualifiedName, OnDemandSource)> {
        let mut out: Vec<(QualifiedName, OnDemandSource)> = self
            .type_star
            .iter()
            .map(|i| (i.path.clone(), OnDemandSource::Type))
            .chain(
                self.static_star
                    .iter()
                    .map(|i| (i.ty.clone(), OnDemandSource::Static)),
            )
            .collect();
        let implicit = QualifiedName::from_dotted(IMPLICIT_PACKAGE);
        if !out.iter().any(|(path, _)| *path == implicit) {
            out.push((implicit, OnDemandSource::Implicit));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.type_single.is_empty()
            && self.type_star.is_empty()
            && self.static_single.is_empty()
            && self.static_star.is_empty()
    }
}
