/// Exception Taxonomy Module
///
/// The fixed DB-API exception hierarchy used to classify every failure this
/// crate reports. Kinds are a plain enum with a static parent table, so
/// "is this a DatabaseError?" is a walk over values rather than a dynamic
/// type check.
///
/// ```text
/// <base exception>
/// ├── Error
/// │   ├── InterfaceError
/// │   └── DatabaseError
/// │       ├── DataError
/// │       ├── OperationalError
/// │       ├── IntegrityError
/// │       ├── InternalError
/// │       ├── ProgrammingError
/// │       └── NotSupportedError
/// └── Warning
/// ```
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// One node of the exception hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExceptionKind {
    Error,
    Warning,
    InterfaceError,
    DatabaseError,
    DataError,
    OperationalError,
    IntegrityError,
    InternalError,
    ProgrammingError,
    NotSupportedError,
}

impl ExceptionKind {
    /// All kinds in declaration order. Parents always precede their children.
    pub const ALL: [ExceptionKind; 10] = [
        ExceptionKind::Error,
        ExceptionKind::Warning,
        ExceptionKind::InterfaceError,
        ExceptionKind::DatabaseError,
        ExceptionKind::DataError,
        ExceptionKind::OperationalError,
        ExceptionKind::IntegrityError,
        ExceptionKind::InternalError,
        ExceptionKind::ProgrammingError,
        ExceptionKind::NotSupportedError,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExceptionKind::Error => "Error",
            ExceptionKind::Warning => "Warning",
            ExceptionKind::InterfaceError => "InterfaceError",
            ExceptionKind::DatabaseError => "DatabaseError",
            ExceptionKind::DataError => "DataError",
            ExceptionKind::OperationalError => "OperationalError",
            ExceptionKind::IntegrityError => "IntegrityError",
            ExceptionKind::InternalError => "InternalError",
            ExceptionKind::ProgrammingError => "ProgrammingError",
            ExceptionKind::NotSupportedError => "NotSupportedError",
        }
    }

    /// Parent kind, or `None` when the parent is the host's generic exception type.
    pub fn parent(self) -> Option<ExceptionKind> {
        match self {
            ExceptionKind::Error | ExceptionKind::Warning => None,
            ExceptionKind::InterfaceError | ExceptionKind::DatabaseError => {
                Some(ExceptionKind::Error)
            }
            ExceptionKind::DataError
            | ExceptionKind::OperationalError
            | ExceptionKind::IntegrityError
            | ExceptionKind::InternalError
            | ExceptionKind::ProgrammingError
            | ExceptionKind::NotSupportedError => Some(ExceptionKind::DatabaseError),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExceptionKind::Error => {
                "Base class of all other error exceptions. Catch this to handle every error in one place."
            }
            ExceptionKind::Warning => {
                "Raised for important warnings such as data truncation while inserting."
            }
            ExceptionKind::InterfaceError => {
                "Raised for errors related to the database interface rather than the database itself."
            }
            ExceptionKind::DatabaseError => "Raised for errors related to the database.",
            ExceptionKind::DataError => {
                "Raised for errors caused by the processed data, e.g. division by zero or a numeric value out of range."
            }
            ExceptionKind::OperationalError => {
                "Raised for errors related to the database's operation and not necessarily under the programmer's control, e.g. an unexpected disconnect or a data source name that was not found."
            }
            ExceptionKind::IntegrityError => {
                "Raised when the relational integrity of the database is affected, e.g. a foreign key check fails."
            }
            ExceptionKind::InternalError => {
                "Raised when the database encounters an internal error, e.g. the cursor is no longer valid or the transaction is out of sync."
            }
            ExceptionKind::ProgrammingError => {
                "Raised for programming errors, e.g. table not found, SQL syntax error, or a wrong number of parameters."
            }
            ExceptionKind::NotSupportedError => {
                "Raised when a method or database API is used that the database does not support."
            }
        }
    }

    /// Iterates over `self` and then each ancestor up to the root.
    pub fn lineage(self) -> impl Iterator<Item = ExceptionKind> {
        std::iter::successors(Some(self), |kind| kind.parent())
    }

    /// True when `self` is `ancestor` or lies somewhere beneath it.
    pub fn is_a(self, ancestor: ExceptionKind) -> bool {
        self.lineage().any(|kind| kind == ancestor)
    }

    /// Classifies a five-character SQLSTATE.
    ///
    /// Exact codes are checked before two-character classes; anything
    /// unrecognised falls back to [`ExceptionKind::Error`].
    pub fn from_sqlstate(sqlstate: &str) -> ExceptionKind {
        const EXACT: &[(&str, ExceptionKind)] = &[
            ("0A000", ExceptionKind::NotSupportedError),
            ("40002", ExceptionKind::IntegrityError),
            ("HYT00", ExceptionKind::OperationalError),
            ("HYT01", ExceptionKind::OperationalError),
        ];
        const CLASSES: &[(&str, ExceptionKind)] = &[
            ("01", ExceptionKind::Warning),
            ("22", ExceptionKind::DataError),
            ("23", ExceptionKind::IntegrityError),
            ("24", ExceptionKind::ProgrammingError),
            ("25", ExceptionKind::ProgrammingError),
            ("42", ExceptionKind::ProgrammingError),
        ];

        let state = sqlstate.trim();
        if let Some((_, kind)) = EXACT
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(state))
        {
            return *kind;
        }
        let Some(class) = state.get(..2) else {
            return ExceptionKind::Error;
        };
        CLASSES
            .iter()
            .find(|(prefix, _)| prefix.eq_ignore_ascii_case(class))
            .map(|(_, kind)| *kind)
            .unwrap_or(ExceptionKind::Error)
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single entry fed to [`Taxonomy::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindDecl {
    pub kind: ExceptionKind,
    pub name: &'static str,
    pub parent: Option<ExceptionKind>,
    pub description: &'static str,
}

impl From<ExceptionKind> for KindDecl {
    fn from(kind: ExceptionKind) -> Self {
        KindDecl {
            kind,
            name: kind.name(),
            parent: kind.parent(),
            description: kind.description(),
        }
    }
}

/// Reasons a taxonomy declaration list is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaxonomyError {
    #[error("exception kind '{0}' is declared more than once")]
    Duplicate(&'static str),

    #[error("exception kind '{kind}' names parent '{parent}' before it is declared")]
    ParentNotDeclared {
        kind: &'static str,
        parent: &'static str,
    },

    #[error("exception kind '{kind}' is declared under the name '{name}'")]
    NameMismatch {
        kind: &'static str,
        name: &'static str,
    },

    #[error("exception kind '{kind}' declares parent {declared:?}, expected {expected:?}")]
    ParentMismatch {
        kind: &'static str,
        declared: Option<&'static str>,
        expected: Option<&'static str>,
    },

    #[error("exception kind '{0}' has an empty description")]
    MissingDescription(&'static str),
}

/// Registered node: the kind plus its declared attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct KindEntry {
    pub kind: ExceptionKind,
    pub parent: Option<ExceptionKind>,
    pub description: &'static str,
}

/// The immutable, fully validated exception hierarchy.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    entries: Vec<KindEntry>,
    by_name: HashMap<&'static str, usize>,
}

impl Taxonomy {
    /// Builds the standard ten-kind hierarchy.
    pub fn standard() -> Result<Taxonomy, TaxonomyError> {
        let decls: Vec<KindDecl> = ExceptionKind::ALL.iter().map(|k| KindDecl::from(*k)).collect();
        Taxonomy::build(&decls)
    }

    /// Registers every declaration in order.
    ///
    /// Either the whole list is accepted or nothing is returned; a failing
    /// declaration discards everything registered before it.
    pub fn build(decls: &[KindDecl]) -> Result<Taxonomy, TaxonomyError> {
        let mut entries: Vec<KindEntry> = Vec::with_capacity(decls.len());
        let mut by_name = HashMap::with_capacity(decls.len());

        for decl in decls {
            if decl.name != decl.kind.name() {
                return Err(TaxonomyError::NameMismatch {
                    kind: decl.kind.name(),
                    name: decl.name,
                });
            }
            if decl.parent != decl.kind.parent() {
                return Err(TaxonomyError::ParentMismatch {
                    kind: decl.name,
                    declared: decl.parent.map(ExceptionKind::name),
                    expected: decl.kind.parent().map(ExceptionKind::name),
                });
            }
            if by_name.contains_key(decl.name) {
                return Err(TaxonomyError::Duplicate(decl.name));
            }
            if decl.description.trim().is_empty() {
                return Err(TaxonomyError::MissingDescription(decl.name));
            }
            if let Some(parent) = decl.parent {
                if !by_name.contains_key(parent.name()) {
                    return Err(TaxonomyError::ParentNotDeclared {
                        kind: decl.name,
                        parent: parent.name(),
                    });
                }
            }

            by_name.insert(decl.name, entries.len());
            entries.push(KindEntry {
                kind: decl.kind,
                parent: decl.parent,
                description: decl.description,
            });
        }

        Ok(Taxonomy { entries, by_name })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks a kind up by its exported name (case-sensitive).
    pub fn lookup(&self, name: &str) -> Option<&KindEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[KindEntry] {
        &self.entries
    }

    /// Direct children of `parent` (`None` = the generic base), in declaration order.
    pub fn children(&self, parent: Option<ExceptionKind>) -> impl Iterator<Item = ExceptionKind> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.parent == parent)
            .map(|e| e.kind)
    }

    /// Renders the hierarchy as an indented tree.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_level(None, 0, &mut out);
        out.truncate(out.trim_end().len());
        out
    }

    fn render_level(&self, parent: Option<ExceptionKind>, depth: usize, out: &mut String) {
        for kind in self.children(parent) {
            out.push_str(&"  ".repeat(depth));
            out.push_str(kind.name());
            out.push('\n');
            self.render_level(Some(kind), depth + 1, out);
        }
    }
}
