use std::fmt;

/// Everything that can go wrong between a core AST and a probability.
/// All of these abandon the compilation; nothing is caught and retried.
#[derive(Clone, Eq, Hash, PartialEq, Debug)]
pub enum CompileError {
    UnknownIdent(String),
    UnknownFunction(String),
    ArityMismatch(String),
    ShapeMismatch(String),
    ProjectionError(String),
    DuplicateName(String),
    ZeroEvidence,
    Generic(String),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompileError::*;
        match self {
            UnknownIdent(s) => write!(f, "unknown identifier: {}", s),
            UnknownFunction(s) => write!(f, "unknown function: {}", s),
            ArityMismatch(s) => write!(f, "arity mismatch: {}", s),
            ShapeMismatch(s) => write!(f, "shape mismatch: {}", s),
            ProjectionError(s) => write!(f, "projection of a non-tuple: {}", s),
            DuplicateName(s) => write!(f, "duplicate name: {}", s),
            ZeroEvidence => write!(f, "evidence has probability zero"),
            Generic(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for CompileError {}

pub type Result<T> = core::result::Result<T, CompileError>;

pub fn unknown_ident<T>(x: &str) -> Result<T> {
    Err(CompileError::UnknownIdent(x.to_string()))
}
pub fn unknown_function<T>(x: &str) -> Result<T> {
    Err(CompileError::UnknownFunction(x.to_string()))
}
pub fn arity_mismatch<T>(s: &str) -> Result<T> {
    Err(CompileError::ArityMismatch(s.to_string()))
}
pub fn shape_mismatch<T>(s: &str) -> Result<T> {
    Err(CompileError::ShapeMismatch(s.to_string()))
}
pub fn projection<T>(s: &str) -> Result<T> {
    Err(CompileError::ProjectionError(s.to_string()))
}
pub fn duplicate<T>(s: &str) -> Result<T> {
    Err(CompileError::DuplicateName(s.to_string()))
}
pub fn generic<T>(s: &str) -> Result<T> {
    Err(CompileError::Generic(s.to_string()))
}
