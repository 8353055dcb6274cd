use std::fmt;

/// Failures while parsing an object record stream. Unlike linking proper
/// (which only warns), a malformed object aborts — there is no well-formed
/// partial object to keep going with.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ObjectParseError {
    UnknownDirective(String),
    MissingField { directive: &'static str, field: &'static str },
    InvalidHex(String),
    InvalidInteger(String),
    DataOutsideSection,
    UnsupportedRelocKind(String),
}

impl fmt::Display for ObjectParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectParseError::UnknownDirective(d) => write!(f, "unknown directive \"{}\"", d),
            ObjectParseError::MissingField { directive, field } => {
                write!(f, "{} directive is missing its {} field", directive, field)
            }
            ObjectParseError::InvalidHex(s) => write!(f, "invalid hex payload \"{}\"", s),
            ObjectParseError::InvalidInteger(s) => write!(f, "invalid integer \"{}\"", s),
            ObjectParseError::DataOutsideSection => {
                write!(f, "DATA directive before any SECTION directive")
            }
            ObjectParseError::UnsupportedRelocKind(k) => {
                write!(f, "unsupported relocation kind \"{}\"", k)
            }
        }
    }
}

impl std::error::Error for ObjectParseError {}

/// Non-fatal findings collected during linking. These are reported but
/// never abort the link — the image is still written.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LinkDiagnostic {
    DuplicateGlobal(String),
    UndefinedSymbol(String),
}

impl fmt::Display for LinkDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkDiagnostic::DuplicateGlobal(name) => {
                write!(f, "Warning: Duplicate global symbol '{}'", name)
            }
            LinkDiagnostic::UndefinedSymbol(name) => {
                write!(f, "Error: Undefined symbol '{}'", name)
            }
        }
    }
}
