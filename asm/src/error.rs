use std::fmt;

/// Everything that can go wrong assembling one line, independent of whether
/// it was caught by lexing, operand parsing, or the EDK encoder itself.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AssembleErrorKind {
    InvalidRegister(String),
    InvalidImmediate(String),
    MalformedOperand(String),
    UnknownMnemonic(String),
    DuplicateLabel(String),
    RegisterOutOfRange(u32),
    ImmediateOverflow(u32),
    OffsetOutOfRange(i64),
}

impl fmt::Display for AssembleErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssembleErrorKind::InvalidRegister(s) => write!(f, "invalid register \"{}\"", s),
            AssembleErrorKind::InvalidImmediate(s) => write!(f, "invalid immediate \"{}\"", s),
            AssembleErrorKind::MalformedOperand(s) => write!(f, "malformed operand \"{}\"", s),
            AssembleErrorKind::UnknownMnemonic(s) => write!(f, "unknown mnemonic \"{}\"", s),
            AssembleErrorKind::DuplicateLabel(s) => write!(f, "duplicate label \"{}\"", s),
            AssembleErrorKind::RegisterOutOfRange(n) => write!(f, "register R{} out of range", n),
            AssembleErrorKind::ImmediateOverflow(v) => {
                write!(f, "immediate {} does not fit the operand2 field", v)
            }
            AssembleErrorKind::OffsetOutOfRange(o) => write!(f, "offset {} out of range", o),
        }
    }
}

impl From<edk::Error> for AssembleErrorKind {
    fn from(err: edk::Error) -> Self {
        match err {
            edk::Error::RegisterOutOfRange(n) => AssembleErrorKind::RegisterOutOfRange(n as u32),
            edk::Error::ImmediateOverflow(v) => AssembleErrorKind::ImmediateOverflow(v),
            edk::Error::OffsetOutOfRange(o) => AssembleErrorKind::OffsetOutOfRange(o),
        }
    }
}

/// One failed line. Assembly never stops at the first error: every failing
/// line is reported and encoded as a zero word so later lines (and their
/// addresses) stay meaningful.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AssembleError {
    pub line: usize,
    pub kind: AssembleErrorKind,
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}
