use std::{error::Error as StdError, fmt};

/// Failure kinds produced by the kernel's pure encode/decode functions.
///
/// These are bit-layout failures only: a value did not fit the field it was
/// destined for. Nothing here is a parse error — text parsing is the
/// assembler's concern.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Error {
    RegisterOutOfRange(u8),
    ImmediateOverflow(u32),
    OffsetOutOfRange(i64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::RegisterOutOfRange(n) => write!(f, "register R{} is out of range", n),
            Error::ImmediateOverflow(v) => {
                write!(f, "immediate {} does not fit the available field width", v)
            }
            Error::OffsetOutOfRange(o) => write!(f, "offset {} does not fit the available field width", o),
        }
    }
}

impl StdError for Error {
    fn description(&self) -> &str {
        "ARM7 instruction encoding failed"
    }
}

pub type Result<T> = std::result::Result<T, Error>;
