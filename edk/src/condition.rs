use num_derive::{FromPrimitive, ToPrimitive};
use std::fmt;
use util::EnumFromStr;
use util_derive::EnumFromStr;

/// 4-bit condition predicate in bits 31..28 of every instruction word.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive, EnumFromStr)]
pub enum Condition {
    EQ,
    NE,
    CS,
    CC,
    MI,
    PL,
    VS,
    VC,
    HI,
    LS,
    GE,
    LT,
    GT,
    LE,
    AL,
    NV,
}

/// The 14 suffixes the assembler accepts, in the fixed order the spec uses
/// for longest-match lookup. `AL` is accepted implicitly (no suffix) and
/// `NV` is never emitted by the assembler, only displayed by the
/// disassembler.
pub const MNEMONIC_SUFFIXES: [(&str, Condition); 14] = [
    ("EQ", Condition::EQ),
    ("NE", Condition::NE),
    ("CS", Condition::CS),
    ("CC", Condition::CC),
    ("MI", Condition::MI),
    ("PL", Condition::PL),
    ("VS", Condition::VS),
    ("VC", Condition::VC),
    ("HI", Condition::HI),
    ("LS", Condition::LS),
    ("GE", Condition::GE),
    ("LT", Condition::LT),
    ("GT", Condition::GT),
    ("LE", Condition::LE),
];

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Condition::AL => write!(f, ""),
            Condition::NV => write!(f, "NV"),
            other => {
                let (name, _) = MNEMONIC_SUFFIXES
                    .iter()
                    .find(|(_, cond)| cond == other)
                    .expect("every non-AL/NV condition has a mnemonic suffix");
                write!(f, "{}", name)
            }
        }
    }
}
