//! Bit-exact encoder/decoder kernel for the ARM7 instruction word format.
//!
//! Every function here is pure: given the same arguments it always
//! produces the same word (or the same decoded fields), and it never
//! touches the filesystem or a clock. The assembler, linker and
//! disassembler all delegate their bit arrangement to this crate so the
//! three stay mutually consistent by construction — there is exactly one
//! place that knows where `Rd` lives in a data-processing word.

pub mod branch;
mod condition;
pub mod constants;
pub mod dataprocessing;
mod decode;
mod error;
pub mod loadstore;
mod register;

pub use branch::{
    branch_offset_words, branch_target, encode_branch, encode_branch_placeholder,
    patch_branch_offset, sign_extend_24, BranchFields,
};
pub use condition::{Condition, MNEMONIC_SUFFIXES};
pub use dataprocessing::{
    decode_data_processing, encode_data_processing, encode_dp_immediate, rotate_right,
    DataProcessingFields, DpOpcode, Operand2, ShiftType,
};
pub use decode::{decode, Decoded};
pub use error::{Error, Result};
pub use loadstore::{
    decode_block_transfer, decode_multiply, decode_single_transfer, decode_software_interrupt,
    encode_load_store, BlockTransferFields, MultiplyFields, SingleTransferFields,
    SoftwareInterruptFields,
};
pub use register::RegisterId;

/// A 32-bit ARM7 instruction word.
pub type Word = u32;

/// A byte address in the linked image's address space.
pub type Address = u32;
