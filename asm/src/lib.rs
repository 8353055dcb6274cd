//! Two-pass assembler: pass 1 builds the symbol table, pass 2 encodes every
//! recorded line through the shared EDK kernel. Assembly never aborts on
//! the first bad line — every failure is collected and the line encodes as
//! a zero word so addresses downstream stay correct.

mod encode;
mod error;
mod lexer;
mod mnemonic;
mod operand;
mod symtab;

pub use error::{AssembleError, AssembleErrorKind};

use edk::Word;

pub struct AssembleOutput {
    pub words: Vec<Word>,
    pub errors: Vec<AssembleError>,
}

pub fn assemble(source: &str) -> AssembleOutput {
    let (recorded, symbols, mut errors) = lexer::pass1(source);
    let mut words = Vec::with_capacity(recorded.len());

    for line in &recorded {
        match encode::assemble_line(line, &symbols) {
            Ok(word) => words.push(word),
            Err(kind) => {
                errors.push(AssembleError {
                    line: line.line_no,
                    kind,
                });
                words.push(0);
            }
        }
    }

    AssembleOutput { words, errors }
}
