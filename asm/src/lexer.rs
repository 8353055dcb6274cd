use crate::error::{AssembleError, AssembleErrorKind};
use crate::symtab::SymbolTable;
use edk::Address;

/// One instruction-bearing line, carried from pass 1 into pass 2 with its
/// resolved address already known.
pub struct RecordedLine {
    pub address: Address,
    pub line_no: usize,
    pub mnemonic: String,
    pub operands: String,
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(i) => &line[..i],
        None => line,
    }
}

/// Splits a source listing into the address-bearing lines (mnemonic +
/// raw operand text) and the symbol table built from their labels.
/// Directive lines (leading `.`), blank lines, and label-only lines
/// contribute no address.
pub fn pass1(source: &str) -> (Vec<RecordedLine>, SymbolTable, Vec<AssembleError>) {
    let mut recorded = Vec::new();
    let mut symbols = SymbolTable::new();
    let mut errors = Vec::new();
    let mut address: Address = 0;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() || line.starts_with('.') {
            continue;
        }

        let (label, rest) = match line.find(':') {
            Some(i) => (Some(line[..i].trim()), line[i + 1..].trim()),
            None => (None, line),
        };

        if let Some(name) = label {
            if symbols.insert(name, address).is_some() {
                errors.push(AssembleError {
                    line: line_no,
                    kind: AssembleErrorKind::DuplicateLabel(name.to_string()),
                });
            }
        }

        if rest.is_empty() {
            continue;
        }

        let (mnemonic, operands) = match rest.find(char::is_whitespace) {
            Some(i) => (&rest[..i], rest[i..].trim()),
            None => (rest, ""),
        };

        recorded.push(RecordedLine {
            address,
            line_no,
            mnemonic: mnemonic.to_string(),
            operands: operands.to_string(),
        });
        address += 4;
    }

    (recorded, symbols, errors)
}

/// Splits operand text on any run of commas and whitespace. Used by the
/// data-processing and branch groups; load/store parses its own bracketed
/// form directly against the raw text instead (see `encode::load_store`).
pub fn tokenize_operands(operands: &str) -> Vec<&str> {
    operands
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn labels_do_not_advance_address() {
        let (recorded, symbols, errors) = pass1("loop:\n  ADD R0, R0, #1\n  B loop\n");
        assert!(errors.is_empty());
        assert_eq!(symbols.get("loop"), Some(0));
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].address, 0);
        assert_eq!(recorded[1].address, 4);
    }

    #[test]
    fn duplicate_label_reported() {
        let (_, _, errors) = pass1("a: MOV R0, #1\na: MOV R1, #2\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].kind,
            AssembleErrorKind::DuplicateLabel("a".to_string())
        );
    }

    #[test]
    fn comments_and_directives_are_skipped() {
        let (recorded, _, _) = pass1(".text\n; a comment\nMOV R0, #1 ; trailing\n");
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].operands, "R0, #1");
    }

    #[test]
    fn tokenizer_splits_on_commas_and_whitespace() {
        assert_eq!(tokenize_operands("R0,  R1,R2"), vec!["R0", "R1", "R2"]);
    }
}
