use crate::error::AssembleErrorKind;
use crate::lexer::{tokenize_operands, RecordedLine};
use crate::mnemonic::decompose_mnemonic;
use crate::operand::{parse_immediate, parse_operand2, parse_register};
use crate::symtab::SymbolTable;
use edk::{Condition, DpOpcode, RegisterId, Word};
use std::str::FromStr;

/// Encodes one recorded line against the finished symbol table. The
/// returned error carries no address information; the caller attaches the
/// line number.
pub fn assemble_line(line: &RecordedLine, symbols: &SymbolTable) -> Result<Word, AssembleErrorKind> {
    let (base, cond, s_flag) = decompose_mnemonic(&line.mnemonic);

    match base.as_str() {
        "B" | "BL" => branch(base == "BL", cond, &line.operands, line.address, symbols),
        "LDR" | "STR" | "LDRB" | "STRB" => load_store(&base, cond, &line.operands),
        _ => match DpOpcode::from_str(&base) {
            Ok(opcode) => data_processing(opcode, s_flag, cond, &line.operands),
            Err(_) => Err(AssembleErrorKind::UnknownMnemonic(line.mnemonic.clone())),
        },
    }
}

fn zero_register() -> RegisterId {
    RegisterId::new(0).unwrap()
}

fn data_processing(
    opcode: DpOpcode,
    s_flag: bool,
    cond: Condition,
    operands: &str,
) -> Result<Word, AssembleErrorKind> {
    let tokens = tokenize_operands(operands);

    let (rd, rn, operand2, s) = if opcode.is_move() {
        let [rd_tok, op2_tok] = two(&tokens, operands)?;
        (parse_register(rd_tok)?, zero_register(), parse_operand2(op2_tok)?, s_flag)
    } else if opcode.is_test() {
        let [rn_tok, op2_tok] = two(&tokens, operands)?;
        (zero_register(), parse_register(rn_tok)?, parse_operand2(op2_tok)?, true)
    } else {
        let [rd_tok, rn_tok, op2_tok] = three(&tokens, operands)?;
        (parse_register(rd_tok)?, parse_register(rn_tok)?, parse_operand2(op2_tok)?, s_flag)
    };

    Ok(edk::encode_data_processing(cond, opcode, s, rn, rd, operand2)?)
}

fn branch(
    link: bool,
    cond: Condition,
    operands: &str,
    address: edk::Address,
    symbols: &SymbolTable,
) -> Result<Word, AssembleErrorKind> {
    let tokens = tokenize_operands(operands);
    let label = tokens
        .first()
        .ok_or_else(|| AssembleErrorKind::MalformedOperand(operands.to_string()))?;

    match symbols.get(label) {
        Some(target) => Ok(edk::encode_branch(cond, link, target, address)?),
        None => Ok(edk::encode_branch_placeholder(cond, link)),
    }
}

fn load_store(base: &str, cond: Condition, operands: &str) -> Result<Word, AssembleErrorKind> {
    let load = base == "LDR" || base == "LDRB";
    let byte = base == "LDRB" || base == "STRB";

    let comma = operands
        .find(',')
        .ok_or_else(|| AssembleErrorKind::MalformedOperand(operands.to_string()))?;
    let rd_tok = operands[..comma].trim();
    let bracket_expr = operands[comma + 1..].trim();
    let inner = bracket_expr.trim_start_matches('[').trim_end_matches(']');
    let parts: Vec<&str> = inner.split(',').map(|p| p.trim()).collect();

    let rn_tok = parts
        .first()
        .ok_or_else(|| AssembleErrorKind::MalformedOperand(operands.to_string()))?;
    let offset = match parts.get(1) {
        Some(tok) if !tok.is_empty() => parse_immediate(tok)?,
        _ => 0,
    };

    let rd = parse_register(rd_tok)?;
    let rn = parse_register(rn_tok)?;

    Ok(edk::encode_load_store(cond, load, byte, rn, rd, offset)?)
}

fn two<'a>(tokens: &[&'a str], operands: &str) -> Result<[&'a str; 2], AssembleErrorKind> {
    if tokens.len() < 2 {
        return Err(AssembleErrorKind::MalformedOperand(operands.to_string()));
    }
    Ok([tokens[0], tokens[1]])
}

fn three<'a>(tokens: &[&'a str], operands: &str) -> Result<[&'a str; 3], AssembleErrorKind> {
    if tokens.len() < 3 {
        return Err(AssembleErrorKind::MalformedOperand(operands.to_string()));
    }
    Ok([tokens[0], tokens[1], tokens[2]])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::pass1;

    fn assemble_one(source: &str) -> Word {
        let (recorded, symbols, errors) = pass1(source);
        assert!(errors.is_empty());
        assemble_line(&recorded[recorded.len() - 1], &symbols).unwrap()
    }

    #[test]
    fn mov_immediate_matches_concrete_scenario() {
        assert_eq!(assemble_one("MOV R0, #5\n"), 0xE3A00005);
    }

    #[test]
    fn add_register_matches_concrete_scenario() {
        assert_eq!(assemble_one("ADD R1, R2, R3\n"), 0xE0821003);
    }

    #[test]
    fn cmp_forces_s_flag() {
        assert_eq!(assemble_one("CMP R4, #1\n"), 0xE3540001);
    }

    #[test]
    fn load_with_bracket_offset_matches_concrete_scenario() {
        assert_eq!(assemble_one("LDR R0, [R1, #8]\n"), 0xE5910008);
    }

    #[test]
    fn load_without_offset_defaults_to_zero() {
        assert_eq!(assemble_one("LDR R0, [R1]\n"), 0xE5910000);
    }

    #[test]
    fn backward_branch_matches_concrete_scenario() {
        let word = assemble_one("loop:\n  ADD R0, R0, #1\n  B loop\n");
        assert_eq!(word, 0xEAFFFFFD);
    }

    #[test]
    fn unresolved_branch_target_encodes_zero_offset() {
        let (recorded, symbols, errors) = pass1("B missing\n");
        assert!(errors.is_empty());
        let word = assemble_line(&recorded[0], &symbols).unwrap();
        assert_eq!(word & 0x00FF_FFFF, 0);
    }

    #[test]
    fn unknown_mnemonic_reported() {
        let (recorded, symbols, _) = pass1("FROB R0, R1\n");
        let err = assemble_line(&recorded[0], &symbols).unwrap_err();
        assert_eq!(err, AssembleErrorKind::UnknownMnemonic("FROB".to_string()));
    }
}
