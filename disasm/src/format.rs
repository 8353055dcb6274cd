use edk::{DataProcessingFields, Decoded, Operand2};
use std::collections::BTreeMap;

fn format_operand2(op2: Operand2) -> String {
    match op2 {
        Operand2::Immediate(value) => format!("#0x{:X}", value),
        Operand2::Register {
            rm,
            shift_type,
            shift_amount,
        } => {
            if shift_amount == 0 {
                format!("{}", rm)
            } else {
                format!("{}, {:?} #{}", rm, shift_type, shift_amount)
            }
        }
    }
}

/// `OP{cond}{S} Rd, Rn, op2`, omitting `Rd` for the test opcodes and `Rn`
/// for `MOV`/`MVN` — the two operand slots each opcode class doesn't use.
fn format_data_processing(fields: DataProcessingFields) -> String {
    let mnemonic = format!("{:?}", fields.opcode);
    let s = if fields.s { "S" } else { "" };

    let mut operands = Vec::new();
    if !fields.opcode.is_test() {
        operands.push(fields.rd.to_string());
    }
    if !fields.opcode.is_move() {
        operands.push(fields.rn.to_string());
    }
    operands.push(format_operand2(fields.operand2));

    format!("{}{}{} {}", mnemonic, fields.cond, s, operands.join(", "))
}

fn format_single_transfer(fields: edk::SingleTransferFields) -> String {
    let base = if fields.load { "LDR" } else { "STR" };
    let byte = if fields.byte { "B" } else { "" };
    format!(
        "{}{}{} {}, [{}, #0x{:X}]",
        base, byte, fields.cond, fields.rd, fields.rn, fields.offset
    )
}

fn format_block_transfer(fields: edk::BlockTransferFields) -> String {
    let base = if fields.load { "LDM" } else { "STM" };
    let register_list = fields.register_list as u32;
    let registers: Vec<String> = (0..16u32)
        .filter(|i| register_list & (1 << i) != 0)
        .map(|i| format!("R{}", i))
        .collect();
    format!(
        "{}{} {}, {{{}}}",
        base,
        fields.cond,
        fields.rn,
        registers.join(", ")
    )
}

fn format_branch(fields: edk::BranchFields, symbols: &BTreeMap<u32, String>) -> String {
    let mnemonic = if fields.link { "BL" } else { "B" };
    let target = match symbols.get(&fields.target) {
        Some(name) => name.clone(),
        None => format!("0x{:08X}", fields.target),
    };
    format!("{}{} {}", mnemonic, fields.cond, target)
}

fn format_multiply(fields: edk::MultiplyFields) -> String {
    format!(
        "MUL{} {}, {}, {}",
        fields.cond, fields.rd, fields.rm, fields.rs
    )
}

fn format_software_interrupt(fields: edk::SoftwareInterruptFields) -> String {
    format!("SWI{} 0x{:X}", fields.cond, fields.comment)
}

/// Formats one decoded instruction per §4.4. `symbols` maps resolved
/// branch targets to names; a target with no entry prints as a raw
/// 8-digit hex address instead.
pub fn format_instruction(decoded: Decoded, symbols: &BTreeMap<u32, String>) -> String {
    match decoded {
        Decoded::DataProcessing(fields) => format_data_processing(fields),
        Decoded::Multiply(fields) => format_multiply(fields),
        Decoded::SingleTransfer(fields) => format_single_transfer(fields),
        Decoded::BlockTransfer(fields) => format_block_transfer(fields),
        Decoded::Branch(fields) => format_branch(fields, symbols),
        Decoded::SoftwareInterrupt(fields) => format_software_interrupt(fields),
        Decoded::Unknown(word) => format!("UNKNOWN 0x{:08X}", word),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use edk::decode;

    #[test]
    fn formats_mov_immediate() {
        let decoded = decode(0xE3A00005, 0);
        assert_eq!(format_instruction(decoded, &BTreeMap::new()), "MOV R0, #0x5");
    }

    #[test]
    fn formats_cmp_without_rd() {
        let decoded = decode(0xE3540001, 0);
        assert_eq!(format_instruction(decoded, &BTreeMap::new()), "CMPS R4, #0x1");
    }

    #[test]
    fn formats_load_with_offset() {
        let decoded = decode(0xE5910008, 0);
        assert_eq!(
            format_instruction(decoded, &BTreeMap::new()),
            "LDR R0, [R1, #0x8]"
        );
    }

    #[test]
    fn formats_branch_with_symbol_name() {
        let decoded = decode(0xEAFFFFFD, 4);
        let mut symbols = BTreeMap::new();
        symbols.insert(0, "loop".to_string());
        assert_eq!(format_instruction(decoded, &symbols), "B loop");
    }

    #[test]
    fn formats_branch_without_symbol_as_hex() {
        let decoded = decode(0xEAFFFFFD, 4);
        assert_eq!(
            format_instruction(decoded, &BTreeMap::new()),
            "B 0x00000000"
        );
    }

    #[test]
    fn formats_unknown_word() {
        let decoded = decode(0xEC000000, 0);
        assert_eq!(
            format_instruction(decoded, &BTreeMap::new()),
            "UNKNOWN 0xEC000000"
        );
    }

    #[test]
    fn formats_shifted_register_operand() {
        let decoded = decode(0xE0821103, 0); // ADD R1, R2, R3, LSL #2
        assert_eq!(
            format_instruction(decoded, &BTreeMap::new()),
            "ADD R1, R2, R3, LSL #2"
        );
    }
}
