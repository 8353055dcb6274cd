//! Byte-stream decoder: classifies and formats every 32-bit word in an
//! image via the shared EDK kernel, optionally annotating branch targets
//! and crossed addresses with names from a symbol map. Never fails on an
//! unrecognized word shape — it prints `UNKNOWN 0x...` and moves on (§7).

pub mod format;
pub mod symtab;

use byteorder::ByteOrder;
use std::collections::BTreeMap;
use util::Endian;

/// One decoded line of output: the instruction's address, the symbol name
/// to print as a label above it (if any address in the map matches), and
/// the formatted mnemonic text.
pub struct DisassembledLine {
    pub address: u32,
    pub label: Option<String>,
    pub text: String,
}

/// Decodes every 4-byte word in `bytes`, starting at `base_addr`. A
/// trailing partial word (fewer than 4 bytes) is zero-padded rather than
/// dropped, since the core's only guarantee is that a well-formed `.text`
/// section is a multiple of 4 — malformed input still gets a best-effort
/// decode instead of silently losing bytes.
pub fn disassemble(bytes: &[u8], base_addr: u32, symbols: &BTreeMap<u32, String>) -> Vec<DisassembledLine> {
    bytes
        .chunks(4)
        .enumerate()
        .map(|(i, chunk)| {
            let address = base_addr.wrapping_add((i * 4) as u32);
            let mut word_bytes = [0u8; 4];
            word_bytes[..chunk.len()].copy_from_slice(chunk);
            let word = Endian::read_u32(&word_bytes);

            let decoded = edk::decode(word, address);
            DisassembledLine {
                address,
                label: symbols.get(&address).cloned(),
                text: format::format_instruction(decoded, symbols),
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn disassembles_a_short_image() {
        // MOV R0, #5 ; ADD R1, R2, R3
        let bytes = [0x05, 0x00, 0xA0, 0xE3, 0x03, 0x10, 0x82, 0xE0];
        let lines = disassemble(&bytes, 0, &BTreeMap::new());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].address, 0);
        assert_eq!(lines[0].text, "MOV R0, #0x5");
        assert_eq!(lines[1].address, 4);
        assert_eq!(lines[1].text, "ADD R1, R2, R3");
    }

    #[test]
    fn labels_addresses_present_in_the_symbol_map() {
        let bytes = [0x05, 0x00, 0xA0, 0xE3];
        let mut symbols = BTreeMap::new();
        symbols.insert(0, "start".to_string());
        let lines = disassemble(&bytes, 0, &symbols);
        assert_eq!(lines[0].label, Some("start".to_string()));
    }

    #[test]
    fn round_trips_the_assembler_branch_scenario() {
        // `loop: ADD R0,R0,#1` then `B loop`, addresses 0 and 4.
        let bytes = [0x01, 0x00, 0x80, 0xE2, 0xFD, 0xFF, 0xFF, 0xEA];
        let lines = disassemble(&bytes, 0, &BTreeMap::new());
        assert_eq!(lines[1].text, "B 0x00000000");
    }
}
