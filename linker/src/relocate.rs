use crate::error::LinkDiagnostic;
use crate::layout::MemoryLayout;
use crate::merge::PendingRelocation;
use crate::object::RelocKind;
use crate::symbol::GlobalSymbol;
use byteorder::ByteOrder;
use std::collections::BTreeMap;
use util::Endian;

/// Stage 2: assigns each merged section its configured base address and
/// resolves every global symbol's address from it.
pub fn assign_addresses(
    globals: &mut BTreeMap<String, GlobalSymbol>,
    layout: &MemoryLayout,
) -> BTreeMap<String, u32> {
    let mut bases = BTreeMap::new();
    for name in &[".text", ".data", ".bss"] {
        if let Some(base) = layout.base_for(name) {
            bases.insert(name.to_string(), base);
        }
    }

    for symbol in globals.values_mut() {
        if let Some(&base) = bases.get(&symbol.section) {
            symbol.resolved_address = Some(base + symbol.value);
        }
    }

    bases
}

/// Stage 3: patches `abs32`/`rel24` relocations into the merged section
/// bytes. An unresolved symbol logs `UndefinedSymbol` and the relocation is
/// skipped; linking proceeds regardless.
pub fn apply_relocations(
    sections: &mut BTreeMap<String, Vec<u8>>,
    section_bases: &BTreeMap<String, u32>,
    globals: &BTreeMap<String, GlobalSymbol>,
    relocations: &[PendingRelocation],
) -> Vec<LinkDiagnostic> {
    let mut diagnostics = Vec::new();

    for pending in relocations {
        let reloc = &pending.reloc;
        let local_name = format!("{}:{}", pending.origin, reloc.symbol);
        let symbol = globals.get(&reloc.symbol).or_else(|| globals.get(&local_name));

        let symbol = match symbol {
            Some(s) => s,
            None => {
                diagnostics.push(LinkDiagnostic::UndefinedSymbol(reloc.symbol.clone()));
                continue;
            }
        };

        let resolved_address = match symbol.resolved_address {
            Some(a) => a,
            None => {
                diagnostics.push(LinkDiagnostic::UndefinedSymbol(reloc.symbol.clone()));
                continue;
            }
        };

        let data = match sections.get_mut(&reloc.section) {
            Some(d) => d,
            None => continue,
        };
        let offset = reloc.offset as usize;
        if offset + 4 > data.len() {
            continue;
        }

        match reloc.kind {
            RelocKind::Abs32 => {
                Endian::write_u32(&mut data[offset..offset + 4], resolved_address);
            }
            RelocKind::Rel24 => {
                let section_base = *section_bases.get(&reloc.section).unwrap_or(&0);
                let instr_addr = section_base + reloc.offset;
                let offset_words =
                    edk::branch_offset_words(resolved_address, instr_addr).unwrap_or(0);
                let word = Endian::read_u32(&data[offset..offset + 4]);
                let patched = edk::patch_branch_offset(word, offset_words).unwrap_or(word);
                Endian::write_u32(&mut data[offset..offset + 4], patched);
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::merge::merge;
    use crate::object::parse_object;

    #[test]
    fn concrete_scenario_rel24_offset_zero() {
        // Two objects, each defining an 8-byte .text; object B defines
        // global `main` at value 0; object A's RELOC is rel24 against it.
        let a = parse_object(
            "a.obj",
            "SECTION .text\nDATA E3A00005E3A00005\nRELOC 0 main rel24 .text\n",
        )
        .unwrap();
        let b = parse_object(
            "b.obj",
            "SECTION .text\nDATA E3A00005E3A00005\nSYMBOL main 0 .text GLOBAL\n",
        )
        .unwrap();

        let (mut sections, mut globals, pending, _) = merge(&[a, b]);
        let layout = MemoryLayout::default();
        let bases = assign_addresses(&mut globals, &layout);
        let diagnostics = apply_relocations(&mut sections, &bases, &globals, &pending);
        assert!(diagnostics.is_empty());

        let word = Endian::read_u32(&sections[".text"][0..4]);
        assert_eq!(word & 0x00FF_FFFF, 0);
    }

    #[test]
    fn undefined_symbol_is_reported_and_skipped() {
        let a = parse_object(
            "a.obj",
            "SECTION .text\nDATA E3A00005\nRELOC 0 missing abs32 .text\n",
        )
        .unwrap();
        let (mut sections, mut globals, pending, _) = merge(&[a]);
        let layout = MemoryLayout::default();
        let bases = assign_addresses(&mut globals, &layout);
        let before = sections[".text"].clone();
        let diagnostics = apply_relocations(&mut sections, &bases, &globals, &pending);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(sections[".text"], before);
    }

    #[test]
    fn abs32_relocation_is_idempotent() {
        let a = parse_object(
            "a.obj",
            "SECTION .text\nDATA 00000000\nRELOC 0 target abs32 .text\nSYMBOL target 0 .data GLOBAL\n",
        )
        .unwrap();
        let (mut sections, mut globals, pending, _) = merge(&[a]);
        let layout = MemoryLayout::default();
        let bases = assign_addresses(&mut globals, &layout);
        apply_relocations(&mut sections, &bases, &globals, &pending);
        let once = sections.clone();
        apply_relocations(&mut sections, &bases, &globals, &pending);
        assert_eq!(sections, once);
    }
}
