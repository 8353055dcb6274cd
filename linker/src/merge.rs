use crate::error::LinkDiagnostic;
use crate::object::{ObjectFile, Relocation};
use crate::symbol::GlobalSymbol;
use std::collections::BTreeMap;

/// A relocation carried past merge, tagged with the filename of the object
/// that declared it (needed to retry local-symbol lookup in stage 3).
pub struct PendingRelocation {
    pub reloc: Relocation,
    pub origin: String,
}

/// Stage 1: appends every object's section bytes to the merged sections in
/// input order, rewriting each symbol's value and each relocation's offset
/// by the byte offset its object's contribution started at.
pub fn merge(
    objects: &[ObjectFile],
) -> (
    BTreeMap<String, Vec<u8>>,
    BTreeMap<String, GlobalSymbol>,
    Vec<PendingRelocation>,
    Vec<LinkDiagnostic>,
) {
    let mut sections: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    let mut globals: BTreeMap<String, GlobalSymbol> = BTreeMap::new();
    let mut pending = Vec::new();
    let mut diagnostics = Vec::new();

    for obj in objects {
        for (section_name, section) in &obj.sections {
            let merged = sections.entry(section_name.clone()).or_default();
            let contribution_offset = merged.len() as u32;
            merged.extend_from_slice(&section.data);

            for symbol in obj.symbols.values().filter(|s| &s.section == section_name) {
                let adjusted = GlobalSymbol {
                    section: section_name.clone(),
                    value: symbol.value + contribution_offset,
                    resolved_address: None,
                };
                if symbol.is_global {
                    if globals.contains_key(&symbol.name) {
                        diagnostics.push(LinkDiagnostic::DuplicateGlobal(symbol.name.clone()));
                    }
                    globals.insert(symbol.name.clone(), adjusted);
                } else {
                    let local_name = format!("{}:{}", obj.origin, symbol.name);
                    globals.insert(local_name, adjusted);
                }
            }

            for reloc in obj.relocations.iter().filter(|r| &r.section == section_name) {
                let mut adjusted = reloc.clone();
                adjusted.offset += contribution_offset;
                pending.push(PendingRelocation {
                    reloc: adjusted,
                    origin: obj.origin.clone(),
                });
            }
        }
    }

    (sections, globals, pending, diagnostics)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::parse_object;

    #[test]
    fn merge_additivity_holds_across_two_objects() {
        let a = parse_object("a.obj", "SECTION .text\nDATA E3A00005E3A00005\n").unwrap();
        let b = parse_object(
            "b.obj",
            "SECTION .text\nDATA E3A00005\nSYMBOL main 0 .text GLOBAL\n",
        )
        .unwrap();
        let (sections, globals, _, diagnostics) = merge(&[a, b]);
        assert!(diagnostics.is_empty());
        assert_eq!(sections[".text"].len(), 12);
        assert_eq!(globals["main"].value, 8);
    }

    #[test]
    fn duplicate_global_is_a_warning_and_last_wins() {
        let a = parse_object("a.obj", "SECTION .text\nDATA 00000000\nSYMBOL x 0 .text GLOBAL\n")
            .unwrap();
        let b = parse_object("b.obj", "SECTION .text\nDATA 00000000\nSYMBOL x 4 .text GLOBAL\n")
            .unwrap();
        let (_, globals, _, diagnostics) = merge(&[a, b]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(globals["x"].value, 8);
    }

    #[test]
    fn local_symbols_are_namespaced_by_filename() {
        let a = parse_object("a.obj", "SECTION .text\nDATA 00000000\nSYMBOL helper 0 .text\n")
            .unwrap();
        let (_, globals, _, _) = merge(&[a]);
        assert!(globals.contains_key("a.obj:helper"));
    }
}
