//! Object-record linker: merges sections and symbols from one or more
//! objects (stage 1), assigns each section a base address (stage 2),
//! patches `abs32`/`rel24` relocations in place (stage 3), and emits a
//! binary or Intel HEX image (stage 4). Every stage is a plain function
//! over owned data — the CLI in `main.rs` is the only thing that touches
//! the filesystem.

pub mod emit;
pub mod error;
pub mod layout;
pub mod merge;
pub mod object;
mod relocate;
pub mod symbol;

pub use emit::OutputFormat;
pub use error::LinkDiagnostic;
pub use layout::MemoryLayout;
pub use object::{parse_object, ObjectFile};
pub use relocate::{assign_addresses, apply_relocations};

/// Runs all four stages over an already-parsed set of objects and returns
/// the emitted image plus every non-fatal diagnostic collected along the
/// way. Linking never aborts on `UndefinedSymbol`/`DuplicateGlobal` — the
/// image is always written (§7).
pub struct LinkOutput {
    pub bytes: Vec<u8>,
    pub diagnostics: Vec<LinkDiagnostic>,
}

pub fn link(objects: &[ObjectFile], layout: &MemoryLayout, format: OutputFormat) -> LinkOutput {
    let (mut sections, mut globals, pending, mut diagnostics) = merge::merge(objects);
    let bases = relocate::assign_addresses(&mut globals, layout);
    diagnostics.extend(relocate::apply_relocations(
        &mut sections,
        &bases,
        &globals,
        &pending,
    ));

    let bytes = match format {
        OutputFormat::Bin => emit::emit_binary(&sections, &bases),
        OutputFormat::Hex => emit::emit_intel_hex(&sections, &bases),
    };

    LinkOutput { bytes, diagnostics }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn links_two_objects_into_a_binary_image() {
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

        let output = link(&[a, b], &MemoryLayout::default(), OutputFormat::Bin);
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.bytes.len(), 16);
    }

    #[test]
    fn undefined_symbol_still_produces_output() {
        let a = parse_object(
            "a.obj",
            "SECTION .text\nDATA E3A00005\nRELOC 0 missing abs32 .text\n",
        )
        .unwrap();
        let output = link(&[a], &MemoryLayout::default(), OutputFormat::Bin);
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.bytes.len(), 4);
    }
}
