use crate::error::ObjectParseError;
use std::collections::BTreeMap;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RelocKind {
    Abs32,
    Rel24,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Symbol {
    pub name: String,
    pub value: u32,
    pub section: String,
    pub is_global: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Relocation {
    pub offset: u32,
    pub symbol: String,
    pub kind: RelocKind,
    pub section: String,
}

#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Section {
    pub data: Vec<u8>,
}

impl Section {
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }
}

#[derive(Clone, Default, Debug)]
pub struct ObjectFile {
    pub origin: String,
    pub sections: BTreeMap<String, Section>,
    pub symbols: BTreeMap<String, Symbol>,
    pub relocations: Vec<Relocation>,
}

/// Parses the prefixed-base integer convention shared by object record
/// fields and the linker CLI's `--text-addr`/`--data-addr` flags: `0x`/`0b`
/// hex/binary, a leading-zero octal literal, or plain decimal.
pub fn parse_int(text: &str) -> Result<u32, ObjectParseError> {
    let t = text.trim();
    let parsed = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        u32::from_str_radix(bin, 2)
    } else if t.starts_with('0') && t.len() > 1 && t.chars().all(|c| c.is_digit(8)) {
        u32::from_str_radix(&t[1..], 8)
    } else {
        t.parse::<u32>()
    };
    parsed.map_err(|_| ObjectParseError::InvalidInteger(text.to_string()))
}

fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, ObjectParseError> {
    if text.len() % 2 != 0 {
        return Err(ObjectParseError::InvalidHex(text.to_string()));
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&text[i..i + 2], 16)
                .map_err(|_| ObjectParseError::InvalidHex(text.to_string()))
        })
        .collect()
}

/// Parses the line-based object record grammar: `SECTION`, `DATA`, `SYMBOL`,
/// `RELOC` directives, one per non-blank, non-`#`-comment line.
pub fn parse_object(origin: &str, source: &str) -> Result<ObjectFile, ObjectParseError> {
    let mut obj = ObjectFile {
        origin: origin.to_string(),
        ..ObjectFile::default()
    };
    let mut current_section: Option<String> = None;

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "SECTION" => {
                let name = parts.get(1).ok_or(ObjectParseError::MissingField {
                    directive: "SECTION",
                    field: "name",
                })?;
                obj.sections.entry(name.to_string()).or_default();
                current_section = Some(name.to_string());
            }
            "DATA" => {
                let hex = parts.get(1).ok_or(ObjectParseError::MissingField {
                    directive: "DATA",
                    field: "hex",
                })?;
                let bytes = parse_hex_bytes(hex)?;
                let section_name = current_section
                    .clone()
                    .ok_or(ObjectParseError::DataOutsideSection)?;
                obj.sections
                    .entry(section_name)
                    .or_default()
                    .data
                    .extend(bytes);
            }
            "SYMBOL" => {
                let name = parts.get(1).ok_or(ObjectParseError::MissingField {
                    directive: "SYMBOL",
                    field: "name",
                })?;
                let value = parts.get(2).ok_or(ObjectParseError::MissingField {
                    directive: "SYMBOL",
                    field: "value",
                })?;
                let section = parts.get(3).ok_or(ObjectParseError::MissingField {
                    directive: "SYMBOL",
                    field: "section",
                })?;
                let is_global = parts.get(4).map_or(false, |&tag| tag == "GLOBAL");
                obj.symbols.insert(
                    name.to_string(),
                    Symbol {
                        name: name.to_string(),
                        value: parse_int(value)?,
                        section: section.to_string(),
                        is_global,
                    },
                );
            }
            "RELOC" => {
                let offset = parts.get(1).ok_or(ObjectParseError::MissingField {
                    directive: "RELOC",
                    field: "offset",
                })?;
                let symbol = parts.get(2).ok_or(ObjectParseError::MissingField {
                    directive: "RELOC",
                    field: "symbol",
                })?;
                let kind = parts.get(3).ok_or(ObjectParseError::MissingField {
                    directive: "RELOC",
                    field: "kind",
                })?;
                let section = parts.get(4).ok_or(ObjectParseError::MissingField {
                    directive: "RELOC",
                    field: "section",
                })?;
                let kind = match *kind {
                    "abs32" => RelocKind::Abs32,
                    "rel24" => RelocKind::Rel24,
                    other => return Err(ObjectParseError::UnsupportedRelocKind(other.to_string())),
                };
                obj.relocations.push(Relocation {
                    offset: parse_int(offset)?,
                    symbol: symbol.to_string(),
                    kind,
                    section: section.to_string(),
                });
            }
            other => return Err(ObjectParseError::UnknownDirective(other.to_string())),
        }
    }

    Ok(obj)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_a_minimal_object() {
        let source = "\
SECTION .text
DATA E3A00005
SYMBOL main 0 .text GLOBAL
RELOC 0 other rel24 .text
";
        let obj = parse_object("a.obj", source).unwrap();
        assert_eq!(obj.sections[".text"].data, vec![0xE3, 0xA0, 0x00, 0x05]);
        assert!(obj.symbols["main"].is_global);
        assert_eq!(obj.relocations.len(), 1);
        assert_eq!(obj.relocations[0].kind, RelocKind::Rel24);
    }

    #[test]
    fn data_before_section_is_an_error() {
        let err = parse_object("a.obj", "DATA 00\n").unwrap_err();
        assert_eq!(err, ObjectParseError::DataOutsideSection);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let source = "# a comment\n\nSECTION .text\n";
        let obj = parse_object("a.obj", source).unwrap();
        assert!(obj.sections.contains_key(".text"));
    }
}
