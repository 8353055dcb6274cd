use std::collections::BTreeMap;

/// Parses the plain-text symbol file: each non-blank line begins with a
/// hex address (optionally `0x`-prefixed) followed by whitespace and a
/// name. Malformed lines are skipped rather than failing the whole file —
/// the disassembler never aborts on bad input (§7).
pub fn parse_symbol_file(text: &str) -> BTreeMap<u32, String> {
    let mut symbols = BTreeMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(2, char::is_whitespace);
        let addr_tok = match parts.next() {
            Some(t) => t,
            None => continue,
        };
        let name = match parts.next() {
            Some(n) => n.trim(),
            None => continue,
        };
        if name.is_empty() {
            continue;
        }

        let digits = addr_tok
            .strip_prefix("0x")
            .or_else(|| addr_tok.strip_prefix("0X"))
            .unwrap_or(addr_tok);
        if let Ok(addr) = u32::from_str_radix(digits, 16) {
            symbols.insert(addr, name.to_string());
        }
    }

    symbols
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_prefixed_and_bare_hex_addresses() {
        let symbols = parse_symbol_file("0x1000 start\n2000 loop\n");
        assert_eq!(symbols.get(&0x1000), Some(&"start".to_string()));
        assert_eq!(symbols.get(&0x2000), Some(&"loop".to_string()));
    }

    #[test]
    fn skips_blank_lines() {
        let symbols = parse_symbol_file("\n\n0x10 main\n\n");
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn skips_a_line_with_no_name() {
        let symbols = parse_symbol_file("0x10\n0x20 main\n");
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols.get(&0x20), Some(&"main".to_string()));
    }
}
