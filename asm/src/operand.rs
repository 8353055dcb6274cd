use crate::error::AssembleErrorKind;
use edk::{Operand2, RegisterId};

/// Parses `R<n>`, `SP`, `LR`, or `PC`, case-insensitively. A numeric suffix
/// that is out of range (`R16`) reaches the EDK error; text that is not a
/// register at all (`RX`) is reported directly.
pub fn parse_register(tok: &str) -> Result<RegisterId, AssembleErrorKind> {
    let up = tok.trim().to_uppercase();
    match up.as_str() {
        "SP" => Ok(RegisterId::SP),
        "LR" => Ok(RegisterId::LR),
        "PC" => Ok(RegisterId::PC),
        _ => {
            let digits = up
                .strip_prefix('R')
                .ok_or_else(|| AssembleErrorKind::InvalidRegister(tok.to_string()))?;
            let n: u32 = digits
                .parse()
                .map_err(|_| AssembleErrorKind::InvalidRegister(tok.to_string()))?;
            if n > 255 {
                return Err(AssembleErrorKind::RegisterOutOfRange(n));
            }
            RegisterId::new(n as u8).map_err(|_| AssembleErrorKind::RegisterOutOfRange(n))
        }
    }
}

/// Parses an optional `#`, then `0x...` hex, `0b...` binary, or decimal.
/// Negative literals are not supported.
pub fn parse_immediate(tok: &str) -> Result<u32, AssembleErrorKind> {
    let t = tok.trim();
    let t = t.strip_prefix('#').unwrap_or(t);

    let parsed = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        u32::from_str_radix(bin, 2)
    } else {
        t.parse::<u32>()
    };

    parsed.map_err(|_| AssembleErrorKind::InvalidImmediate(tok.to_string()))
}

fn looks_like_immediate(tok: &str) -> bool {
    tok.starts_with('#') || tok.chars().next().map_or(false, |c| c.is_ascii_digit())
}

/// Parses `op2`: a bare register, or an immediate (starting with `#` or a
/// digit). No register shift syntax is accepted (Non-goal).
pub fn parse_operand2(tok: &str) -> Result<Operand2, AssembleErrorKind> {
    if looks_like_immediate(tok) {
        Ok(Operand2::Immediate(parse_immediate(tok)?))
    } else {
        Ok(Operand2::bare_register(parse_register(tok)?))
    }
}
