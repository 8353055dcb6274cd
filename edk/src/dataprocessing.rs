use crate::{constants::*, Condition, Error, RegisterId, Result, Word};
use num::traits::{FromPrimitive, ToPrimitive};
use num_derive::{FromPrimitive, ToPrimitive};
use util::EnumFromStr;
use util_derive::EnumFromStr;

/// Data-processing opcode, bits 24..21.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive, EnumFromStr)]
pub enum DpOpcode {
    AND,
    EOR,
    SUB,
    RSB,
    ADD,
    ADC,
    SBC,
    RSC,
    TST,
    TEQ,
    CMP,
    CMN,
    ORR,
    MOV,
    BIC,
    MVN,
}

impl DpOpcode {
    /// `TST`/`TEQ`/`CMP`/`CMN` write no result; the assembler forces `S=1`
    /// and encodes `Rd=0` for them.
    pub fn is_test(self) -> bool {
        matches!(self, DpOpcode::TST | DpOpcode::TEQ | DpOpcode::CMP | DpOpcode::CMN)
    }

    /// `MOV`/`MVN` ignore `Rn`.
    pub fn is_move(self) -> bool {
        matches!(self, DpOpcode::MOV | DpOpcode::MVN)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum ShiftType {
    LSL,
    LSR,
    ASR,
    ROR,
}

/// The second operand of a data-processing instruction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operand2 {
    /// `I=0`: a register, optionally shifted.
    Register {
        rm: RegisterId,
        shift_type: ShiftType,
        shift_amount: u8,
    },
    /// `I=1`: an unsigned value placed directly into the low 12 bits.
    ///
    /// This core performs no rotation synthesis (§9): a real ARM7 can only
    /// represent immediates expressible as `ror(imm8, 2k)`, but this kernel
    /// simply rejects anything that does not fit 12 bits outright. Swap
    /// `encode_dp_immediate` for a rotation search to lift the restriction.
    /// The decode direction has no such restriction: a decoded word can
    /// carry an arbitrary rotate and reconstructs to a full 32-bit value,
    /// which is why this variant holds a `u32` rather than the `u16` that
    /// would suffice for the encode side alone.
    Immediate(u32),
}

impl Operand2 {
    pub fn bare_register(rm: RegisterId) -> Operand2 {
        Operand2::Register {
            rm,
            shift_type: ShiftType::LSL,
            shift_amount: 0,
        }
    }
}

/// The single function that would need to change to add rotation synthesis.
pub fn encode_dp_immediate(value: u32) -> Result<u16> {
    if value >= DP_IMMEDIATE_MAX {
        Err(Error::ImmediateOverflow(value))
    } else {
        Ok(value as u16)
    }
}

fn encode_operand2(operand2: Operand2) -> Result<(bool, u32)> {
    match operand2 {
        Operand2::Register {
            rm,
            shift_type,
            shift_amount,
        } => {
            if shift_amount > 31 {
                return Err(Error::OffsetOutOfRange(shift_amount as i64));
            }
            let field = ((shift_amount as u32) << DP_SHIFT_IMM_OFFSET)
                | (shift_type.to_u32().unwrap() << DP_SHIFT_TYPE_OFFSET)
                | (rm.value() as u32 & DP_RM_MASK);
            Ok((false, field))
        }
        Operand2::Immediate(value) => {
            let field = encode_dp_immediate(value)?;
            Ok((true, field as u32))
        }
    }
}

pub fn encode_data_processing(
    cond: Condition,
    opcode: DpOpcode,
    s: bool,
    rn: RegisterId,
    rd: RegisterId,
    operand2: Operand2,
) -> Result<Word> {
    let (i_bit, operand2_field) = encode_operand2(operand2)?;

    Ok((cond.to_u32().unwrap() << COND_OFFSET)
        | ((i_bit as u32) << DP_I_BIT)
        | (opcode.to_u32().unwrap() << DP_OPCODE_OFFSET)
        | ((s as u32) << DP_S_BIT)
        | ((rn.value() as u32) << DP_RN_OFFSET)
        | ((rd.value() as u32) << DP_RD_OFFSET)
        | (operand2_field & DP_OPERAND2_MASK))
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DataProcessingFields {
    pub cond: Condition,
    pub opcode: DpOpcode,
    pub s: bool,
    pub rn: RegisterId,
    pub rd: RegisterId,
    pub operand2: Operand2,
}

pub fn rotate_right(value: u32, amount: u32) -> u32 {
    let amount = amount % 32;
    if amount == 0 {
        value
    } else {
        (value >> amount) | (value << (32 - amount))
    }
}

pub fn decode_data_processing(word: Word) -> DataProcessingFields {
    let cond = Condition::from_u32((word >> COND_OFFSET) & 0xF).unwrap();
    let opcode = DpOpcode::from_u32((word >> DP_OPCODE_OFFSET) & 0xF).unwrap();
    let s = ((word >> DP_S_BIT) & 1) != 0;
    let rn = RegisterId::new(((word >> DP_RN_OFFSET) & 0xF) as u8).unwrap();
    let rd = RegisterId::new(((word >> DP_RD_OFFSET) & 0xF) as u8).unwrap();
    let i_bit = ((word >> DP_I_BIT) & 1) != 0;

    let operand2 = if i_bit {
        let imm8 = word & 0xFF;
        let rotate = ((word >> 8) & 0xF) * 2;
        Operand2::Immediate(rotate_right(imm8, rotate))
    } else {
        let rm = RegisterId::new((word & DP_RM_MASK) as u8).unwrap();
        let shift_type = ShiftType::from_u32((word >> DP_SHIFT_TYPE_OFFSET) & 0x3).unwrap();
        let shift_amount = ((word >> DP_SHIFT_IMM_OFFSET) & 0x1F) as u8;
        Operand2::Register {
            rm,
            shift_type,
            shift_amount,
        }
    };

    DataProcessingFields {
        cond,
        opcode,
        s,
        rn,
        rd,
        operand2,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mov_immediate() {
        let word = encode_data_processing(
            Condition::AL,
            DpOpcode::MOV,
            false,
            RegisterId::new(0).unwrap(),
            RegisterId::new(0).unwrap(),
            Operand2::Immediate(5),
        )
        .unwrap();
        assert_eq!(word, 0xE3A00005);
    }

    #[test]
    fn add_register() {
        let word = encode_data_processing(
            Condition::AL,
            DpOpcode::ADD,
            false,
            RegisterId::new(2).unwrap(),
            RegisterId::new(1).unwrap(),
            Operand2::bare_register(RegisterId::new(3).unwrap()),
        )
        .unwrap();
        assert_eq!(word, 0xE0821003);
    }

    #[test]
    fn cmp_forces_s() {
        let word = encode_data_processing(
            Condition::AL,
            DpOpcode::CMP,
            true,
            RegisterId::new(4).unwrap(),
            RegisterId::new(0).unwrap(),
            Operand2::Immediate(1),
        )
        .unwrap();
        assert_eq!(word, 0xE3540001);
    }

    #[test]
    fn immediate_overflow_rejected() {
        let err = encode_dp_immediate(4096).unwrap_err();
        assert_eq!(err, Error::ImmediateOverflow(4096));
    }

    #[test]
    fn decode_reconstructs_rotated_immediate() {
        let fields = decode_data_processing(0xE3A00005);
        assert_eq!(fields.opcode, DpOpcode::MOV);
        assert_eq!(fields.operand2, Operand2::Immediate(5));
    }
}
