use crate::{constants::*, Condition, Error, RegisterId, Result, Word};
use num::traits::{FromPrimitive, ToPrimitive};

/// Single load/store. The core only supports `I=0, P=1, U=1, W=0`:
/// immediate pre-indexed, positive offset, no writeback.
pub fn encode_load_store(
    cond: Condition,
    load: bool,
    byte: bool,
    rn: RegisterId,
    rd: RegisterId,
    offset: u32,
) -> Result<Word> {
    if offset >= LS_OFFSET_MAX {
        return Err(Error::OffsetOutOfRange(offset as i64));
    }

    const P: u32 = 1;
    const U: u32 = 1;
    const W: u32 = 0;

    Ok((cond.to_u32().unwrap() << COND_OFFSET)
        | (0b01 << 26)
        | (P << 24)
        | (U << 23)
        | ((byte as u32) << LS_B_BIT)
        | (W << 21)
        | ((load as u32) << LS_L_BIT)
        | ((rn.value() as u32) << LS_RN_OFFSET)
        | ((rd.value() as u32) << LS_RD_OFFSET)
        | (offset & LS_OFFSET_MASK))
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SingleTransferFields {
    pub cond: Condition,
    pub load: bool,
    pub byte: bool,
    pub rn: RegisterId,
    pub rd: RegisterId,
    pub offset: u16,
}

pub fn decode_single_transfer(word: Word) -> SingleTransferFields {
    SingleTransferFields {
        cond: Condition::from_u32((word >> COND_OFFSET) & 0xF).unwrap(),
        load: ((word >> LS_L_BIT) & 1) != 0,
        byte: ((word >> LS_B_BIT) & 1) != 0,
        rn: RegisterId::new(((word >> LS_RN_OFFSET) & 0xF) as u8).unwrap(),
        rd: RegisterId::new(((word >> LS_RD_OFFSET) & 0xF) as u8).unwrap(),
        offset: (word & LS_OFFSET_MASK) as u16,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BlockTransferFields {
    pub cond: Condition,
    pub load: bool,
    pub rn: RegisterId,
    pub register_list: u16,
}

pub fn decode_block_transfer(word: Word) -> BlockTransferFields {
    BlockTransferFields {
        cond: Condition::from_u32((word >> COND_OFFSET) & 0xF).unwrap(),
        load: ((word >> BLOCK_L_BIT) & 1) != 0,
        rn: RegisterId::new(((word >> BLOCK_RN_OFFSET) & 0xF) as u8).unwrap(),
        register_list: (word & BLOCK_REGLIST_MASK) as u16,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MultiplyFields {
    pub cond: Condition,
    pub rd: RegisterId,
    pub rm: RegisterId,
    pub rs: RegisterId,
}

pub fn decode_multiply(word: Word) -> MultiplyFields {
    MultiplyFields {
        cond: Condition::from_u32((word >> COND_OFFSET) & 0xF).unwrap(),
        rd: RegisterId::new(((word >> MUL_RD_OFFSET) & 0xF) as u8).unwrap(),
        rm: RegisterId::new((word & MUL_RM_MASK) as u8).unwrap(),
        rs: RegisterId::new(((word >> MUL_RS_OFFSET) & MUL_RS_MASK) as u8).unwrap(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SoftwareInterruptFields {
    pub cond: Condition,
    pub comment: u32,
}

pub fn decode_software_interrupt(word: Word) -> SoftwareInterruptFields {
    SoftwareInterruptFields {
        cond: Condition::from_u32((word >> COND_OFFSET) & 0xF).unwrap(),
        comment: word & SWI_COMMENT_MASK,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ldr_immediate_offset() {
        let word = encode_load_store(
            Condition::AL,
            true,
            false,
            RegisterId::new(1).unwrap(),
            RegisterId::new(0).unwrap(),
            8,
        )
        .unwrap();
        assert_eq!(word, 0xE5910008);
    }

    #[test]
    fn offset_overflow_rejected() {
        let err = encode_load_store(
            Condition::AL,
            true,
            false,
            RegisterId::new(1).unwrap(),
            RegisterId::new(0).unwrap(),
            4096,
        )
        .unwrap_err();
        assert_eq!(err, Error::OffsetOutOfRange(4096));
    }

    #[test]
    fn decode_round_trips_fields() {
        let fields = decode_single_transfer(0xE5910008);
        assert!(fields.load);
        assert!(!fields.byte);
        assert_eq!(fields.offset, 8);
    }
}
