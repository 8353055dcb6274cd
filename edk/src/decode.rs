use crate::{
    constants::*, dataprocessing::DataProcessingFields, loadstore::BlockTransferFields,
    loadstore::MultiplyFields, loadstore::SingleTransferFields, loadstore::SoftwareInterruptFields,
    Address, Word,
};

/// Every instruction class this kernel knows how to decode, plus the
/// catch-all for anything the disassembler must still print something for.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Decoded {
    DataProcessing(DataProcessingFields),
    Multiply(MultiplyFields),
    SingleTransfer(SingleTransferFields),
    BlockTransfer(BlockTransferFields),
    Branch(crate::branch::BranchFields),
    SoftwareInterrupt(SoftwareInterruptFields),
    Unknown(Word),
}

/// Classification is a prefix decision on bits 27:25 and 27:24, tested in
/// this order — the multiply pattern is checked before general
/// data-processing because it lives inside the same `00` major opcode.
pub fn decode(word: Word, pc: Address) -> Decoded {
    if word & MASK_MUL == MATCH_MUL {
        Decoded::Multiply(crate::loadstore::decode_multiply(word))
    } else if word & MASK_DP == MATCH_DP {
        Decoded::DataProcessing(crate::dataprocessing::decode_data_processing(word))
    } else if word & MASK_SINGLE_TRANSFER == MATCH_SINGLE_TRANSFER {
        Decoded::SingleTransfer(crate::loadstore::decode_single_transfer(word))
    } else if word & MASK_BLOCK_TRANSFER == MATCH_BLOCK_TRANSFER {
        Decoded::BlockTransfer(crate::loadstore::decode_block_transfer(word))
    } else if word & MASK_BRANCH == MATCH_BRANCH {
        Decoded::Branch(crate::branch::decode_branch(word, pc))
    } else if word & MASK_SWI == MATCH_SWI {
        Decoded::SoftwareInterrupt(crate::loadstore::decode_software_interrupt(word))
    } else {
        Decoded::Unknown(word)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dataprocessing::DpOpcode;

    #[test]
    fn classifies_mov_as_data_processing() {
        match decode(0xE3A00005, 0) {
            Decoded::DataProcessing(fields) => assert_eq!(fields.opcode, DpOpcode::MOV),
            other => panic!("expected DataProcessing, got {:?}", other),
        }
    }

    #[test]
    fn classifies_multiply_before_data_processing() {
        // cond=AL, 000000, Rd=1, -, Rs=2, 1001, Rm=3
        let word = 0xE0010293;
        match decode(word, 0) {
            Decoded::Multiply(fields) => {
                assert_eq!(fields.rd.value(), 1);
                assert_eq!(fields.rs.value(), 2);
                assert_eq!(fields.rm.value(), 3);
            }
            other => panic!("expected Multiply, got {:?}", other),
        }
    }

    #[test]
    fn unknown_word_reported_verbatim() {
        // bits 27:25 = 110 (the coprocessor-transfer space) matches none
        // of the six classification patterns.
        assert_eq!(decode(0xEC000000, 0), Decoded::Unknown(0xEC000000));
    }
}
