//! Binary encoding and decoding of the word stream
//!
//! Every instruction starts with a header word packing the total word count
//! (header included) in the upper 16 bits and the opcode number in the lower
//! 16. The operands follow in declaration order, each occupying exactly its
//! own `word_count()`.

use std::convert::TryFrom;

use errors::*;
use instruction::{Instruction, Op, OperandKind, Tail};
use operand::{Id, Operand};
use spirv::*;

/// Serialize a value into a stream of SPIR-V words
pub trait Assemble {
    /// Append the encoded form of this value to the buffer
    fn assemble_into(&self, words: &mut Vec<u32>) -> Result<()>;

    /// Encode this value into a fresh word buffer
    fn assemble(&self) -> Result<Vec<u32>> {
        let mut words = Vec::new();
        self.assemble_into(&mut words)?;
        Ok(words)
    }
}

impl Assemble for Instruction {
    fn assemble_into(&self, words: &mut Vec<u32>) -> Result<()> {
        let count = self.word_count();
        if count > 0xFFFF {
            bail!(ErrorKind::WordCountOverflow(self.name(), count));
        }

        words.push((count << 16) | u32::from(self.op().code()));
        for operand in self.operands() {
            operand.write(words);
        }

        Ok(())
    }
}

impl Instruction {
    /// Decode one instruction from the front of a word slice, returning it
    /// along with the number of words consumed
    ///
    /// The defining id is not part of the encoding, so decoded instructions
    /// carry no result id; structural equality ignores that field, which is
    /// what makes encode-then-decode reproduce an equal value.
    #[allow(clippy::cast_possible_truncation)]
    pub fn decode(words: &[u32]) -> Result<(Instruction, usize)> {
        let header = match words.first() {
            Some(&header) => header,
            None => bail!(ErrorKind::UnexpectedEndOfStream),
        };

        let code = (header & 0xFFFF) as u16;
        let count = (header >> 16) as usize;

        let op = match Op::from_code(code) {
            Some(op) => op,
            None => bail!(ErrorKind::UnknownOpcode(code)),
        };

        if count == 0 {
            bail!(ErrorKind::InvalidWordCount(op.name(), 0));
        }
        if count > words.len() {
            bail!(ErrorKind::UnexpectedEndOfStream);
        }

        let body = &words[1..count];
        let mut cursor = 0;

        let info = op.info();
        let mut operands = Vec::with_capacity(info.fixed.len());
        for &kind in info.fixed {
            operands.push(decode_operand(kind, body, &mut cursor)?);
        }

        match info.tail {
            Tail::None => {}
            Tail::Optional(kind) => {
                if cursor < body.len() {
                    operands.push(decode_operand(kind, body, &mut cursor)?);
                }
            }
            Tail::Repeated(kind) => {
                while cursor < body.len() {
                    operands.push(decode_operand(kind, body, &mut cursor)?);
                }
            }
        }

        if cursor != body.len() {
            bail!(ErrorKind::InvalidWordCount(op.name(), count as u32));
        }

        Ok((Instruction::new(op, None, operands), count))
    }
}

fn decode_operand(kind: OperandKind, words: &[u32], cursor: &mut usize) -> Result<Operand> {
    if kind == OperandKind::LiteralString {
        return Ok(Operand::LiteralString(decode_string(words, cursor)?));
    }

    let word = match words.get(*cursor) {
        Some(&word) => word,
        None => bail!(ErrorKind::UnexpectedEndOfStream),
    };
    *cursor += 1;

    Ok(match kind {
        OperandKind::IdRef => Operand::IdRef(Id(word)),
        OperandKind::LiteralInt32 => Operand::LiteralInt32(word),
        OperandKind::LiteralString => unreachable!(),
        OperandKind::Capability => Operand::Capability(Capability::try_from(word)?),
        OperandKind::ExecutionModel => Operand::ExecutionModel(ExecutionModel::try_from(word)?),
        OperandKind::AddressingModel => Operand::AddressingModel(AddressingModel::try_from(word)?),
        OperandKind::MemoryModel => Operand::MemoryModel(MemoryModel::try_from(word)?),
        OperandKind::ExecutionMode => Operand::ExecutionMode(ExecutionMode::try_from(word)?),
        OperandKind::StorageClass => Operand::StorageClass(StorageClass::try_from(word)?),
        OperandKind::Decoration => Operand::Decoration(Decoration::try_from(word)?),
        OperandKind::SourceLanguage => Operand::SourceLanguage(SourceLanguage::try_from(word)?),
        OperandKind::AccessQualifier => Operand::AccessQualifier(AccessQualifier::try_from(word)?),
        OperandKind::GroupOperation => Operand::GroupOperation(GroupOperation::try_from(word)?),
        OperandKind::FunctionControl => Operand::FunctionControl(FunctionControl::try_from(word)?),
        OperandKind::MemoryAccess => Operand::MemoryAccess(MemoryAccess::try_from(word)?),
    })
}

/// Read a NUL-terminated packed string, consuming whole words
fn decode_string(words: &[u32], cursor: &mut usize) -> Result<String> {
    let mut bytes = Vec::new();

    loop {
        let word = match words.get(*cursor) {
            Some(&word) => word,
            None => bail!(ErrorKind::UnexpectedEndOfStream),
        };
        *cursor += 1;

        let chunk = word.to_le_bytes();
        if let Some(end) = chunk.iter().position(|&byte| byte == 0) {
            bytes.extend_from_slice(&chunk[..end]);
            break;
        }

        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| Error::from(ErrorKind::InvalidString))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_word_packs_count_and_opcode() {
        let words = Instruction::type_int(Id(5), 32, 1).assemble().unwrap();
        assert_eq!(words, vec![(3 << 16) | 21, 32, 1]);
    }

    #[test]
    fn decoding_rejects_unknown_opcodes() {
        let err = Instruction::decode(&[(1 << 16) | 0xFFF0]).unwrap_err();
        match *err.kind() {
            ErrorKind::UnknownOpcode(code) => assert_eq!(code, 0xFFF0),
            ref other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn decoding_rejects_truncated_streams() {
        let mut words = Instruction::type_int(Id(5), 32, 1).assemble().unwrap();
        words.pop();

        let err = Instruction::decode(&words).unwrap_err();
        match *err.kind() {
            ErrorKind::UnexpectedEndOfStream => {}
            ref other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn decoding_rejects_invalid_enum_words() {
        let err = Instruction::decode(&[(2 << 16) | 17, 0xDEAD]).unwrap_err();
        match *err.kind() {
            ErrorKind::InvalidEnumWord(kind, word) => {
                assert_eq!(kind, "Capability");
                assert_eq!(word, 0xDEAD);
            }
            ref other => panic!("unexpected error: {}", other),
        }
    }
}
