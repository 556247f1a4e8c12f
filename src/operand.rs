//! Operands are the atomic encodable values an instruction is built from
//!
//! Each operand knows its own width in words, how to append itself to a word
//! buffer, the capabilities its use implies, and its textual form. Operands
//! carry no reference to their instruction or to each other; everything here
//! is computable from the operand value alone.

use std::fmt;

use spirv::*;

/// A reference to a value, type or label defined in the module
///
/// Prints as `%N`, the convention used by the reference disassembler.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Id(pub u32);

impl Id {
    /// Width of the symbolic form (`%N`) in characters
    pub fn symbol_width(self) -> usize {
        let mut width = 2;
        let mut value = self.0;
        while value >= 10 {
            value /= 10;
            width += 1;
        }

        width
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// A single instruction operand
///
/// Optional operands are represented by their absence from the instruction's
/// operand list, and repeated operands by consecutive entries; in both cases
/// the word count and capability rules below apply element-wise.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Operand {
    IdRef(Id),
    LiteralInt32(u32),
    LiteralString(String),
    Capability(Capability),
    ExecutionModel(ExecutionModel),
    AddressingModel(AddressingModel),
    MemoryModel(MemoryModel),
    ExecutionMode(ExecutionMode),
    StorageClass(StorageClass),
    Decoration(Decoration),
    SourceLanguage(SourceLanguage),
    AccessQualifier(AccessQualifier),
    GroupOperation(GroupOperation),
    FunctionControl(FunctionControl),
    MemoryAccess(MemoryAccess),
}

impl Operand {
    /// The number of words this operand occupies in the binary encoding
    ///
    /// Ids, literal integers and enum values are a single word; strings are
    /// packed 4 bytes per word with a mandatory NUL terminator.
    pub fn word_count(&self) -> u32 {
        match *self {
            Operand::LiteralString(ref value) => string_word_count(value),
            _ => 1,
        }
    }

    /// Append exactly `word_count()` words to the buffer
    pub fn write(&self, buffer: &mut Vec<u32>) {
        match *self {
            Operand::IdRef(id) => buffer.push(id.0),
            Operand::LiteralInt32(value) => buffer.push(value),
            Operand::LiteralString(ref value) => write_string(value, buffer),
            Operand::Capability(value) => buffer.push(value.into()),
            Operand::ExecutionModel(value) => buffer.push(value.into()),
            Operand::AddressingModel(value) => buffer.push(value.into()),
            Operand::MemoryModel(value) => buffer.push(value.into()),
            Operand::ExecutionMode(value) => buffer.push(value.into()),
            Operand::StorageClass(value) => buffer.push(value.into()),
            Operand::Decoration(value) => buffer.push(value.into()),
            Operand::SourceLanguage(value) => buffer.push(value.into()),
            Operand::AccessQualifier(value) => buffer.push(value.into()),
            Operand::GroupOperation(value) => buffer.push(value.into()),
            Operand::FunctionControl(value) => buffer.push(value.into()),
            Operand::MemoryAccess(value) => buffer.push(value.into()),
        }
    }

    /// The capabilities this operand requires on its own
    ///
    /// Ids report nothing here: the requirements of the *referenced*
    /// definition belong to the instruction that defined it, not to every
    /// use site.
    pub fn capabilities(&self) -> &'static [Capability] {
        match *self {
            Operand::IdRef(_)
            | Operand::LiteralInt32(_)
            | Operand::LiteralString(_) => &[],
            Operand::Capability(value) => value.capabilities(),
            Operand::ExecutionModel(value) => value.capabilities(),
            Operand::AddressingModel(value) => value.capabilities(),
            Operand::MemoryModel(value) => value.capabilities(),
            Operand::ExecutionMode(value) => value.capabilities(),
            Operand::StorageClass(value) => value.capabilities(),
            Operand::Decoration(value) => value.capabilities(),
            Operand::SourceLanguage(value) => value.capabilities(),
            Operand::AccessQualifier(value) => value.capabilities(),
            Operand::GroupOperation(value) => value.capabilities(),
            Operand::FunctionControl(value) => value.capabilities(),
            Operand::MemoryAccess(value) => value.capabilities(),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Operand::IdRef(id) => write!(f, "{}", id),
            Operand::LiteralInt32(value) => write!(f, "{}", value),
            Operand::LiteralString(ref value) => write!(f, "{:?}", value),
            Operand::Capability(value) => write!(f, "{}", value),
            Operand::ExecutionModel(value) => write!(f, "{}", value),
            Operand::AddressingModel(value) => write!(f, "{}", value),
            Operand::MemoryModel(value) => write!(f, "{}", value),
            Operand::ExecutionMode(value) => write!(f, "{}", value),
            Operand::StorageClass(value) => write!(f, "{}", value),
            Operand::Decoration(value) => write!(f, "{}", value),
            Operand::SourceLanguage(value) => write!(f, "{}", value),
            Operand::AccessQualifier(value) => write!(f, "{}", value),
            Operand::GroupOperation(value) => write!(f, "{}", value),
            Operand::FunctionControl(value) => write!(f, "{}", value),
            Operand::MemoryAccess(value) => write!(f, "{}", value),
        }
    }
}

/// Number of words needed for a NUL-terminated string literal
#[allow(clippy::cast_possible_truncation)]
pub fn string_word_count(value: &str) -> u32 {
    (value.len() as u32 / 4) + 1
}

/// Turn a string into a padded list of 32-bit words
///
/// The bytes are packed 4 per word in little-endian order, followed by a NUL
/// terminator and zero padding up to the next word boundary.
fn write_string(value: &str, buffer: &mut Vec<u32>) {
    let bytes = value.as_bytes();
    for chunk in bytes.chunks(4) {
        let mut word = [0_u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        buffer.push(u32::from_le_bytes(word));
    }

    // A string whose length is a multiple of 4 still needs a full word of
    // padding to hold the terminator
    if bytes.len() % 4 == 0 {
        buffer.push(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_packing_pads_to_word_boundary() {
        let mut buffer = Vec::new();
        Operand::LiteralString(String::from("main")).write(&mut buffer);
        assert_eq!(buffer, vec![0x6e69_616d, 0]);

        let mut buffer = Vec::new();
        Operand::LiteralString(String::from("abc")).write(&mut buffer);
        assert_eq!(buffer, vec![0x0063_6261]);
    }

    #[test]
    fn string_word_count_matches_written_words() {
        for value in &["", "a", "abc", "main", "kernel_name"] {
            let operand = Operand::LiteralString(String::from(*value));
            let mut buffer = Vec::new();
            operand.write(&mut buffer);
            assert_eq!(buffer.len() as u32, operand.word_count());
        }
    }

    #[test]
    fn symbol_widths() {
        assert_eq!(Id(5).symbol_width(), 2);
        assert_eq!(Id(42).symbol_width(), 3);
        assert_eq!(Id(1000).symbol_width(), 5);
    }
}
