//! The module assembler: a header plus an ordered instruction sequence
//!
//! The codec imposes no ordering requirement on the instruction list; the
//! order the producer pushes in is the order encoded. Keeping the id bound
//! ahead of every referenced id is likewise the producer's contract, with
//! `compute_bound` provided as a helper.

use fnv::FnvHashSet;

use binary::Assemble;
use errors::*;
use instruction::Instruction;
use operand::Operand;
use spirv::Capability;

/// The magic number opening every SPIR-V binary
pub const MAGIC_NUMBER: u32 = 0x0723_0203;

pub const MAJOR_VERSION: u32 = 1;
pub const MINOR_VERSION: u32 = 2;

/// The five fixed words framing a module binary
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ModuleHeader {
    pub magic_number: u32,
    pub version: u32,
    pub generator: u32,
    pub bound: u32,
    pub schema: u32,
}

impl Default for ModuleHeader {
    fn default() -> ModuleHeader {
        ModuleHeader {
            magic_number: MAGIC_NUMBER,
            version: (MAJOR_VERSION << 16) | (MINOR_VERSION << 8),
            generator: 0xffff_0009,
            bound: 0,
            schema: 0,
        }
    }
}

/// An ordered sequence of instructions with its binary header
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
    pub header: ModuleHeader,
    pub instructions: Vec<Instruction>,
}

impl Module {
    pub fn new() -> Module {
        Module::default()
    }

    /// Append an instruction to the module
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// The raw capability list of the whole module: each instruction's
    /// requirements concatenated in sequence order, duplicates preserved
    pub fn capabilities(&self) -> Vec<Capability> {
        self.instructions
            .iter()
            .flat_map(Instruction::capabilities)
            .collect()
    }

    /// The capability list collapsed to unique membership, in first-seen
    /// order; this is the list an assembler would emit `OpCapability`
    /// declarations from
    pub fn unique_capabilities(&self) -> Vec<Capability> {
        let mut seen = FnvHashSet::default();
        self.capabilities()
            .into_iter()
            .filter(|&capability| seen.insert(capability))
            .collect()
    }

    /// The smallest valid id bound for this module
    pub fn compute_bound(&self) -> u32 {
        let mut max = 0;
        for instruction in &self.instructions {
            if let Some(id) = instruction.result_id() {
                max = max.max(id.0);
            }

            for operand in instruction.operands() {
                if let Operand::IdRef(id) = *operand {
                    max = max.max(id.0);
                }
            }
        }

        max + 1
    }

    /// Encode the module into little-endian bytes, ready to hand to a
    /// driver or validator
    pub fn into_binary(self) -> Result<Vec<u8>> {
        let words = self.assemble()?;
        let mut bytes = Vec::with_capacity(words.len() * 4);
        for word in words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }

        Ok(bytes)
    }

    /// Decode a full module binary, header included
    pub fn decode(words: &[u32]) -> Result<Module> {
        if words.len() < 5 {
            bail!(ErrorKind::UnexpectedEndOfStream);
        }
        if words[0] != MAGIC_NUMBER {
            bail!(ErrorKind::InvalidHeader(words[0]));
        }

        let header = ModuleHeader {
            magic_number: words[0],
            version: words[1],
            generator: words[2],
            bound: words[3],
            schema: words[4],
        };

        let mut instructions = Vec::new();
        let mut offset = 5;
        while offset < words.len() {
            let (instruction, consumed) = Instruction::decode(&words[offset..])?;
            instructions.push(instruction);
            offset += consumed;
        }

        Ok(Module {
            header,
            instructions,
        })
    }
}

impl Assemble for Module {
    fn assemble_into(&self, words: &mut Vec<u32>) -> Result<()> {
        words.push(self.header.magic_number);
        words.push(self.header.version);
        words.push(self.header.generator);
        words.push(self.header.bound);
        words.push(self.header.schema);

        for instruction in &self.instructions {
            instruction.assemble_into(words)?;
        }

        Ok(())
    }
}
