//! Human-readable disassembly
//!
//! One instruction per line, in the reference disassembler layout: the
//! optional `%N = ` prefix is right-aligned into a module-wide column so
//! that every mnemonic starts at the same character, whatever the width of
//! the ids on the left.
//!
//! Printing is a pure fold over the instruction sequence; no state is
//! carried between lines.

use std::fmt::{self, Write};

use instruction::Instruction;
use module::Module;

/// Layout settings for the printer
#[derive(Copy, Clone, Debug, Default)]
pub struct PrintOptions {
    /// The column mnemonics are aligned to, in characters; an instruction's
    /// body is indented by `indent` minus the width of its own `%N = `
    /// prefix
    pub indent: usize,
}

impl Instruction {
    /// Print this instruction as one line of disassembly
    pub fn print_into<W: Write>(&self, stream: &mut W, options: PrintOptions) -> fmt::Result {
        let pad = options.indent.saturating_sub(self.assignment_width());
        for _ in 0..pad {
            stream.write_char(' ')?;
        }

        if let Some(id) = self.result_id() {
            write!(stream, "{} = ", id)?;
        }

        stream.write_str(self.name())?;
        for operand in self.operands() {
            write!(stream, " {}", operand)?;
        }

        writeln!(stream)
    }
}

/// Render a value as SPIR-V assembly text
pub trait Disassemble {
    fn disassemble(&self) -> String;
}

impl Disassemble for Instruction {
    fn disassemble(&self) -> String {
        let mut text = String::new();
        let options = PrintOptions {
            indent: self.assignment_width(),
        };

        // A single line cannot fail to format into a String
        self.print_into(&mut text, options)
            .expect("formatting failed");

        text
    }
}

impl Disassemble for Module {
    fn disassemble(&self) -> String {
        let indent = self
            .instructions
            .iter()
            .map(Instruction::assignment_width)
            .max()
            .unwrap_or(0);

        let mut text = String::new();
        for instruction in &self.instructions {
            instruction
                .print_into(&mut text, PrintOptions { indent })
                .expect("formatting failed");
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use operand::Id;
    use spirv::*;

    #[test]
    fn single_instruction_lines() {
        let inst = Instruction::type_int(Id(5), 32, 1);
        assert_eq!(inst.disassemble(), "%5 = OpTypeInt 32 1\n");

        let inst = Instruction::memory_model(AddressingModel::Physical64, MemoryModel::OpenCL);
        assert_eq!(inst.disassemble(), "OpMemoryModel Physical64 OpenCL\n");
    }

    #[test]
    fn strings_print_quoted() {
        let inst = Instruction::entry_point(ExecutionModel::Kernel, Id(4), "main", vec![]);
        assert_eq!(inst.disassemble(), "OpEntryPoint Kernel %4 \"main\"\n");
    }
}
