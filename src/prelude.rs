//! Exports everything you probably want to have in scope to work with the codec

pub use binary::Assemble;
pub use errors::{Error, ErrorKind, Result};
pub use instruction::{Instruction, Op};
pub use module::{Module, ModuleHeader, MAGIC_NUMBER};
pub use operand::{Id, Operand};
pub use printer::{Disassemble, PrintOptions};
pub use spirv::*;
