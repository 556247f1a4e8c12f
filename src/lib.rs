//! Typed instruction model, binary codec and disassembler for SPIR-V modules
//!
//! This library represents each SPIR-V instruction as an immutable value:
//! a typed constructor takes every required operand, and the resulting
//! `Instruction` knows its own word count, binary encoding, capability
//! requirements and printed form. A `Module` is an ordered sequence of
//! instructions behind the standard five-word header.
//!
//! ```
//! # extern crate spirv_codec;
//! # use spirv_codec::prelude::*;
//! # fn main() {
//!     let mut module = Module::new();
//!
//!     module.push(Instruction::capability(Capability::Kernel));
//!     module.push(Instruction::memory_model(
//!         AddressingModel::Physical64,
//!         MemoryModel::OpenCL,
//!     ));
//!     module.push(Instruction::type_void(Id(1)));
//!     module.push(Instruction::type_function(Id(2), Id(1), vec![]));
//!
//!     module.header.bound = module.compute_bound();
//!
//!     let words = module.assemble().unwrap();
//!     assert_eq!(words[0], MAGIC_NUMBER);
//!
//!     let text = module.disassemble();
//!     assert!(text.contains("OpMemoryModel Physical64 OpenCL"));
//! # }
//! ```
//!
//! The codec only enforces structural invariants (word counts, capability
//! concatenation); validating the semantics of an instruction sequence is
//! the consumer's job.

#![warn(clippy::pedantic)]

#[macro_use]
extern crate error_chain;
extern crate fnv;

pub mod binary;
pub mod errors;
pub mod instruction;
pub mod module;
pub mod operand;
pub mod prelude;
pub mod printer;
pub mod spirv;
