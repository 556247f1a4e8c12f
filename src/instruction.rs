//! The typed instruction model
//!
//! Every supported opcode is a variant of the `Op` enum; the per-opcode
//! variance (mnemonic, own capabilities, operand signature) lives in a
//! static grammar table, so encoding, decoding, capability aggregation and
//! printing are each written once over the operand list instead of once per
//! opcode.
//!
//! Instructions are immutable value objects: a typed constructor takes every
//! required operand, the word count is computed on the spot, and only
//! accessors are exposed afterwards.

use std::hash::{Hash, Hasher};

use operand::{Id, Operand};
use spirv::*;

/// The shape of an instruction's trailing operands
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Tail {
    /// The fixed signature is the whole instruction
    None,
    /// Zero or one extra operand of the given kind
    Optional(OperandKind),
    /// Zero or more extra operands of the given kind
    Repeated(OperandKind),
}

/// The kind tag used by the grammar table to drive the decoder
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OperandKind {
    IdRef,
    LiteralInt32,
    LiteralString,
    Capability,
    ExecutionModel,
    AddressingModel,
    MemoryModel,
    ExecutionMode,
    StorageClass,
    Decoration,
    SourceLanguage,
    AccessQualifier,
    GroupOperation,
    FunctionControl,
    MemoryAccess,
}

/// Static description of one opcode
pub(crate) struct OpInfo {
    pub name: &'static str,
    pub capabilities: &'static [Capability],
    pub has_result: bool,
    pub fixed: &'static [OperandKind],
    pub tail: Tail,
}

macro_rules! instructions {
    ( $(
        $op:ident = $code:literal, $name:literal,
            caps [ $( $cap:ident ),* ],
            result $result:literal,
            fixed [ $( $kind:ident ),* ],
            tail $tail:expr;
    )* ) => {
        /// One variant per supported opcode, with the SPIR-V opcode number
        /// as its value
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #[repr(u16)]
        pub enum Op {
            $( $op = $code, )*
        }

        impl Op {
            /// The 16-bit opcode number packed into the header word
            pub fn code(self) -> u16 {
                self as u16
            }

            /// Look an opcode up by number, for decoding
            pub fn from_code(code: u16) -> Option<Op> {
                match code {
                    $( $code => Some(Op::$op), )*
                    _ => None,
                }
            }

            /// The mnemonic of this opcode
            pub fn name(self) -> &'static str {
                self.info().name
            }

            /// The capabilities this opcode requires regardless of its
            /// operands
            pub fn capabilities(self) -> &'static [Capability] {
                self.info().capabilities
            }

            /// Whether instructions of this opcode define a result id
            pub fn has_result(self) -> bool {
                self.info().has_result
            }

            pub(crate) fn info(self) -> &'static OpInfo {
                match self {
                    $( Op::$op => &OpInfo {
                        name: $name,
                        capabilities: &[ $( Capability::$cap ),* ],
                        has_result: $result,
                        fixed: &[ $( OperandKind::$kind ),* ],
                        tail: $tail,
                    }, )*
                }
            }
        }
    };
}

instructions! {
    Nop = 0, "OpNop",
        caps [], result false, fixed [], tail Tail::None;
    Undef = 1, "OpUndef",
        caps [], result true, fixed [IdRef], tail Tail::None;
    Source = 3, "OpSource",
        caps [], result false, fixed [SourceLanguage, LiteralInt32], tail Tail::None;
    Name = 5, "OpName",
        caps [], result false, fixed [IdRef, LiteralString], tail Tail::None;
    MemberName = 6, "OpMemberName",
        caps [], result false, fixed [IdRef, LiteralInt32, LiteralString], tail Tail::None;
    Extension = 10, "OpExtension",
        caps [], result false, fixed [LiteralString], tail Tail::None;
    ExtInstImport = 11, "OpExtInstImport",
        caps [], result true, fixed [LiteralString], tail Tail::None;
    ExtInst = 12, "OpExtInst",
        caps [], result true, fixed [IdRef, IdRef, LiteralInt32], tail Tail::Repeated(OperandKind::IdRef);
    MemoryModel = 14, "OpMemoryModel",
        caps [], result false, fixed [AddressingModel, MemoryModel], tail Tail::None;
    EntryPoint = 15, "OpEntryPoint",
        caps [], result false, fixed [ExecutionModel, IdRef, LiteralString], tail Tail::Repeated(OperandKind::IdRef);
    ExecutionMode = 16, "OpExecutionMode",
        caps [], result false, fixed [IdRef, ExecutionMode], tail Tail::Repeated(OperandKind::LiteralInt32);
    Capability = 17, "OpCapability",
        caps [], result false, fixed [Capability], tail Tail::None;
    TypeVoid = 19, "OpTypeVoid",
        caps [], result true, fixed [], tail Tail::None;
    TypeBool = 20, "OpTypeBool",
        caps [], result true, fixed [], tail Tail::None;
    TypeInt = 21, "OpTypeInt",
        caps [], result true, fixed [LiteralInt32, LiteralInt32], tail Tail::None;
    TypeFloat = 22, "OpTypeFloat",
        caps [], result true, fixed [LiteralInt32], tail Tail::None;
    TypeVector = 23, "OpTypeVector",
        caps [], result true, fixed [IdRef, LiteralInt32], tail Tail::None;
    TypeMatrix = 24, "OpTypeMatrix",
        caps [Matrix], result true, fixed [IdRef, LiteralInt32], tail Tail::None;
    TypeArray = 28, "OpTypeArray",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    TypeStruct = 30, "OpTypeStruct",
        caps [], result true, fixed [], tail Tail::Repeated(OperandKind::IdRef);
    TypePointer = 32, "OpTypePointer",
        caps [], result true, fixed [StorageClass, IdRef], tail Tail::None;
    TypeFunction = 33, "OpTypeFunction",
        caps [], result true, fixed [IdRef], tail Tail::Repeated(OperandKind::IdRef);
    TypeEvent = 34, "OpTypeEvent",
        caps [Kernel], result true, fixed [], tail Tail::None;
    TypeDeviceEvent = 35, "OpTypeDeviceEvent",
        caps [DeviceEnqueue], result true, fixed [], tail Tail::None;
    TypeQueue = 37, "OpTypeQueue",
        caps [DeviceEnqueue], result true, fixed [], tail Tail::None;
    TypePipe = 38, "OpTypePipe",
        caps [Pipes], result true, fixed [AccessQualifier], tail Tail::None;
    ConstantTrue = 41, "OpConstantTrue",
        caps [], result true, fixed [IdRef], tail Tail::None;
    ConstantFalse = 42, "OpConstantFalse",
        caps [], result true, fixed [IdRef], tail Tail::None;
    Constant = 43, "OpConstant",
        caps [], result true, fixed [IdRef, LiteralInt32], tail Tail::None;
    ConstantComposite = 44, "OpConstantComposite",
        caps [], result true, fixed [IdRef], tail Tail::Repeated(OperandKind::IdRef);
    ConstantNull = 46, "OpConstantNull",
        caps [], result true, fixed [IdRef], tail Tail::None;
    Function = 54, "OpFunction",
        caps [], result true, fixed [IdRef, FunctionControl, IdRef], tail Tail::None;
    FunctionParameter = 55, "OpFunctionParameter",
        caps [], result true, fixed [IdRef], tail Tail::None;
    FunctionEnd = 56, "OpFunctionEnd",
        caps [], result false, fixed [], tail Tail::None;
    FunctionCall = 57, "OpFunctionCall",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::Repeated(OperandKind::IdRef);
    Variable = 59, "OpVariable",
        caps [], result true, fixed [IdRef, StorageClass], tail Tail::Optional(OperandKind::IdRef);
    Load = 61, "OpLoad",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::Optional(OperandKind::MemoryAccess);
    Store = 62, "OpStore",
        caps [], result false, fixed [IdRef, IdRef], tail Tail::Optional(OperandKind::MemoryAccess);
    AccessChain = 65, "OpAccessChain",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::Repeated(OperandKind::IdRef);
    InBoundsAccessChain = 66, "OpInBoundsAccessChain",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::Repeated(OperandKind::IdRef);
    PtrAccessChain = 67, "OpPtrAccessChain",
        caps [Addresses], result true, fixed [IdRef, IdRef, IdRef], tail Tail::Repeated(OperandKind::IdRef);
    Decorate = 71, "OpDecorate",
        caps [], result false, fixed [IdRef, Decoration], tail Tail::Repeated(OperandKind::LiteralInt32);
    MemberDecorate = 72, "OpMemberDecorate",
        caps [], result false, fixed [IdRef, LiteralInt32, Decoration], tail Tail::Repeated(OperandKind::LiteralInt32);
    ConvertFToU = 109, "OpConvertFToU",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    ConvertFToS = 110, "OpConvertFToS",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    ConvertSToF = 111, "OpConvertSToF",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    ConvertUToF = 112, "OpConvertUToF",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    UConvert = 113, "OpUConvert",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    SConvert = 114, "OpSConvert",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    FConvert = 115, "OpFConvert",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    ConvertPtrToU = 117, "OpConvertPtrToU",
        caps [Addresses], result true, fixed [IdRef, IdRef], tail Tail::None;
    ConvertUToPtr = 120, "OpConvertUToPtr",
        caps [Addresses], result true, fixed [IdRef, IdRef], tail Tail::None;
    Bitcast = 124, "OpBitcast",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    SNegate = 126, "OpSNegate",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    FNegate = 127, "OpFNegate",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    IAdd = 128, "OpIAdd",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    FAdd = 129, "OpFAdd",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    ISub = 130, "OpISub",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    FSub = 131, "OpFSub",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    IMul = 132, "OpIMul",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    FMul = 133, "OpFMul",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    UDiv = 134, "OpUDiv",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    SDiv = 135, "OpSDiv",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    FDiv = 136, "OpFDiv",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    UMod = 137, "OpUMod",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    SRem = 138, "OpSRem",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    SMod = 139, "OpSMod",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    FRem = 140, "OpFRem",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    FMod = 141, "OpFMod",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    VectorTimesScalar = 142, "OpVectorTimesScalar",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    Dot = 148, "OpDot",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    LogicalOr = 166, "OpLogicalOr",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    LogicalAnd = 167, "OpLogicalAnd",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    LogicalNot = 168, "OpLogicalNot",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    Select = 169, "OpSelect",
        caps [], result true, fixed [IdRef, IdRef, IdRef, IdRef], tail Tail::None;
    IEqual = 170, "OpIEqual",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    INotEqual = 171, "OpINotEqual",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    UGreaterThan = 172, "OpUGreaterThan",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    SGreaterThan = 173, "OpSGreaterThan",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    ULessThan = 176, "OpULessThan",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    SLessThan = 177, "OpSLessThan",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    FOrdEqual = 180, "OpFOrdEqual",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    FOrdLessThan = 184, "OpFOrdLessThan",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    FOrdGreaterThan = 186, "OpFOrdGreaterThan",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    ShiftRightLogical = 194, "OpShiftRightLogical",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    ShiftLeftLogical = 196, "OpShiftLeftLogical",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    BitwiseOr = 197, "OpBitwiseOr",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    BitwiseXor = 198, "OpBitwiseXor",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    BitwiseAnd = 199, "OpBitwiseAnd",
        caps [], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    Not = 200, "OpNot",
        caps [], result true, fixed [IdRef, IdRef], tail Tail::None;
    Phi = 245, "OpPhi",
        caps [], result true, fixed [IdRef], tail Tail::Repeated(OperandKind::IdRef);
    LoopMerge = 246, "OpLoopMerge",
        caps [], result false, fixed [IdRef, IdRef, LiteralInt32], tail Tail::None;
    SelectionMerge = 247, "OpSelectionMerge",
        caps [], result false, fixed [IdRef, LiteralInt32], tail Tail::None;
    Label = 248, "OpLabel",
        caps [], result true, fixed [], tail Tail::None;
    Branch = 249, "OpBranch",
        caps [], result false, fixed [IdRef], tail Tail::None;
    BranchConditional = 250, "OpBranchConditional",
        caps [], result false, fixed [IdRef, IdRef, IdRef], tail Tail::Repeated(OperandKind::LiteralInt32);
    Return = 253, "OpReturn",
        caps [], result false, fixed [], tail Tail::None;
    ReturnValue = 254, "OpReturnValue",
        caps [], result false, fixed [IdRef], tail Tail::None;
    Unreachable = 255, "OpUnreachable",
        caps [], result false, fixed [], tail Tail::None;
    GroupAll = 261, "OpGroupAll",
        caps [Groups], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    GroupAny = 262, "OpGroupAny",
        caps [Groups], result true, fixed [IdRef, IdRef, IdRef], tail Tail::None;
    GroupBroadcast = 263, "OpGroupBroadcast",
        caps [Groups], result true, fixed [IdRef, IdRef, IdRef, IdRef], tail Tail::None;
    GroupIAdd = 264, "OpGroupIAdd",
        caps [Groups], result true, fixed [IdRef, IdRef, GroupOperation, IdRef], tail Tail::None;
    GroupFAdd = 265, "OpGroupFAdd",
        caps [Groups], result true, fixed [IdRef, IdRef, GroupOperation, IdRef], tail Tail::None;
}

/// A single SPIR-V instruction with all of its operands attached
///
/// The word count is fixed at construction; operands cannot be mutated
/// afterwards, so it never needs to be recomputed.
#[derive(Clone, Debug)]
pub struct Instruction {
    op: Op,
    result_id: Option<Id>,
    operands: Vec<Operand>,
    word_count: u32,
}

impl Instruction {
    pub(crate) fn new(op: Op, result_id: Option<Id>, operands: Vec<Operand>) -> Instruction {
        // Decoded instructions legitimately carry no result id; the
        // constructors may never attach one to an opcode without a result
        debug_assert!(result_id.is_none() || op.has_result());

        let word_count = 1 + operands.iter().map(Operand::word_count).sum::<u32>();

        Instruction {
            op,
            result_id,
            operands,
            word_count,
        }
    }

    /// The opcode of this instruction
    pub fn op(&self) -> Op {
        self.op
    }

    /// The mnemonic of this instruction
    pub fn name(&self) -> &'static str {
        self.op.name()
    }

    /// The id this instruction defines, if it defines one
    pub fn result_id(&self) -> Option<Id> {
        self.result_id
    }

    /// The operand list, in declaration order (the defining id is carried
    /// out-of-band and is not part of this list)
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// The total encoded size in words, including the header word
    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    /// Every capability this instruction requires: the opcode's own
    /// requirements first, then each operand's in declaration order
    ///
    /// Duplicates are preserved; collapsing the list to unique membership is
    /// the module assembler's decision, not this layer's.
    pub fn capabilities(&self) -> Vec<Capability> {
        self.op
            .info()
            .capabilities
            .iter()
            .chain(self.operands.iter().flat_map(|op| op.capabilities().iter()))
            .cloned()
            .collect()
    }

    /// Width of the `%N = ` prefix this instruction prints, 0 without a
    /// result id
    pub fn assignment_width(&self) -> usize {
        match self.result_id {
            Some(id) => id.symbol_width() + 3,
            None => 0,
        }
    }
}

/// Structural equality: same opcode and equal operands
///
/// The defining id is deliberately excluded, so two definitions of the same
/// type or constant compare equal whatever ids they were assigned; this is
/// what allows interning declarations by value.
impl PartialEq for Instruction {
    fn eq(&self, other: &Instruction) -> bool {
        self.op == other.op && self.operands == other.operands
    }
}

impl Eq for Instruction {}

impl Hash for Instruction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.op.hash(state);
        self.operands.hash(state);
    }
}

impl Instruction {
    fn unary(op: Op, result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::new(
            op,
            Some(result),
            vec![Operand::IdRef(result_type), Operand::IdRef(value)],
        )
    }

    fn binary(op: Op, result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::new(
            op,
            Some(result),
            vec![
                Operand::IdRef(result_type),
                Operand::IdRef(lhs),
                Operand::IdRef(rhs),
            ],
        )
    }

    fn group(op: Op, result: Id, result_type: Id, execution: Id, operation: GroupOperation, value: Id) -> Instruction {
        Instruction::new(
            op,
            Some(result),
            vec![
                Operand::IdRef(result_type),
                Operand::IdRef(execution),
                Operand::GroupOperation(operation),
                Operand::IdRef(value),
            ],
        )
    }

    pub fn nop() -> Instruction {
        Instruction::new(Op::Nop, None, Vec::new())
    }

    pub fn undef(result: Id, result_type: Id) -> Instruction {
        Instruction::new(Op::Undef, Some(result), vec![Operand::IdRef(result_type)])
    }

    pub fn source(language: SourceLanguage, version: u32) -> Instruction {
        Instruction::new(
            Op::Source,
            None,
            vec![
                Operand::SourceLanguage(language),
                Operand::LiteralInt32(version),
            ],
        )
    }

    pub fn debug_name(target: Id, name: &str) -> Instruction {
        Instruction::new(
            Op::Name,
            None,
            vec![
                Operand::IdRef(target),
                Operand::LiteralString(name.into()),
            ],
        )
    }

    pub fn member_name(ty: Id, member: u32, name: &str) -> Instruction {
        Instruction::new(
            Op::MemberName,
            None,
            vec![
                Operand::IdRef(ty),
                Operand::LiteralInt32(member),
                Operand::LiteralString(name.into()),
            ],
        )
    }

    pub fn extension(name: &str) -> Instruction {
        Instruction::new(
            Op::Extension,
            None,
            vec![Operand::LiteralString(name.into())],
        )
    }

    pub fn ext_inst_import(result: Id, name: &str) -> Instruction {
        Instruction::new(
            Op::ExtInstImport,
            Some(result),
            vec![Operand::LiteralString(name.into())],
        )
    }

    pub fn ext_inst(
        result: Id,
        result_type: Id,
        set: Id,
        instruction: u32,
        args: Vec<Id>,
    ) -> Instruction {
        let mut operands = vec![
            Operand::IdRef(result_type),
            Operand::IdRef(set),
            Operand::LiteralInt32(instruction),
        ];
        operands.extend(args.into_iter().map(Operand::IdRef));
        Instruction::new(Op::ExtInst, Some(result), operands)
    }

    pub fn memory_model(addressing: AddressingModel, memory: MemoryModel) -> Instruction {
        Instruction::new(
            Op::MemoryModel,
            None,
            vec![
                Operand::AddressingModel(addressing),
                Operand::MemoryModel(memory),
            ],
        )
    }

    pub fn entry_point(
        model: ExecutionModel,
        entry: Id,
        name: &str,
        interface: Vec<Id>,
    ) -> Instruction {
        let mut operands = vec![
            Operand::ExecutionModel(model),
            Operand::IdRef(entry),
            Operand::LiteralString(name.into()),
        ];
        operands.extend(interface.into_iter().map(Operand::IdRef));
        Instruction::new(Op::EntryPoint, None, operands)
    }

    pub fn execution_mode(entry: Id, mode: ExecutionMode, literals: Vec<u32>) -> Instruction {
        let mut operands = vec![Operand::IdRef(entry), Operand::ExecutionMode(mode)];
        operands.extend(literals.into_iter().map(Operand::LiteralInt32));
        Instruction::new(Op::ExecutionMode, None, operands)
    }

    pub fn capability(capability: Capability) -> Instruction {
        Instruction::new(Op::Capability, None, vec![Operand::Capability(capability)])
    }

    pub fn type_void(result: Id) -> Instruction {
        Instruction::new(Op::TypeVoid, Some(result), Vec::new())
    }

    pub fn type_bool(result: Id) -> Instruction {
        Instruction::new(Op::TypeBool, Some(result), Vec::new())
    }

    pub fn type_int(result: Id, width: u32, signedness: u32) -> Instruction {
        Instruction::new(
            Op::TypeInt,
            Some(result),
            vec![
                Operand::LiteralInt32(width),
                Operand::LiteralInt32(signedness),
            ],
        )
    }

    pub fn type_float(result: Id, width: u32) -> Instruction {
        Instruction::new(Op::TypeFloat, Some(result), vec![Operand::LiteralInt32(width)])
    }

    pub fn type_vector(result: Id, component: Id, count: u32) -> Instruction {
        Instruction::new(
            Op::TypeVector,
            Some(result),
            vec![Operand::IdRef(component), Operand::LiteralInt32(count)],
        )
    }

    pub fn type_matrix(result: Id, column: Id, count: u32) -> Instruction {
        Instruction::new(
            Op::TypeMatrix,
            Some(result),
            vec![Operand::IdRef(column), Operand::LiteralInt32(count)],
        )
    }

    pub fn type_array(result: Id, element: Id, length: Id) -> Instruction {
        Instruction::new(
            Op::TypeArray,
            Some(result),
            vec![Operand::IdRef(element), Operand::IdRef(length)],
        )
    }

    pub fn type_struct(result: Id, members: Vec<Id>) -> Instruction {
        Instruction::new(
            Op::TypeStruct,
            Some(result),
            members.into_iter().map(Operand::IdRef).collect(),
        )
    }

    pub fn type_pointer(result: Id, storage_class: StorageClass, pointee: Id) -> Instruction {
        Instruction::new(
            Op::TypePointer,
            Some(result),
            vec![Operand::StorageClass(storage_class), Operand::IdRef(pointee)],
        )
    }

    pub fn type_function(result: Id, return_type: Id, parameters: Vec<Id>) -> Instruction {
        let mut operands = vec![Operand::IdRef(return_type)];
        operands.extend(parameters.into_iter().map(Operand::IdRef));
        Instruction::new(Op::TypeFunction, Some(result), operands)
    }

    pub fn type_event(result: Id) -> Instruction {
        Instruction::new(Op::TypeEvent, Some(result), Vec::new())
    }

    pub fn type_device_event(result: Id) -> Instruction {
        Instruction::new(Op::TypeDeviceEvent, Some(result), Vec::new())
    }

    pub fn type_queue(result: Id) -> Instruction {
        Instruction::new(Op::TypeQueue, Some(result), Vec::new())
    }

    pub fn type_pipe(result: Id, qualifier: AccessQualifier) -> Instruction {
        Instruction::new(
            Op::TypePipe,
            Some(result),
            vec![Operand::AccessQualifier(qualifier)],
        )
    }

    pub fn constant_true(result: Id, result_type: Id) -> Instruction {
        Instruction::new(Op::ConstantTrue, Some(result), vec![Operand::IdRef(result_type)])
    }

    pub fn constant_false(result: Id, result_type: Id) -> Instruction {
        Instruction::new(Op::ConstantFalse, Some(result), vec![Operand::IdRef(result_type)])
    }

    pub fn constant(result: Id, result_type: Id, value: u32) -> Instruction {
        Instruction::new(
            Op::Constant,
            Some(result),
            vec![Operand::IdRef(result_type), Operand::LiteralInt32(value)],
        )
    }

    pub fn constant_composite(result: Id, result_type: Id, constituents: Vec<Id>) -> Instruction {
        let mut operands = vec![Operand::IdRef(result_type)];
        operands.extend(constituents.into_iter().map(Operand::IdRef));
        Instruction::new(Op::ConstantComposite, Some(result), operands)
    }

    pub fn constant_null(result: Id, result_type: Id) -> Instruction {
        Instruction::new(Op::ConstantNull, Some(result), vec![Operand::IdRef(result_type)])
    }

    pub fn function(
        result: Id,
        result_type: Id,
        control: FunctionControl,
        function_type: Id,
    ) -> Instruction {
        Instruction::new(
            Op::Function,
            Some(result),
            vec![
                Operand::IdRef(result_type),
                Operand::FunctionControl(control),
                Operand::IdRef(function_type),
            ],
        )
    }

    pub fn function_parameter(result: Id, result_type: Id) -> Instruction {
        Instruction::new(
            Op::FunctionParameter,
            Some(result),
            vec![Operand::IdRef(result_type)],
        )
    }

    pub fn function_end() -> Instruction {
        Instruction::new(Op::FunctionEnd, None, Vec::new())
    }

    pub fn function_call(result: Id, result_type: Id, function: Id, args: Vec<Id>) -> Instruction {
        let mut operands = vec![Operand::IdRef(result_type), Operand::IdRef(function)];
        operands.extend(args.into_iter().map(Operand::IdRef));
        Instruction::new(Op::FunctionCall, Some(result), operands)
    }

    pub fn variable(
        result: Id,
        result_type: Id,
        storage_class: StorageClass,
        initializer: Option<Id>,
    ) -> Instruction {
        let mut operands = vec![
            Operand::IdRef(result_type),
            Operand::StorageClass(storage_class),
        ];
        operands.extend(initializer.map(Operand::IdRef));
        Instruction::new(Op::Variable, Some(result), operands)
    }

    pub fn load(
        result: Id,
        result_type: Id,
        pointer: Id,
        access: Option<MemoryAccess>,
    ) -> Instruction {
        let mut operands = vec![Operand::IdRef(result_type), Operand::IdRef(pointer)];
        operands.extend(access.map(Operand::MemoryAccess));
        Instruction::new(Op::Load, Some(result), operands)
    }

    pub fn store(pointer: Id, object: Id, access: Option<MemoryAccess>) -> Instruction {
        let mut operands = vec![Operand::IdRef(pointer), Operand::IdRef(object)];
        operands.extend(access.map(Operand::MemoryAccess));
        Instruction::new(Op::Store, None, operands)
    }

    pub fn access_chain(result: Id, result_type: Id, base: Id, indexes: Vec<Id>) -> Instruction {
        let mut operands = vec![Operand::IdRef(result_type), Operand::IdRef(base)];
        operands.extend(indexes.into_iter().map(Operand::IdRef));
        Instruction::new(Op::AccessChain, Some(result), operands)
    }

    pub fn in_bounds_access_chain(
        result: Id,
        result_type: Id,
        base: Id,
        indexes: Vec<Id>,
    ) -> Instruction {
        let mut operands = vec![Operand::IdRef(result_type), Operand::IdRef(base)];
        operands.extend(indexes.into_iter().map(Operand::IdRef));
        Instruction::new(Op::InBoundsAccessChain, Some(result), operands)
    }

    pub fn ptr_access_chain(
        result: Id,
        result_type: Id,
        base: Id,
        element: Id,
        indexes: Vec<Id>,
    ) -> Instruction {
        let mut operands = vec![
            Operand::IdRef(result_type),
            Operand::IdRef(base),
            Operand::IdRef(element),
        ];
        operands.extend(indexes.into_iter().map(Operand::IdRef));
        Instruction::new(Op::PtrAccessChain, Some(result), operands)
    }

    pub fn decorate(target: Id, decoration: Decoration, literals: Vec<u32>) -> Instruction {
        let mut operands = vec![Operand::IdRef(target), Operand::Decoration(decoration)];
        operands.extend(literals.into_iter().map(Operand::LiteralInt32));
        Instruction::new(Op::Decorate, None, operands)
    }

    pub fn member_decorate(
        ty: Id,
        member: u32,
        decoration: Decoration,
        literals: Vec<u32>,
    ) -> Instruction {
        let mut operands = vec![
            Operand::IdRef(ty),
            Operand::LiteralInt32(member),
            Operand::Decoration(decoration),
        ];
        operands.extend(literals.into_iter().map(Operand::LiteralInt32));
        Instruction::new(Op::MemberDecorate, None, operands)
    }

    pub fn convert_f_to_u(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::ConvertFToU, result, result_type, value)
    }

    pub fn convert_f_to_s(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::ConvertFToS, result, result_type, value)
    }

    pub fn convert_s_to_f(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::ConvertSToF, result, result_type, value)
    }

    pub fn convert_u_to_f(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::ConvertUToF, result, result_type, value)
    }

    pub fn u_convert(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::UConvert, result, result_type, value)
    }

    pub fn s_convert(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::SConvert, result, result_type, value)
    }

    pub fn f_convert(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::FConvert, result, result_type, value)
    }

    pub fn convert_ptr_to_u(result: Id, result_type: Id, pointer: Id) -> Instruction {
        Instruction::unary(Op::ConvertPtrToU, result, result_type, pointer)
    }

    pub fn convert_u_to_ptr(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::ConvertUToPtr, result, result_type, value)
    }

    pub fn bitcast(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::Bitcast, result, result_type, value)
    }

    pub fn s_negate(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::SNegate, result, result_type, value)
    }

    pub fn f_negate(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::FNegate, result, result_type, value)
    }

    pub fn i_add(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::IAdd, result, result_type, lhs, rhs)
    }

    pub fn f_add(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::FAdd, result, result_type, lhs, rhs)
    }

    pub fn i_sub(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::ISub, result, result_type, lhs, rhs)
    }

    pub fn f_sub(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::FSub, result, result_type, lhs, rhs)
    }

    pub fn i_mul(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::IMul, result, result_type, lhs, rhs)
    }

    pub fn f_mul(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::FMul, result, result_type, lhs, rhs)
    }

    pub fn u_div(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::UDiv, result, result_type, lhs, rhs)
    }

    pub fn s_div(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::SDiv, result, result_type, lhs, rhs)
    }

    pub fn f_div(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::FDiv, result, result_type, lhs, rhs)
    }

    pub fn u_mod(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::UMod, result, result_type, lhs, rhs)
    }

    pub fn s_rem(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::SRem, result, result_type, lhs, rhs)
    }

    pub fn s_mod(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::SMod, result, result_type, lhs, rhs)
    }

    pub fn f_rem(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::FRem, result, result_type, lhs, rhs)
    }

    pub fn f_mod(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::FMod, result, result_type, lhs, rhs)
    }

    pub fn vector_times_scalar(result: Id, result_type: Id, vector: Id, scalar: Id) -> Instruction {
        Instruction::binary(Op::VectorTimesScalar, result, result_type, vector, scalar)
    }

    pub fn dot(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::Dot, result, result_type, lhs, rhs)
    }

    pub fn logical_or(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::LogicalOr, result, result_type, lhs, rhs)
    }

    pub fn logical_and(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::LogicalAnd, result, result_type, lhs, rhs)
    }

    pub fn logical_not(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::LogicalNot, result, result_type, value)
    }

    pub fn select(result: Id, result_type: Id, condition: Id, a: Id, b: Id) -> Instruction {
        Instruction::new(
            Op::Select,
            Some(result),
            vec![
                Operand::IdRef(result_type),
                Operand::IdRef(condition),
                Operand::IdRef(a),
                Operand::IdRef(b),
            ],
        )
    }

    pub fn i_equal(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::IEqual, result, result_type, lhs, rhs)
    }

    pub fn i_not_equal(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::INotEqual, result, result_type, lhs, rhs)
    }

    pub fn u_greater_than(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::UGreaterThan, result, result_type, lhs, rhs)
    }

    pub fn s_greater_than(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::SGreaterThan, result, result_type, lhs, rhs)
    }

    pub fn u_less_than(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::ULessThan, result, result_type, lhs, rhs)
    }

    pub fn s_less_than(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::SLessThan, result, result_type, lhs, rhs)
    }

    pub fn f_ord_equal(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::FOrdEqual, result, result_type, lhs, rhs)
    }

    pub fn f_ord_less_than(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::FOrdLessThan, result, result_type, lhs, rhs)
    }

    pub fn f_ord_greater_than(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::FOrdGreaterThan, result, result_type, lhs, rhs)
    }

    pub fn shift_right_logical(result: Id, result_type: Id, base: Id, shift: Id) -> Instruction {
        Instruction::binary(Op::ShiftRightLogical, result, result_type, base, shift)
    }

    pub fn shift_left_logical(result: Id, result_type: Id, base: Id, shift: Id) -> Instruction {
        Instruction::binary(Op::ShiftLeftLogical, result, result_type, base, shift)
    }

    pub fn bitwise_or(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::BitwiseOr, result, result_type, lhs, rhs)
    }

    pub fn bitwise_xor(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::BitwiseXor, result, result_type, lhs, rhs)
    }

    pub fn bitwise_and(result: Id, result_type: Id, lhs: Id, rhs: Id) -> Instruction {
        Instruction::binary(Op::BitwiseAnd, result, result_type, lhs, rhs)
    }

    pub fn not(result: Id, result_type: Id, value: Id) -> Instruction {
        Instruction::unary(Op::Not, result, result_type, value)
    }

    /// Build an `OpPhi`; the `(value, parent block)` pairs are flattened
    /// into the operand list in order
    pub fn phi(result: Id, result_type: Id, sources: Vec<(Id, Id)>) -> Instruction {
        let mut operands = vec![Operand::IdRef(result_type)];
        for (value, parent) in sources {
            operands.push(Operand::IdRef(value));
            operands.push(Operand::IdRef(parent));
        }
        Instruction::new(Op::Phi, Some(result), operands)
    }

    pub fn loop_merge(merge: Id, continue_target: Id, control: u32) -> Instruction {
        Instruction::new(
            Op::LoopMerge,
            None,
            vec![
                Operand::IdRef(merge),
                Operand::IdRef(continue_target),
                Operand::LiteralInt32(control),
            ],
        )
    }

    pub fn selection_merge(merge: Id, control: u32) -> Instruction {
        Instruction::new(
            Op::SelectionMerge,
            None,
            vec![Operand::IdRef(merge), Operand::LiteralInt32(control)],
        )
    }

    pub fn label(result: Id) -> Instruction {
        Instruction::new(Op::Label, Some(result), Vec::new())
    }

    pub fn branch(target: Id) -> Instruction {
        Instruction::new(Op::Branch, None, vec![Operand::IdRef(target)])
    }

    pub fn branch_conditional(
        condition: Id,
        true_label: Id,
        false_label: Id,
        weights: Vec<u32>,
    ) -> Instruction {
        let mut operands = vec![
            Operand::IdRef(condition),
            Operand::IdRef(true_label),
            Operand::IdRef(false_label),
        ];
        operands.extend(weights.into_iter().map(Operand::LiteralInt32));
        Instruction::new(Op::BranchConditional, None, operands)
    }

    pub fn ret() -> Instruction {
        Instruction::new(Op::Return, None, Vec::new())
    }

    pub fn return_value(value: Id) -> Instruction {
        Instruction::new(Op::ReturnValue, None, vec![Operand::IdRef(value)])
    }

    pub fn unreachable() -> Instruction {
        Instruction::new(Op::Unreachable, None, Vec::new())
    }

    pub fn group_all(result: Id, result_type: Id, execution: Id, predicate: Id) -> Instruction {
        Instruction::binary(Op::GroupAll, result, result_type, execution, predicate)
    }

    pub fn group_any(result: Id, result_type: Id, execution: Id, predicate: Id) -> Instruction {
        Instruction::binary(Op::GroupAny, result, result_type, execution, predicate)
    }

    pub fn group_broadcast(
        result: Id,
        result_type: Id,
        execution: Id,
        value: Id,
        local_id: Id,
    ) -> Instruction {
        Instruction::new(
            Op::GroupBroadcast,
            Some(result),
            vec![
                Operand::IdRef(result_type),
                Operand::IdRef(execution),
                Operand::IdRef(value),
                Operand::IdRef(local_id),
            ],
        )
    }

    pub fn group_i_add(
        result: Id,
        result_type: Id,
        execution: Id,
        operation: GroupOperation,
        value: Id,
    ) -> Instruction {
        Instruction::group(Op::GroupIAdd, result, result_type, execution, operation, value)
    }

    pub fn group_f_add(
        result: Id,
        result_type: Id,
        execution: Id,
        operation: GroupOperation,
        value: Id,
    ) -> Instruction {
        Instruction::group(Op::GroupFAdd, result, result_type, execution, operation, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_includes_header() {
        let inst = Instruction::type_int(Id(5), 32, 1);
        assert_eq!(inst.word_count(), 3);

        let inst = Instruction::entry_point(ExecutionModel::Kernel, Id(4), "main", vec![Id(7)]);
        let operand_words: u32 = inst.operands().iter().map(Operand::word_count).sum();
        assert_eq!(inst.word_count(), 1 + operand_words);
    }

    #[test]
    fn capability_list_is_not_deduplicated() {
        // TypePipe requires Pipes on its own, and the access qualifier
        // reports Kernel; nothing in between may drop or merge entries
        let inst = Instruction::type_pipe(Id(1), AccessQualifier::ReadWrite);
        assert_eq!(
            inst.capabilities(),
            vec![Capability::Pipes, Capability::Kernel]
        );
    }

    #[test]
    fn equality_ignores_the_result_id() {
        let a = Instruction::type_array(Id(10), Id(2), Id(3));
        let b = Instruction::type_array(Id(99), Id(2), Id(3));
        let c = Instruction::type_array(Id(10), Id(2), Id(4));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn equality_never_crosses_kinds() {
        // Same operand words, different opcodes
        let a = Instruction::type_vector(Id(1), Id(2), 4);
        let b = Instruction::type_matrix(Id(1), Id(2), 4);
        assert_ne!(a, b);
    }
}
