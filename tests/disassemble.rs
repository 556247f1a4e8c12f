extern crate pretty_assertions;
extern crate spirv_codec;

use pretty_assertions::assert_eq;
use spirv_codec::prelude::*;

#[test]
fn type_int_prints_with_its_assignment() {
    let inst = Instruction::type_int(Id(5), 32, 1);
    assert_eq!(inst.disassemble(), "%5 = OpTypeInt 32 1\n");
}

#[test]
fn mnemonics_share_a_column() {
    let mut module = Module::new();
    module.push(Instruction::capability(Capability::Kernel));
    module.push(Instruction::type_int(Id(5), 32, 1));
    module.push(Instruction::constant(Id(123), Id(5), 7));

    let text = module.disassemble();
    let column: Vec<usize> = text
        .lines()
        .map(|line| {
            line.find("Op")
                .unwrap_or_else(|| panic!("no mnemonic in {:?}", line))
        })
        .collect();

    // The widest prefix is `%123 = ` (7 characters); every mnemonic starts
    // there, result id or not
    assert_eq!(column, vec![7, 7, 7]);
    assert_eq!(
        text,
        "       OpCapability Kernel\n  %5 = OpTypeInt 32 1\n%123 = OpConstant %5 7\n"
    );
}

#[test]
fn operands_are_space_separated() {
    let inst = Instruction::branch_conditional(Id(1), Id(2), Id(3), vec![60, 40]);
    assert_eq!(inst.disassemble(), "OpBranchConditional %1 %2 %3 60 40\n");

    let inst = Instruction::decorate(Id(9), Decoration::Location, vec![0]);
    assert_eq!(inst.disassemble(), "OpDecorate %9 Location 0\n");
}

#[test]
fn enum_operands_print_their_symbolic_names() {
    let inst = Instruction::type_pointer(Id(6), StorageClass::CrossWorkgroup, Id(5));
    assert_eq!(inst.disassemble(), "%6 = OpTypePointer CrossWorkgroup %5\n");

    let inst = Instruction::function(Id(4), Id(1), FunctionControl::NONE, Id(2));
    assert_eq!(inst.disassemble(), "%4 = OpFunction %1 None %2\n");

    let control = FunctionControl {
        inline_hint: true,
        pure_function: true,
        ..FunctionControl::NONE
    };
    let inst = Instruction::function(Id(4), Id(1), control, Id(2));
    assert_eq!(inst.disassemble(), "%4 = OpFunction %1 Inline|Pure %2\n");
}

#[test]
fn a_small_kernel_module() {
    let mut module = Module::new();
    module.push(Instruction::capability(Capability::Kernel));
    module.push(Instruction::memory_model(
        AddressingModel::Physical64,
        MemoryModel::OpenCL,
    ));
    module.push(Instruction::entry_point(
        ExecutionModel::Kernel,
        Id(4),
        "main",
        vec![],
    ));
    module.push(Instruction::type_void(Id(1)));
    module.push(Instruction::type_function(Id(2), Id(1), vec![]));
    module.push(Instruction::function(
        Id(4),
        Id(1),
        FunctionControl::NONE,
        Id(2),
    ));
    module.push(Instruction::label(Id(3)));
    module.push(Instruction::ret());
    module.push(Instruction::function_end());

    assert_eq!(
        module.disassemble(),
        concat!(
            "     OpCapability Kernel\n",
            "     OpMemoryModel Physical64 OpenCL\n",
            "     OpEntryPoint Kernel %4 \"main\"\n",
            "%1 = OpTypeVoid\n",
            "%2 = OpTypeFunction %1\n",
            "%4 = OpFunction %1 None %2\n",
            "%3 = OpLabel\n",
            "     OpReturn\n",
            "     OpFunctionEnd\n",
        )
    );
}
