extern crate pretty_assertions;
extern crate spirv_codec;

use pretty_assertions::assert_eq;
use spirv_codec::prelude::*;

#[test]
fn word_count_is_one_plus_operand_words() {
    let instructions = vec![
        Instruction::nop(),
        Instruction::capability(Capability::Kernel),
        Instruction::type_int(Id(5), 32, 1),
        Instruction::entry_point(ExecutionModel::Kernel, Id(4), "main", vec![Id(7), Id(8)]),
        Instruction::decorate(Id(9), Decoration::Location, vec![0]),
        Instruction::load(Id(10), Id(2), Id(9), Some(MemoryAccess::NONE)),
        Instruction::phi(Id(11), Id(2), vec![(Id(3), Id(4)), (Id(5), Id(6))]),
    ];

    for inst in &instructions {
        let operand_words: u32 = inst.operands().iter().map(Operand::word_count).sum();
        assert_eq!(inst.word_count(), 1 + operand_words, "{}", inst.name());
    }
}

#[test]
fn type_int_encodes_to_three_words() {
    let inst = Instruction::type_int(Id(5), 32, 1);
    assert_eq!(inst.word_count(), 3);

    let words = inst.assemble().unwrap();
    assert_eq!(words, vec![(3 << 16) | 21, 32, 1]);
}

#[test]
fn branch_conditional_without_weights() {
    let inst = Instruction::branch_conditional(Id(1), Id(2), Id(3), vec![]);
    assert_eq!(inst.word_count(), 4);
    assert_eq!(inst.result_id(), None);

    // Plain ids carry no capability requirements of their own
    assert_eq!(inst.capabilities(), Vec::<Capability>::new());
}

#[test]
fn capability_concatenation_preserves_duplicates() {
    let inst = Instruction::type_pipe(Id(1), AccessQualifier::ReadWrite);

    let own = inst.op().capabilities().len();
    let operands: usize = inst
        .operands()
        .iter()
        .map(|op| op.capabilities().len())
        .sum();
    assert_eq!(inst.capabilities().len(), own + operands);
    assert_eq!(
        inst.capabilities(),
        vec![Capability::Pipes, Capability::Kernel]
    );
}

#[test]
fn instruction_round_trip() {
    let instructions = vec![
        Instruction::capability(Capability::Addresses),
        Instruction::memory_model(AddressingModel::Physical64, MemoryModel::OpenCL),
        Instruction::entry_point(ExecutionModel::Kernel, Id(4), "vector_add", vec![Id(7)]),
        Instruction::execution_mode(Id(4), ExecutionMode::LocalSize, vec![64, 1, 1]),
        Instruction::type_int(Id(5), 32, 0),
        Instruction::type_pointer(Id(6), StorageClass::CrossWorkgroup, Id(5)),
        Instruction::variable(Id(7), Id(6), StorageClass::CrossWorkgroup, None),
        Instruction::constant(Id(8), Id(5), 42),
        Instruction::load(Id(9), Id(5), Id(7), Some(MemoryAccess { volatile: true, nontemporal: false })),
        Instruction::i_add(Id(10), Id(5), Id(9), Id(8)),
        Instruction::store(Id(7), Id(10), None),
        Instruction::function_end(),
    ];

    for inst in &instructions {
        let words = inst.assemble().unwrap();
        let (decoded, consumed) = Instruction::decode(&words).unwrap();

        assert_eq!(consumed, words.len(), "{}", inst.name());
        assert_eq!(&decoded, inst, "{}", inst.name());
        assert_eq!(decoded.op(), inst.op());
    }
}

#[test]
fn equality_is_reflexive_and_symmetric() {
    let a = Instruction::type_array(Id(10), Id(2), Id(3));
    let b = Instruction::type_array(Id(42), Id(2), Id(3));

    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
}

#[test]
fn interning_types_by_value() {
    use std::collections::HashSet;

    // Two array types with the same element type and length, different
    // assigned ids, must land in the same interning bucket
    let mut types = HashSet::new();
    types.insert(Instruction::type_array(Id(10), Id(2), Id(3)));
    types.insert(Instruction::type_array(Id(99), Id(2), Id(3)));
    types.insert(Instruction::type_array(Id(11), Id(2), Id(4)));

    assert_eq!(types.len(), 2);
}

#[test]
fn word_count_overflow_is_fatal() {
    let members = (0..70_000).map(Id).collect();
    let inst = Instruction::type_struct(Id(1), members);
    assert!(inst.word_count() > 0xFFFF);

    let err = inst.assemble().unwrap_err();
    match *err.kind() {
        ErrorKind::WordCountOverflow(name, words) => {
            assert_eq!(name, "OpTypeStruct");
            assert_eq!(words, inst.word_count());
        }
        ref other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn module_binary_round_trip() {
    let mut module = Module::new();
    module.push(Instruction::capability(Capability::Kernel));
    module.push(Instruction::capability(Capability::Addresses));
    module.push(Instruction::memory_model(
        AddressingModel::Physical64,
        MemoryModel::OpenCL,
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
    module.header.bound = module.compute_bound();

    let words = module.assemble().unwrap();
    assert_eq!(words[0], MAGIC_NUMBER);
    assert_eq!(words[3], 5);

    let decoded = Module::decode(&words).unwrap();
    assert_eq!(decoded.header, module.header);
    assert_eq!(decoded.instructions, module.instructions);
}

#[test]
fn module_bytes_are_little_endian() {
    let mut module = Module::new();
    module.push(Instruction::capability(Capability::Kernel));

    let words = module.clone().assemble().unwrap();
    let bytes = module.into_binary().unwrap();

    assert_eq!(bytes.len(), words.len() * 4);
    assert_eq!(&bytes[..4], &[0x03, 0x02, 0x23, 0x07]);
}

#[test]
fn module_capability_reporting() {
    let mut module = Module::new();
    module.push(Instruction::type_pipe(Id(1), AccessQualifier::ReadOnly));
    module.push(Instruction::type_queue(Id(2)));
    module.push(Instruction::type_matrix(Id(3), Id(4), 4));

    // Raw list keeps every entry in sequence order
    assert_eq!(
        module.capabilities(),
        vec![
            Capability::Pipes,
            Capability::Kernel,
            Capability::DeviceEnqueue,
            Capability::Matrix,
        ]
    );

    // The deduplicated view keeps first-seen order
    assert_eq!(
        module.unique_capabilities(),
        vec![
            Capability::Pipes,
            Capability::Kernel,
            Capability::DeviceEnqueue,
            Capability::Matrix,
        ]
    );

    // A duplicate only shows up in the raw list
    module.push(Instruction::type_pipe(Id(5), AccessQualifier::WriteOnly));
    assert_eq!(module.capabilities().len(), 6);
    assert_eq!(module.unique_capabilities().len(), 4);
}

#[test]
fn decoding_a_bad_magic_number_fails() {
    let err = Module::decode(&[0xDEAD_BEEF, 0, 0, 0, 0]).unwrap_err();
    match *err.kind() {
        ErrorKind::InvalidHeader(magic) => assert_eq!(magic, 0xDEAD_BEEF),
        ref other => panic!("unexpected error: {}", other),
    }
}
