mod utils;

use std::io::Cursor;
use tmachine::{
    ExceptFlags, Instruction, LoadError, Opcode, Reg, RunConfig, Vm, MEMORY_SIZE,
};

#[test]
fn empty_image_halts_immediately() {
    // Zeroed memory decodes as hlt everywhere.
    let vm = utils::run_vm(&[], b"");
    assert!(vm.context().ef.is_empty());
    assert_eq!(vm.context().ip, 8);
}

#[test]
fn unaligned_jump_faults_before_the_next_fetch() {
    let (ctx, _) = utils::run(
        "\
mov gp0, 0x1
jmp gp0
mov gp1, 0x1
hlt
",
        b"",
    );
    assert_eq!(ctx.ef, ExceptFlags::ADDR_ALIGN);
    assert_eq!(ctx.ip, 1);
    // The instruction after the jump never ran.
    assert_eq!(ctx.reg(Reg::Gp1), 0);
}

#[test]
fn jump_past_memory_faults() {
    let (ctx, _) = utils::run(
        "\
mov gp0, 0x1000000
jmp gp0
hlt
",
        b"",
    );
    assert_eq!(ctx.ef, ExceptFlags::ADDR_FAULT);
}

#[test]
fn unknown_opcode_faults() {
    let isn = Instruction {
        op: 0x3ff,
        reg1: 0x01,
        reg2: 0x00,
        imm: 0,
    };
    let vm = utils::run_vm(&isn.encode(), b"");
    assert_eq!(vm.context().ef, ExceptFlags::UNKNOWN_INSTRUCTION);
}

#[test]
fn reserved_opcodes_fault() {
    for op in [Opcode::Jne, Opcode::Loa, Opcode::Sip] {
        let vm = utils::run_vm(&Instruction::unary(op, Reg::Gp0).encode(), b"");
        assert_eq!(vm.context().ef, ExceptFlags::UNKNOWN_INSTRUCTION);
    }
}

#[test]
fn non_one_hot_register_mask_faults() {
    let isn = Instruction {
        op: Opcode::Not.into(),
        reg1: 0x03,
        reg2: 0x00,
        imm: 0,
    };
    let vm = utils::run_vm(&isn.encode(), b"");
    assert_eq!(vm.context().ef, ExceptFlags::REG_FAULT);
}

#[test]
fn sto_to_unaligned_address_faults() {
    let (ctx, _) = utils::run("mov gp0, 0x1\nsto gp0, 0x101\nhlt\n", b"");
    assert_eq!(ctx.ef, ExceptFlags::ADDR_ALIGN);
}

#[test]
fn sto_past_memory_faults() {
    let (ctx, _) = utils::run("sto gp0, 0x1000000\nhlt\n", b"");
    assert_eq!(ctx.ef, ExceptFlags::ADDR_FAULT);
}

#[test]
fn fault_keeps_earlier_results() {
    let (ctx, _) = utils::run(
        "\
mov gp0, 0x2a
mov gp1, 0x3
jmp gp1
hlt
",
        b"",
    );
    assert_eq!(ctx.ef, ExceptFlags::ADDR_ALIGN);
    assert_eq!(ctx.reg(Reg::Gp0), 42);
}

#[test]
fn oversized_image_is_rejected() {
    let mut vm = Vm::new(Cursor::new(Vec::new()), Vec::new(), RunConfig::default());
    let image = vec![0; MEMORY_SIZE + 8];
    assert_eq!(
        vm.load(&image),
        Err(LoadError::ImageTooLarge { len: MEMORY_SIZE + 8 })
    );
}
