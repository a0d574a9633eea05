//! Tests for the instruction format and disassembler.

use crate::code::{
    Opcode, disasm, iabc, iabx, iasbx, iget_a, iget_b, iget_bx, iget_c, iget_op, iget_sbx, is_k,
};

#[test]
fn field_roundtrip() {
    let ins = iabc(Opcode::GetMbr, 1, 2, 0x100 | 11);
    assert_eq!(iget_op(ins), Some(Opcode::GetMbr));
    assert_eq!(iget_a(ins), 1);
    assert_eq!(iget_b(ins), 2);
    assert_eq!(iget_c(ins), 0x100 | 11);
    assert!(!is_k(iget_b(ins)));
    assert!(is_k(iget_c(ins)));
}

#[test]
fn bx_roundtrip() {
    let ins = iabx(Opcode::GetGbl, 3, 0x2FFFF);
    assert_eq!(iget_op(ins), Some(Opcode::GetGbl));
    assert_eq!(iget_a(ins), 3);
    assert_eq!(iget_bx(ins), 0x2FFFF);
}

#[test]
fn sbx_sign_extension() {
    let ins = iasbx(Opcode::Jmp, 0, -5);
    assert_eq!(iget_sbx(ins), -5);
    let ins = iasbx(Opcode::Jmp, 0, 1000);
    assert_eq!(iget_sbx(ins), 1000);
}

#[test]
fn opcode_table_bounds() {
    assert_eq!(Opcode::from_u8(0), Some(Opcode::Add));
    assert_eq!(Opcode::from_u8(Opcode::End as u8), Some(Opcode::End));
    assert_eq!(Opcode::from_u8(Opcode::End as u8 + 1), None);
}

#[test]
fn disasm_global_access() {
    let ins = iabx(Opcode::GetGbl, 1, 0);
    assert_eq!(disasm(ins, 0), "  0000  GETGBL  R1 G0");
}

#[test]
fn disasm_member_access_with_constant() {
    let ins = iabc(Opcode::GetMbr, 1, 2, 0x100 | 15);
    assert_eq!(disasm(ins, 4), "  0004  GETMBR  R1 R2 K15");
}

#[test]
fn disasm_return() {
    let ins = iabc(Opcode::Ret, 1, 0, 0);
    assert_eq!(disasm(ins, 3), "  0003  RET     1 R0");
}

#[test]
fn disasm_jump_target() {
    let ins = iasbx(Opcode::Jmp, 0, 2);
    assert_eq!(disasm(ins, 5), "  0005  JMP     #0008");
}

#[test]
fn disasm_backward_jump() {
    let ins = iasbx(Opcode::Jmp, 0, -3);
    assert_eq!(disasm(ins, 5), "  0005  JMP     #0003");
}

#[test]
fn disasm_end_has_no_operands() {
    let ins = iabc(Opcode::End, 0, 0, 0);
    assert_eq!(disasm(ins, 9), "  0009  END");
}

#[test]
fn disasm_load_int_uses_signed_operand() {
    let ins = iasbx(Opcode::LdInt, 2, -42);
    assert_eq!(disasm(ins, 0), "  0000  LDINT   R2 -42");
}

#[test]
fn disasm_invalid_opcode() {
    let ins = 63u32 << 26;
    assert_eq!(disasm(ins, 0), "  0000  INVALID 0xFC000000");
}
