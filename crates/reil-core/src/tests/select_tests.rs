use crate::bil::{BinOpKind, CastKind, UnOpKind};
use crate::reil::Opcode;
use crate::select::{binop_opcode, cast_opcode, unop_opcode};
use crate::TranslateError;

#[test]
fn test_binop_selection() {
    let mapped = [
        (BinOpKind::Plus, Opcode::Add),
        (BinOpKind::Minus, Opcode::Sub),
        (BinOpKind::Times, Opcode::Mul),
        (BinOpKind::Divide, Opcode::Div),
        (BinOpKind::Mod, Opcode::Mod),
        (BinOpKind::Lshift, Opcode::Shl),
        (BinOpKind::Rshift, Opcode::Shr),
        (BinOpKind::Lrotate, Opcode::Rol),
        (BinOpKind::Rrotate, Opcode::Ror),
        (BinOpKind::LogicAnd, Opcode::Band),
        (BinOpKind::LogicOr, Opcode::Bor),
        (BinOpKind::BitAnd, Opcode::And),
        (BinOpKind::BitOr, Opcode::Or),
        (BinOpKind::Xor, Opcode::Xor),
        (BinOpKind::Eq, Opcode::Eq),
        (BinOpKind::Lt, Opcode::L),
        (BinOpKind::Le, Opcode::Le),
        (BinOpKind::Sdivide, Opcode::Sdiv),
        (BinOpKind::Smod, Opcode::Smod),
    ];
    for (op, expected) in mapped {
        assert_eq!(binop_opcode(op).unwrap(), expected, "{}", op);
    }
}

#[test]
fn test_unsupported_binops_are_rejected() {
    for op in [
        BinOpKind::Arshift,
        BinOpKind::Neq,
        BinOpKind::Gt,
        BinOpKind::Ge,
    ] {
        assert_eq!(
            binop_opcode(op),
            Err(TranslateError::UnsupportedOperator(op.to_string()))
        );
    }
}

#[test]
fn test_unop_selection() {
    assert_eq!(unop_opcode(UnOpKind::Neg), Opcode::Neg);
    assert_eq!(unop_opcode(UnOpKind::Not), Opcode::Bnot);
}

#[test]
fn test_cast_selection() {
    assert_eq!(cast_opcode(CastKind::Low).unwrap(), Opcode::CastLo);
    assert_eq!(cast_opcode(CastKind::High).unwrap(), Opcode::CastHi);
    assert_eq!(cast_opcode(CastKind::Unsigned).unwrap(), Opcode::CastU);
    assert_eq!(
        cast_opcode(CastKind::Signed),
        Err(TranslateError::UnsupportedCast("signed".into()))
    );
}
