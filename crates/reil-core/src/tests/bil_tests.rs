use crate::bil::{BinOpKind, CastKind, Exp, Stmt, UnOpKind, Width};
use crate::TranslateError;
use pretty_assertions::assert_eq;

#[test]
fn test_width_from_bits() {
    assert_eq!(Width::from_bits(1).unwrap(), Width::W1);
    assert_eq!(Width::from_bits(8).unwrap(), Width::W8);
    assert_eq!(Width::from_bits(16).unwrap(), Width::W16);
    assert_eq!(Width::from_bits(32).unwrap(), Width::W32);
    assert_eq!(Width::from_bits(64).unwrap(), Width::W64);
}

#[test]
fn test_width_rejects_unknown_bit_counts() {
    for bits in [0, 2, 7, 24, 128] {
        assert_eq!(
            Width::from_bits(bits),
            Err(TranslateError::InvalidWidth(bits))
        );
    }
}

#[test]
fn test_width_masks() {
    assert_eq!(Width::W1.mask(), 0x1);
    assert_eq!(Width::W8.mask(), 0xff);
    assert_eq!(Width::W16.mask(), 0xffff);
    assert_eq!(Width::W32.mask(), 0xffff_ffff);
    assert_eq!(Width::W64.mask(), u64::MAX);
}

#[test]
fn test_atomicity() {
    assert!(Exp::reg("R_EAX", Width::W32).is_atomic());
    assert!(Exp::int(5, Width::W32).is_atomic());
    assert!(!Exp::mem(Exp::reg("R_EBX", Width::W32)).is_atomic());
    assert!(!Exp::name("label_1").is_atomic());
    assert!(!Exp::relative(8, Width::W32).is_atomic());
    assert!(!Exp::unop(UnOpKind::Neg, Exp::int(1, Width::W8)).is_atomic());
}

#[test]
fn test_expression_widths() {
    assert_eq!(Exp::reg("R_AX", Width::W16).width(), Some(Width::W16));
    assert_eq!(Exp::int(0, Width::W1).width(), Some(Width::W1));
    assert_eq!(
        Exp::cast(CastKind::Low, Width::W8, Exp::reg("R_EAX", Width::W32)).width(),
        Some(Width::W8)
    );
    assert_eq!(Exp::mem(Exp::reg("R_EBX", Width::W32)).width(), None);
    assert_eq!(Exp::name("out").width(), None);
}

#[test]
fn test_expression_display() {
    let add = Exp::binop(
        BinOpKind::Plus,
        Exp::reg("R_EBX", Width::W32),
        Exp::int(4, Width::W32),
    );
    assert_eq!(add.to_string(), "(R_EBX:32 + 4:32)");
    assert_eq!(Exp::mem(add).to_string(), "mem[(R_EBX:32 + 4:32)]");
    assert_eq!(
        Exp::cast(CastKind::High, Width::W16, Exp::reg("R_EAX", Width::W32)).to_string(),
        "high:16(R_EAX:32)"
    );
    assert_eq!(
        Exp::unop(UnOpKind::Not, Exp::tmp("T_1", Width::W1)).to_string(),
        "~T_1:1"
    );
    assert_eq!(Exp::relative(12, Width::W32).to_string(), "$+12:32");
}

#[test]
fn test_statement_display() {
    let mov = Stmt::Move {
        dst: Exp::reg("R_EAX", Width::W32),
        src: Exp::int(1, Width::W32),
    };
    assert_eq!(mov.to_string(), "R_EAX:32 = 1:32");

    let cjmp = Stmt::CJmp {
        target: Exp::name("label_1"),
        cond: Exp::reg("R_ZF", Width::W1),
    };
    assert_eq!(cjmp.to_string(), "cjmp R_ZF:1, label_1");

    assert_eq!(Stmt::Jmp { target: Exp::name("done") }.to_string(), "jmp done");
    assert_eq!(Stmt::Label("L1".into()).to_string(), "label L1");
}
