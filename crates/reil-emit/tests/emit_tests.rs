use pretty_assertions::assert_eq;
use reil_core::bil::{BinOpKind, Exp, Stmt, Width};
use reil_emit::ReilEmitter;
use reil_lower::Translator;

fn inc_eax() -> Stmt {
    Stmt::Move {
        dst: Exp::reg("R_EAX", Width::W32),
        src: Exp::binop(
            BinOpKind::Plus,
            Exp::reg("R_EAX", Width::W32),
            Exp::int(1, Width::W32),
        ),
    }
}

#[test]
fn test_plain_emission_matches_display() {
    let insts = Translator::new().lower_statement(0x1000, &inc_eax()).unwrap();
    let text = ReilEmitter::new().emit_to_string(&insts).unwrap();

    let expected: String = insts.iter().map(|i| format!("{}\n", i)).collect();
    assert_eq!(text, expected);
    assert!(text.starts_with("00001000.00"));
    assert!(text.contains("ADD"));
    assert!(text.contains("(R_EAX, 32)"));
    assert!(text.contains("(1, 32)"));
}

#[test]
fn test_block_emission_is_line_per_instruction() {
    let stmts = [inc_eax(), inc_eax()];
    let insts = Translator::new().lower_block(0, &stmts).unwrap();
    let text = ReilEmitter::new().emit_to_string(&insts).unwrap();
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn test_empty_block_emits_nothing() {
    let text = ReilEmitter::new().emit_to_string(&[]).unwrap();
    assert_eq!(text, "");
}
