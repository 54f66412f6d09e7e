/*! Parse textual BIL into statement trees.
 *
 * Lifters hand the engine BIL in memory; people hand it over as text. This
 * parser reads the same surface syntax the `Display` impls print, so a
 * statement can round-trip through a file and come back structurally
 * identical. Expressions are fully parenthesized; temp kinds follow the
 * conventional `R_` / `pc_` name prefixes at the surface only.
 */

use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use reil_core::bil::{BinOpKind, CastKind, Exp, Stmt, Temp, TempKind, UnOpKind, Width};
use thiserror::Error;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct BilParser;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),
    #[error("Invalid integer literal: {0}")]
    Int(String),
    #[error("Invalid width: {0}")]
    Width(String),
    #[error("Malformed parse tree: missing {0}")]
    Shape(&'static str),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program (one basic block's worth of statements).
pub fn parse(input: &str) -> ParseResult<Vec<Stmt>> {
    let mut pairs =
        BilParser::parse(Rule::program, input).map_err(|e| ParseError::Syntax(Box::new(e)))?;
    let program = next_part(&mut pairs, "program")?;

    let mut stmts = Vec::new();
    for pair in program.into_inner() {
        if pair.as_rule() == Rule::stmt {
            stmts.push(build_stmt(pair)?);
        }
    }
    Ok(stmts)
}

/// True when the input parses.
pub fn check(input: &str) -> bool {
    parse(input).is_ok()
}

/// The grammar guarantees these pairs exist; a missing one still surfaces
/// as an error rather than a panic.
fn next_part<'a>(parts: &mut Pairs<'a, Rule>, what: &'static str) -> ParseResult<Pair<'a, Rule>> {
    parts.next().ok_or(ParseError::Shape(what))
}

fn build_stmt(pair: Pair<Rule>) -> ParseResult<Stmt> {
    let inner = next_part(&mut pair.into_inner(), "statement kind")?;
    match inner.as_rule() {
        Rule::move_stmt => {
            let mut parts = inner.into_inner();
            let dst = build_exp(next_part(&mut parts, "move destination")?)?;
            let src = build_exp(next_part(&mut parts, "move source")?)?;
            Ok(Stmt::Move { dst, src })
        }
        Rule::jmp_stmt => {
            let target = build_exp(next_part(&mut inner.into_inner(), "jump target")?)?;
            Ok(Stmt::Jmp { target })
        }
        Rule::cjmp_stmt => {
            let mut parts = inner.into_inner();
            let cond = build_exp(next_part(&mut parts, "jump condition")?)?;
            let target = build_exp(next_part(&mut parts, "jump target")?)?;
            Ok(Stmt::CJmp { target, cond })
        }
        Rule::call_stmt => Ok(Stmt::Call),
        Rule::ret_stmt => Ok(Stmt::Return),
        Rule::label_stmt => {
            let name = next_part(&mut inner.into_inner(), "label name")?;
            Ok(Stmt::Label(name.as_str().to_string()))
        }
        Rule::special_stmt => {
            let string = next_part(&mut inner.into_inner(), "special payload")?;
            let text = next_part(&mut string.into_inner(), "string contents")?;
            Ok(Stmt::Special(text.as_str().to_string()))
        }
        Rule::var_stmt => {
            let temp = next_part(&mut inner.into_inner(), "declared temp")?;
            let mut parts = temp.into_inner();
            let name = next_part(&mut parts, "temp name")?.as_str().to_string();
            let width = build_width(next_part(&mut parts, "temp width")?)?;
            Ok(Stmt::VarDecl { name, width })
        }
        other => unreachable!("statement rule {:?}", other),
    }
}

fn build_exp(pair: Pair<Rule>) -> ParseResult<Exp> {
    match pair.as_rule() {
        // Wrapper rules carry exactly one alternative.
        Rule::exp | Rule::dst | Rule::target => {
            build_exp(next_part(&mut pair.into_inner(), "expression")?)
        }
        Rule::binop => {
            let mut parts = pair.into_inner();
            let lhs = build_exp(next_part(&mut parts, "binop lhs")?)?;
            let sym = next_part(&mut parts, "binop symbol")?;
            let rhs = build_exp(next_part(&mut parts, "binop rhs")?)?;
            Ok(Exp::binop(binop_kind(sym.as_str()), lhs, rhs))
        }
        Rule::unop => {
            let mut parts = pair.into_inner();
            let sym = next_part(&mut parts, "unop symbol")?;
            let exp = build_exp(next_part(&mut parts, "unop operand")?)?;
            let kind = match sym.as_str() {
                "-" => UnOpKind::Neg,
                _ => UnOpKind::Not,
            };
            Ok(Exp::unop(kind, exp))
        }
        Rule::cast => {
            let mut parts = pair.into_inner();
            let kind = match next_part(&mut parts, "cast kind")?.as_str() {
                "low" => CastKind::Low,
                "high" => CastKind::High,
                "unsigned" => CastKind::Unsigned,
                _ => CastKind::Signed,
            };
            let width = build_width(next_part(&mut parts, "cast width")?)?;
            let exp = build_exp(next_part(&mut parts, "cast operand")?)?;
            Ok(Exp::cast(kind, width, exp))
        }
        Rule::mem_exp => {
            let addr = build_exp(next_part(&mut pair.into_inner(), "memory address")?)?;
            Ok(Exp::mem(addr))
        }
        Rule::relative => {
            let mut parts = pair.into_inner();
            let offset = build_int(next_part(&mut parts, "relative offset")?)?;
            let width = build_width(next_part(&mut parts, "relative width")?)?;
            Ok(Exp::relative(offset, width))
        }
        Rule::constant => {
            let mut parts = pair.into_inner();
            let value = build_int(next_part(&mut parts, "constant value")?)?;
            let width = build_width(next_part(&mut parts, "constant width")?)?;
            Ok(Exp::int(value, width))
        }
        Rule::temp => {
            let mut parts = pair.into_inner();
            let name = next_part(&mut parts, "temp name")?.as_str().to_string();
            let width = build_width(next_part(&mut parts, "temp width")?)?;
            let kind = temp_kind(&name);
            Ok(Exp::Temp(Temp { kind, name, width }))
        }
        Rule::name => Ok(Exp::Name(pair.as_str().trim().to_string())),
        other => unreachable!("expression rule {:?}", other),
    }
}

fn binop_kind(sym: &str) -> BinOpKind {
    match sym {
        "+" => BinOpKind::Plus,
        "-" => BinOpKind::Minus,
        "*" => BinOpKind::Times,
        "/" => BinOpKind::Divide,
        "$/" => BinOpKind::Sdivide,
        "%" => BinOpKind::Mod,
        "$%" => BinOpKind::Smod,
        "<<" => BinOpKind::Lshift,
        ">>" => BinOpKind::Rshift,
        "$>>" => BinOpKind::Arshift,
        "<<|" => BinOpKind::Lrotate,
        ">>|" => BinOpKind::Rrotate,
        "&&" => BinOpKind::LogicAnd,
        "||" => BinOpKind::LogicOr,
        "&" => BinOpKind::BitAnd,
        "|" => BinOpKind::BitOr,
        "^" => BinOpKind::Xor,
        "==" => BinOpKind::Eq,
        "<>" => BinOpKind::Neq,
        "<" => BinOpKind::Lt,
        "<=" => BinOpKind::Le,
        ">" => BinOpKind::Gt,
        _ => BinOpKind::Ge,
    }
}

/// Surface-syntax convention only: the parsed `Temp` carries the kind as
/// an explicit tag from here on.
fn temp_kind(name: &str) -> TempKind {
    if name.starts_with("R_") {
        TempKind::Register
    } else if name.starts_with("pc_") {
        TempKind::ProgramCounter
    } else {
        TempKind::Temporary
    }
}

fn build_int(pair: Pair<Rule>) -> ParseResult<u64> {
    let text = pair.as_str();
    let parsed = match text.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| ParseError::Int(text.to_string()))
}

fn build_width(pair: Pair<Rule>) -> ParseResult<Width> {
    let text = pair.as_str();
    let bits: u32 = text.parse().map_err(|_| ParseError::Width(text.to_string()))?;
    Width::from_bits(bits).map_err(|_| ParseError::Width(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_program() {
        assert!(check(""));
        assert!(check("// just a comment\n"));
    }

    #[test]
    fn test_register_move() {
        let stmts = parse("R_EAX:32 = (R_EAX:32 + 1:32)").unwrap();
        assert_eq!(stmts.len(), 1);
        assert_eq!(
            stmts[0],
            Stmt::Move {
                dst: Exp::reg("R_EAX", Width::W32),
                src: Exp::binop(
                    BinOpKind::Plus,
                    Exp::reg("R_EAX", Width::W32),
                    Exp::int(1, Width::W32),
                ),
            }
        );
    }

    #[test]
    fn test_memory_forms() {
        let stmts = parse("mem[R_EBX:32] = R_ECX:32\nR_EAX:32 = mem[(R_EBX:32 + 4:32)]").unwrap();
        assert_eq!(stmts.len(), 2);
        assert_eq!(
            stmts[0],
            Stmt::Move {
                dst: Exp::mem(Exp::reg("R_EBX", Width::W32)),
                src: Exp::reg("R_ECX", Width::W32),
            }
        );
    }

    #[test]
    fn test_jumps() {
        let stmts = parse("jmp label_1\ncjmp R_ZF:1, label_1\njmp $+12:32").unwrap();
        assert_eq!(stmts[0], Stmt::Jmp { target: Exp::name("label_1") });
        assert_eq!(
            stmts[1],
            Stmt::CJmp {
                target: Exp::name("label_1"),
                cond: Exp::reg("R_ZF", Width::W1),
            }
        );
        assert_eq!(stmts[2], Stmt::Jmp { target: Exp::relative(12, Width::W32) });
    }

    #[test]
    fn test_casts_and_unops() {
        let stmts = parse("R_EAX:32 = unsigned:32(R_AL:8)\nT_1:32 = -R_EAX:32").unwrap();
        assert_eq!(
            stmts[0],
            Stmt::Move {
                dst: Exp::reg("R_EAX", Width::W32),
                src: Exp::cast(CastKind::Unsigned, Width::W32, Exp::reg("R_AL", Width::W8)),
            }
        );
        assert_eq!(
            stmts[1],
            Stmt::Move {
                dst: Exp::tmp("T_1", Width::W32),
                src: Exp::unop(UnOpKind::Neg, Exp::reg("R_EAX", Width::W32)),
            }
        );
    }

    #[test]
    fn test_temp_kind_prefixes() {
        let stmts = parse("pc_0x1000:32 = T_5:32").unwrap();
        match &stmts[0] {
            Stmt::Move { dst: Exp::Temp(dst), src: Exp::Temp(src) } => {
                assert_eq!(dst.kind, TempKind::ProgramCounter);
                assert_eq!(src.kind, TempKind::Temporary);
            }
            other => panic!("unexpected statement: {:?}", other),
        }
    }

    #[test]
    fn test_misc_statements() {
        let stmts = parse("call\nret\nlabel L1\nspecial \"cpuid\"\nvar T_1:32").unwrap();
        assert_eq!(
            stmts,
            vec![
                Stmt::Call,
                Stmt::Return,
                Stmt::Label("L1".into()),
                Stmt::Special("cpuid".into()),
                Stmt::VarDecl { name: "T_1".into(), width: Width::W32 },
            ]
        );
    }

    #[test]
    fn test_hex_literals() {
        let stmts = parse("R_EAX:32 = 0xdeadbeef:32").unwrap();
        assert_eq!(
            stmts[0],
            Stmt::Move {
                dst: Exp::reg("R_EAX", Width::W32),
                src: Exp::int(0xdead_beef, Width::W32),
            }
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!check("R_EAX:32 ="));
        assert!(!check("R_EAX:31 = 1:32"));
        assert!(!check("= 1:32"));
        assert!(!check("jmp"));
    }
}
