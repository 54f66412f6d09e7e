use crate::temps::{is_reil_name, reil_name, TempAllocator};
use reil_core::bil::{Const, Exp, Stmt, Temp, TempKind, Width};
use reil_core::reil::{Instruction, Opcode, Operand};
use reil_core::select;
use reil_core::{Result, TranslateError};

/// Lowers BIL statements to REIL, one basic block per instance.
///
/// The temporary-alias table lives as long as the instance; the
/// sub-instruction counter is per block and the synthesized-temporary
/// counter restarts at every statement. Instances own all of their mutable
/// state, so lowering different blocks concurrently just means using
/// independent translators.
#[derive(Debug, Default, Clone)]
pub struct Translator {
    temps: TempAllocator,
    inum: u16,
    addr: u64,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all per-block state. Call once per new basic block.
    pub fn reset(&mut self) {
        self.temps.reset();
        self.inum = 0;
    }

    /// Translates one BIL statement into the ordered REIL sequence for it.
    ///
    /// Either the full sequence comes back or an error does; nothing is
    /// partially emitted.
    pub fn lower_statement(&mut self, addr: u64, stmt: &Stmt) -> Result<Vec<Instruction>> {
        self.temps.begin_statement();
        self.addr = addr;

        let mut out = Vec::new();
        match stmt {
            Stmt::Move { dst, src } => {
                self.lower_inst(Opcode::Str, Some(dst.clone()), src.clone(), &mut out)?;
            }
            Stmt::Jmp { target } => {
                // An unconditional jump is a JCC on a constant-true condition.
                let cond = Exp::Const(Const {
                    value: 1,
                    width: Width::W1,
                });
                self.lower_inst(Opcode::Jcc, Some(target.clone()), cond, &mut out)?;
            }
            Stmt::CJmp { target, cond } => {
                self.lower_inst(Opcode::Jcc, Some(target.clone()), cond.clone(), &mut out)?;
            }
            Stmt::Call | Stmt::Return => {
                return Err(TranslateError::UnsupportedStatement(stmt.to_string()));
            }
            Stmt::ExpStmt(_)
            | Stmt::Comment(_)
            | Stmt::Special(_)
            | Stmt::Label(_)
            | Stmt::VarDecl { .. } => {}
        }
        Ok(out)
    }

    /// Resets the engine and lowers a whole basic block in statement order.
    pub fn lower_block(&mut self, addr: u64, stmts: &[Stmt]) -> Result<Vec<Instruction>> {
        self.reset();
        let mut out = Vec::new();
        for stmt in stmts {
            out.extend(self.lower_statement(addr, stmt)?);
        }
        Ok(out)
    }

    /// Assembles one instruction with opcode hint `op` (`Str` or `Jcc`),
    /// flattening compound operands first, and returns the atomic
    /// destination expression for callers that chain further.
    fn lower_inst(
        &mut self,
        op: Opcode,
        dst: Option<Exp>,
        src: Exp,
        out: &mut Vec<Instruction>,
    ) -> Result<Exp> {
        let mut op = op;
        let mut src = src;

        let dst = match dst {
            Some(Exp::Mem { addr }) => {
                // Store to memory: the address is flattened before the value.
                if op != Opcode::Str {
                    return Err(TranslateError::UnexpectedExpression(format!(
                        "memory destination under {}",
                        op
                    )));
                }
                op = Opcode::Stm;
                let addr = self.flatten(*addr, out)?;
                src = self.flatten(src, out)?;
                Some(addr)
            }
            Some(Exp::Name(label)) => {
                if op != Opcode::Jcc {
                    return Err(TranslateError::UnexpectedExpression(format!(
                        "symbolic target under {}",
                        op
                    )));
                }
                Some(Exp::Temp(Temp {
                    kind: TempKind::Register,
                    name: label,
                    width: Width::W32,
                }))
            }
            other => other,
        };

        // STR writes a register or temporary; a constant destination has no
        // meaning. Jump targets and store addresses may still be constants.
        if let Some(dst) = &dst {
            if op == Opcode::Str && !matches!(dst, Exp::Temp(_)) {
                return Err(TranslateError::UnexpectedExpression(format!(
                    "destination {} under {}",
                    dst, op
                )));
            }
        }

        // Jump conditions arrive pre-flattened from the lifter; a compound
        // expression here means the input breaks the contract.
        if op == Opcode::Jcc && !src.is_atomic() {
            return Err(TranslateError::UnexpectedExpression(format!(
                "compound condition under {}: {}",
                op, src
            )));
        }

        let mut cast_width = None;
        let (a, b) = match src {
            Exp::BinOp { op: kind, lhs, rhs } => {
                op = select::binop_opcode(kind)?;
                (*lhs, Some(*rhs))
            }
            Exp::UnOp { op: kind, exp } => {
                op = select::unop_opcode(kind);
                (*exp, None)
            }
            Exp::Cast { kind, width, exp } => {
                op = select::cast_opcode(kind)?;
                cast_width = Some(width);
                (*exp, None)
            }
            Exp::Mem { addr } => {
                op = Opcode::Ldm;
                (self.flatten(*addr, out)?, None)
            }
            atom @ (Exp::Temp(_) | Exp::Const(_)) => (atom, None),
            other => {
                return Err(TranslateError::UnexpectedExpression(other.to_string()));
            }
        };

        let a = self.flatten(a, out)?;
        let b = match b {
            Some(exp) => Some(self.flatten(exp, out)?),
            None => None,
        };

        let dst = match dst {
            Some(dst) => dst,
            None => {
                // The result width follows the cast's declared width when
                // there is one, otherwise the first operand's.
                let width = match cast_width {
                    Some(width) => width,
                    None => a
                        .width()
                        .ok_or_else(|| TranslateError::UnexpectedExpression(a.to_string()))?,
                };
                Exp::Temp(Temp {
                    kind: TempKind::Temporary,
                    name: self.temps.fresh_name(),
                    width,
                })
            }
        };

        let inum = self.inum;
        self.inum += 1;

        let a = self.to_operand(&a)?;
        let b = match &b {
            Some(exp) => self.to_operand(exp)?,
            None => Operand::None,
        };
        let c = self.to_operand(&dst)?;

        out.push(Instruction {
            addr: self.addr,
            inum,
            op,
            a,
            b,
            c,
        });
        Ok(dst)
    }

    /// Reduces an expression to an atomic one, emitting the instructions
    /// that compute it into a synthesized temporary when it is compound.
    fn flatten(&mut self, exp: Exp, out: &mut Vec<Instruction>) -> Result<Exp> {
        if exp.is_atomic() {
            return Ok(exp);
        }
        match exp {
            Exp::BinOp { .. } | Exp::UnOp { .. } | Exp::Cast { .. } | Exp::Mem { .. } => {
                self.lower_inst(Opcode::Str, None, exp, out)
            }
            other => Err(TranslateError::UnexpectedExpression(other.to_string())),
        }
    }

    /// Converts an atomic expression to a REIL operand, aliasing source
    /// temporaries onto stable slots on the way.
    fn to_operand(&mut self, exp: &Exp) -> Result<Operand> {
        match exp {
            Exp::Const(c) => Ok(Operand::constant(c.value, c.width)),
            // A relative target has no REIL form of its own; the offset
            // travels as a constant.
            Exp::Relative { width, offset } => Ok(Operand::constant(*offset, *width)),
            Exp::Temp(t) => match t.kind {
                TempKind::Register => Operand::register(t.name.as_str(), t.width),
                TempKind::ProgramCounter => Operand::temporary(t.name.as_str(), t.width),
                TempKind::Temporary => {
                    if is_reil_name(&t.name) {
                        Operand::temporary(t.name.as_str(), t.width)
                    } else {
                        let index = self.temps.resolve(&t.name);
                        Operand::temporary(reil_name(index), t.width)
                    }
                }
            },
            other => Err(TranslateError::UnexpectedExpression(other.to_string())),
        }
    }
}
