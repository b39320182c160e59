use std::collections::HashMap;
use crate::eval::EvalErr;

/// Symbol of the operator sitting at the bottom of the operator stack.
pub const START: char = '#';
/// Symbol of the operator appended after the last token.
pub const END: char = '$';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Assoc {
    Left,
    Right,
    None,
}

pub type BinaryFn = fn(i64, i64) -> Result<i64, EvalErr>;

#[derive(Clone, Copy, Debug)]
pub enum Role {
    /// Bottom of the operator stack, only ever closed by the end operator.
    Bottom,
    Binary(BinaryFn),
    /// Opens a group. `open` is the priority it takes while it is the
    /// innermost open group, otherwise it sits at its idle priority.
    GroupStart { open: u32 },
    /// Closes the group opened by `opener`.
    GroupEnd { opener: char },
}

#[derive(Clone, Debug)]
pub struct Operator {
    pub symbol: char,
    pub priority: u32,
    pub assoc: Assoc,
    pub role: Role,
}

impl Operator {
    fn binary(symbol: char, priority: u32, assoc: Assoc, eval: BinaryFn) -> Self {
        Operator { symbol, priority, assoc, role: Role::Binary(eval) }
    }

    pub fn is_group_start(&self) -> bool {
        matches!(self.role, Role::GroupStart { .. })
    }

    pub fn paired_opener(&self) -> Option<char> {
        match self.role {
            Role::GroupEnd { opener } => Some(opener),
            _ => None,
        }
    }

    /// Effective priority, `innermost` tells if this operator is the
    /// innermost open group. Only group starts care.
    pub fn priority_in(&self, innermost: bool) -> u32 {
        match self.role {
            Role::GroupStart { open } if innermost => open,
            _ => self.priority,
        }
    }

    pub fn apply(&self, lhs: i64, rhs: i64) -> Result<i64, EvalErr> {
        match self.role {
            Role::Binary(eval) => eval(lhs, rhs),
            // sentinels and delimiters never take operands
            _ => Err(EvalErr::StackUnderflow),
        }
    }
}

/// Immutable registry of the operators an `Evaluator` understands.
pub struct OperatorTable {
    ops: HashMap<char, Operator>,
    start: Operator,
    end: Operator,
}

impl Default for OperatorTable {
    fn default() -> Self {
        let entries = vec![
            Operator::binary('+', 2, Assoc::Left, add),
            Operator::binary('-', 2, Assoc::Left, sub),
            Operator::binary('*', 3, Assoc::Left, mul),
            Operator::binary('/', 3, Assoc::Left, div),
            Operator::binary('^', 4, Assoc::Right, pow),
            Operator { symbol: '(', priority: 5, assoc: Assoc::Right,
                       role: Role::GroupStart { open: 1 } },
            Operator { symbol: ')', priority: 5, assoc: Assoc::Left,
                       role: Role::GroupEnd { opener: '(' } },
        ];
        OperatorTable {
            ops: entries.into_iter().map(|op| (op.symbol, op)).collect(),
            start: Operator { symbol: START, priority: 0, assoc: Assoc::None,
                              role: Role::Bottom },
            // the end operator closes the start one, so the final reduction
            // goes down the same path as a closing paren
            end: Operator { symbol: END, priority: u32::MAX, assoc: Assoc::None,
                            role: Role::GroupEnd { opener: START } },
        }
    }
}

impl OperatorTable {
    pub fn lookup(&self, symbol: char) -> Result<&Operator, EvalErr> {
        self.ops.get(&symbol).ok_or(EvalErr::UnknownOperator(symbol))
    }

    pub fn start(&self) -> &Operator { &self.start }

    pub fn end(&self) -> &Operator { &self.end }
}

fn add(l: i64, r: i64) -> Result<i64, EvalErr> {
    l.checked_add(r).ok_or(EvalErr::Overflow)
}

fn sub(l: i64, r: i64) -> Result<i64, EvalErr> {
    l.checked_sub(r).ok_or(EvalErr::Overflow)
}

fn mul(l: i64, r: i64) -> Result<i64, EvalErr> {
    l.checked_mul(r).ok_or(EvalErr::Overflow)
}

// truncates toward zero
fn div(l: i64, r: i64) -> Result<i64, EvalErr> {
    if r == 0 {
        return Err(EvalErr::DivisionByZero);
    }
    l.checked_div(r).ok_or(EvalErr::Overflow)
}

// negative exponents truncate 1/base^|exp| toward zero
fn pow(base: i64, exp: i64) -> Result<i64, EvalErr> {
    match base {
        0 if exp < 0 => Err(EvalErr::DivisionByZero),
        0 => Ok(if exp == 0 { 1 } else { 0 }),
        1 => Ok(1),
        -1 => Ok(if exp % 2 == 0 { 1 } else { -1 }),
        _ if exp < 0 => Ok(0),
        _ => u32::try_from(exp).ok()
            .and_then(|exp| base.checked_pow(exp))
            .ok_or(EvalErr::Overflow),
    }
}

///////////////////////////////////////////////////////////////////////////////
