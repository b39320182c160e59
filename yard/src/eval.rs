use lexers::{CalcToken, CalcTokenizer};
use thiserror::Error;
use tracing::{debug, trace};
use crate::operators::{Assoc, Operator, OperatorTable, Role};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalErr {
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("unknown operator: {0}")]
    UnknownOperator(char),
    #[error("unmatched group delimiter")]
    UnmatchedGroup,
    #[error("stack underflow, malformed expression")]
    StackUnderflow,
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
}

/// Evaluates integer expressions against an operator table.
///
/// The evaluator itself holds no per-call state: every evaluation runs on
/// its own set of stacks, so a single instance can be shared.
pub struct Evaluator {
    table: OperatorTable,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new(OperatorTable::default())
    }
}

impl Evaluator {
    pub fn new(table: OperatorTable) -> Self {
        Evaluator { table }
    }

    pub fn table(&self) -> &OperatorTable { &self.table }

    pub fn eval(&self, expr: &str) -> Result<i64, EvalErr> {
        self.eval_tokens(CalcTokenizer::from_str(expr))
    }

    pub fn eval_tokens<T>(&self, tokens: T) -> Result<i64, EvalErr>
        where T: IntoIterator<Item = CalcToken>
    {
        let result = Machine::new(&self.table).run(tokens);
        match result {
            Ok(value) => debug!(value, "evaluated"),
            Err(ref e) => debug!(error = %e, "evaluation failed"),
        }
        result
    }
}

/// Evaluate `expr` with the standard operator table.
pub fn evaluate(expr: &str) -> Result<i64, EvalErr> {
    Evaluator::default().eval(expr)
}

// An open group and the operator stack slot its opener occupies
struct Group {
    opener: char,
    slot: usize,
}

struct Machine<'t> {
    table: &'t OperatorTable,
    operands: Vec<i64>,
    operators: Vec<&'t Operator>,
    groups: Vec<Group>,
}

impl<'t> Machine<'t> {
    fn new(table: &'t OperatorTable) -> Self {
        Machine {
            table,
            operands: Vec::new(),
            operators: vec![table.start()],
            groups: Vec::new(),
        }
    }

    fn run<T>(mut self, tokens: T) -> Result<i64, EvalErr>
        where T: IntoIterator<Item = CalcToken>
    {
        let table = self.table;
        for token in tokens {
            match token {
                CalcToken::Number(n) => {
                    trace!(operand = n, "shift");
                    self.operands.push(n);
                }
                CalcToken::Op(symbol) => {
                    let op = table.lookup(symbol)?;
                    self.shift(op)?;
                }
                CalcToken::Unknown(lexeme) => return Err(EvalErr::InvalidToken(lexeme)),
            }
        }
        self.shift(table.end())?;
        match self.operands.as_slice() {
            [value] => Ok(*value),
            _ => Err(EvalErr::StackUnderflow),
        }
    }

    fn shift(&mut self, op: &'t Operator) -> Result<(), EvalErr> {
        if let Some(opener) = op.paired_opener() {
            return self.close(opener);
        }
        while self.reduces_before(op) {
            self.reduce()?;
        }
        if op.is_group_start() {
            self.groups.push(Group { opener: op.symbol, slot: self.operators.len() });
        }
        trace!(operator = %op.symbol, depth = self.groups.len(), "shift");
        self.operators.push(op);
        Ok(())
    }

    // Is the operator at `slot` the innermost open group
    fn is_boundary(&self, slot: usize) -> bool {
        self.groups.last().map_or(false, |group| group.slot == slot)
    }

    // Should the operator stack top be reduced before `new` is pushed
    fn reduces_before(&self, new: &Operator) -> bool {
        let slot = match self.operators.len().checked_sub(1) {
            Some(slot) => slot,
            None => return false,
        };
        let top = self.operators[slot];
        let innermost = self.is_boundary(slot);
        let (prio_top, prio_new) = (top.priority_in(innermost), new.priority_in(false));
        !innermost && match top.assoc {
            Assoc::Left => prio_top >= prio_new,
            Assoc::Right => prio_top > prio_new,
            Assoc::None => false,
        }
    }

    // Reduce until the opener paired with the current closer is on top, then
    // drop the opener and its group.
    fn close(&mut self, opener: char) -> Result<(), EvalErr> {
        loop {
            let top = *self.operators.last().ok_or(EvalErr::UnmatchedGroup)?;
            if top.symbol == opener {
                break;
            }
            if top.is_group_start() || matches!(top.role, Role::Bottom) {
                return Err(EvalErr::UnmatchedGroup);
            }
            self.reduce()?;
        }
        if let Some(popped) = self.operators.pop() {
            if popped.is_group_start() {
                match self.groups.pop() {
                    Some(group) if group.opener == popped.symbol => (),
                    _ => return Err(EvalErr::UnmatchedGroup),
                }
            }
        }
        trace!(opener = %opener, depth = self.groups.len(), "closed");
        Ok(())
    }

    fn reduce(&mut self) -> Result<(), EvalErr> {
        let op = self.operators.pop().ok_or(EvalErr::StackUnderflow)?;
        let rhs = self.operands.pop().ok_or(EvalErr::StackUnderflow)?;
        let lhs = self.operands.pop().ok_or(EvalErr::StackUnderflow)?;
        let value = op.apply(lhs, rhs)?;
        trace!(lhs, operator = %op.symbol, rhs, value, "reduce");
        self.operands.push(value);
        Ok(())
    }
}
