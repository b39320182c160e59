pub use self::eval::{evaluate, EvalErr, Evaluator};
pub use self::keypad::{Key, Keypad, ERROR_DISPLAY};
pub use self::operators::{Assoc, BinaryFn, Operator, OperatorTable, Role};

mod eval;
mod keypad;
pub mod operators;
