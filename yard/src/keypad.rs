use tracing::debug;
use crate::eval::{EvalErr, Evaluator};

/// Shown in place of a result when evaluation fails.
pub const ERROR_DISPLAY: &str = "Error";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    Digit(u8),
    Op(char),
    Dot,
    Equals,
    Backspace,
    Clear,
}

impl Key {
    /// Map a button label (`7`, `+`, `=`, `C`, `CE`, ...) to its key.
    pub fn from_label(label: &str) -> Option<Key> {
        match label {
            "C" => Some(Key::Backspace),
            "CE" => Some(Key::Clear),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::from_char(c),
                    _ => None,
                }
            }
        }
    }

    pub fn from_char(c: char) -> Option<Key> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Key::Digit(d as u8)),
            '+' | '-' | '*' | '/' | '^' | '(' | ')' => Some(Key::Op(c)),
            '.' => Some(Key::Dot),
            '=' => Some(Key::Equals),
            _ => None,
        }
    }
}

/// Calculator keypad: keystrokes accumulate into a display buffer that
/// `Equals` evaluates in place.
pub struct Keypad {
    evaluator: Evaluator,
    buffer: String,
    // display holds the error indicator rather than an expression
    failed: bool,
}

impl Default for Keypad {
    fn default() -> Self {
        Keypad::new(Evaluator::default())
    }
}

impl Keypad {
    pub fn new(evaluator: Evaluator) -> Self {
        Keypad { evaluator, buffer: String::new(), failed: false }
    }

    pub fn display(&self) -> &str {
        if self.failed { ERROR_DISPLAY } else { &self.buffer }
    }

    /// Press a key. Only `Equals` produces an outcome, the display is
    /// updated either way.
    pub fn press(&mut self, key: Key) -> Option<Result<i64, EvalErr>> {
        debug!(?key, buffer = %self.buffer, "press");
        if self.failed {
            self.failed = false;
            self.buffer.clear();
        }
        match key {
            Key::Digit(d) => self.buffer.push(char::from(b'0' + d % 10)),
            Key::Op(op) => self.buffer.push(op),
            Key::Dot => (),
            Key::Backspace => { self.buffer.pop(); }
            Key::Clear => self.buffer.clear(),
            Key::Equals => {
                let outcome = self.evaluator.eval(&self.buffer);
                match outcome {
                    Ok(value) => self.buffer = value.to_string(),
                    Err(_) => {
                        self.buffer.clear();
                        self.failed = true;
                    }
                }
                return Some(outcome);
            }
        }
        None
    }

    /// Press every key in `keys`, returning the last evaluation outcome.
    pub fn press_all<I>(&mut self, keys: I) -> Option<Result<i64, EvalErr>>
        where I: IntoIterator<Item = Key>
    {
        keys.into_iter().fold(None, |last, key| self.press(key).or(last))
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(input: &str) -> Vec<Key> {
        input.chars().map(|c| Key::from_char(c).unwrap()).collect()
    }

    #[test]
    fn labels() {
        assert_eq!(Key::from_label("7"), Some(Key::Digit(7)));
        assert_eq!(Key::from_label("^"), Some(Key::Op('^')));
        assert_eq!(Key::from_label("("), Some(Key::Op('(')));
        assert_eq!(Key::from_label("="), Some(Key::Equals));
        assert_eq!(Key::from_label("."), Some(Key::Dot));
        assert_eq!(Key::from_label("C"), Some(Key::Backspace));
        assert_eq!(Key::from_label("CE"), Some(Key::Clear));
        assert_eq!(Key::from_label("12"), None);
        assert_eq!(Key::from_label("%"), None);
        assert_eq!(Key::from_label(""), None);
    }

    #[test]
    fn accumulates_and_evaluates() {
        let mut pad = Keypad::default();
        assert_eq!(pad.press_all(keys("(1+2)*3")), None);
        assert_eq!(pad.display(), "(1+2)*3");
        assert_eq!(pad.press(Key::Equals), Some(Ok(9)));
        assert_eq!(pad.display(), "9");
        // the result is the start of the next expression
        assert_eq!(pad.press_all(keys("*2=")), Some(Ok(18)));
        assert_eq!(pad.display(), "18");
    }

    #[test]
    fn dot_is_ignored() {
        let mut pad = Keypad::default();
        pad.press_all(keys("1.5"));
        assert_eq!(pad.display(), "15");
    }

    #[test]
    fn backspace_and_clear() {
        let mut pad = Keypad::default();
        pad.press_all(keys("12+3"));
        pad.press(Key::Backspace);
        assert_eq!(pad.display(), "12+");
        pad.press(Key::Clear);
        assert_eq!(pad.display(), "");
        pad.press(Key::Backspace);
        assert_eq!(pad.display(), "");
    }

    #[test]
    fn errors_show_indicator() {
        let mut pad = Keypad::default();
        assert_eq!(pad.press_all(keys("5/0=")), Some(Err(EvalErr::DivisionByZero)));
        assert_eq!(pad.display(), ERROR_DISPLAY);
        // next key starts over
        pad.press(Key::Digit(4));
        assert_eq!(pad.display(), "4");

        assert_eq!(pad.press_all(keys("+=")), Some(Err(EvalErr::StackUnderflow)));
        assert_eq!(pad.display(), ERROR_DISPLAY);
        pad.press(Key::Backspace);
        assert_eq!(pad.display(), "");
    }

    #[test]
    fn empty_buffer() {
        let mut pad = Keypad::default();
        assert_eq!(pad.press(Key::Equals), Some(Err(EvalErr::StackUnderflow)));
    }
}
