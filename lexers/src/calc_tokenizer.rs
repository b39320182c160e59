#![deny(warnings)]

use crate::char_scanner::{DIGITS, WHITE};
use crate::scanner::Scanner;

/// Operator symbols split out of an expression by default.
pub const CALC_DELIMS: &[char] = &['+', '-', '*', '/', '^', '(', ')'];

#[derive(Clone, PartialEq, Debug)]
pub enum CalcToken {
    Unknown(String),
    Number(i64),
    Op(char),
}

/// Splits an integer arithmetic expression into tokens.
///
/// Digit runs become `Number`, each delimiter becomes an `Op`, whitespace is
/// dropped and anything else comes out as an `Unknown` run.
pub struct CalcTokenizer<I: Iterator<Item=char>> {
    src: Scanner<I>,
    delims: Vec<char>,
    stops: Vec<char>,
}

impl<'a> CalcTokenizer<std::str::Chars<'a>> {
    pub fn from_str(source: &'a str) -> Self {
        Self::new(source.chars())
    }
}

impl<I: Iterator<Item=char>> CalcTokenizer<I> {
    pub fn new(source: I) -> Self {
        Self::with_delims(source, CALC_DELIMS)
    }

    pub fn with_delims(source: I, delims: &[char]) -> Self {
        let stops = [WHITE, DIGITS, delims].concat();
        CalcTokenizer{src: Scanner::new(source), delims: delims.to_vec(), stops}
    }

    fn get_token(&mut self) -> Option<CalcToken> {
        self.src.ignore_ws();
        if let Some(op) = self.src.accept_any(&self.delims) {
            self.src.ignore();
            Some(CalcToken::Op(op))
        } else if let Some(num) = self.src.scan_digits() {
            // literals past i64 can't be represented, hand them back as-is
            match num.parse::<i64>() {
                Ok(n) => Some(CalcToken::Number(n)),
                Err(_) => Some(CalcToken::Unknown(num)),
            }
        } else if self.src.until_any(&self.stops) {
            Some(CalcToken::Unknown(self.src.extract_string()))
        } else {
            None
        }
    }
}

impl<I: Iterator<Item=char>> Iterator for CalcTokenizer<I> {
    type Item = CalcToken;
    fn next(&mut self) -> Option<Self::Item> {
        self.get_token()
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{CalcToken, CalcTokenizer};

    #[test]
    fn basic_ops() {
        let lx = CalcTokenizer::from_str("3+4*2/(1-5)^2^3");
        let expect = vec![
            CalcToken::Number(3),
            CalcToken::Op('+'),
            CalcToken::Number(4),
            CalcToken::Op('*'),
            CalcToken::Number(2),
            CalcToken::Op('/'),
            CalcToken::Op('('),
            CalcToken::Number(1),
            CalcToken::Op('-'),
            CalcToken::Number(5),
            CalcToken::Op(')'),
            CalcToken::Op('^'),
            CalcToken::Number(2),
            CalcToken::Op('^'),
            CalcToken::Number(3),
        ];
        assert_eq!(lx.collect::<Vec<_>>(), expect);
    }

    #[test]
    fn whitespace_is_skipped() {
        let lx = CalcTokenizer::from_str("  12 \t*\n( 30 )  ");
        let expect = vec![
            CalcToken::Number(12),
            CalcToken::Op('*'),
            CalcToken::Op('('),
            CalcToken::Number(30),
            CalcToken::Op(')'),
        ];
        assert_eq!(lx.collect::<Vec<_>>(), expect);
        assert_eq!(CalcTokenizer::from_str("   ").next(), None);
        assert_eq!(CalcTokenizer::from_str("").next(), None);
    }

    #[test]
    fn numbers_are_maximal_runs() {
        let lx = CalcTokenizer::from_str("1 23 0045");
        let expect = vec![
            CalcToken::Number(1),
            CalcToken::Number(23),
            CalcToken::Number(45),
        ];
        assert_eq!(lx.collect::<Vec<_>>(), expect);
    }

    #[test]
    fn unknown_runs() {
        let lx = CalcTokenizer::from_str("1@2 + abc$ % 7.5");
        let expect = vec![
            CalcToken::Number(1),
            CalcToken::Unknown(format!("@")),
            CalcToken::Number(2),
            CalcToken::Op('+'),
            CalcToken::Unknown(format!("abc$")),
            CalcToken::Unknown(format!("%")),
            CalcToken::Number(7),
            CalcToken::Unknown(format!(".")),
            CalcToken::Number(5),
        ];
        assert_eq!(lx.collect::<Vec<_>>(), expect);
    }

    #[test]
    fn oversized_literal() {
        let mut lx = CalcTokenizer::from_str("9223372036854775807+9223372036854775808");
        assert_eq!(lx.next(), Some(CalcToken::Number(i64::MAX)));
        assert_eq!(lx.next(), Some(CalcToken::Op('+')));
        assert_eq!(lx.next(), Some(CalcToken::Unknown(format!("9223372036854775808"))));
        assert_eq!(lx.next(), None);
    }

    #[test]
    fn custom_delims() {
        let lx = CalcTokenizer::with_delims("2#3!".chars(), &['#', '!']);
        let expect = vec![
            CalcToken::Number(2),
            CalcToken::Op('#'),
            CalcToken::Number(3),
            CalcToken::Op('!'),
        ];
        assert_eq!(lx.collect::<Vec<_>>(), expect);
    }
}
