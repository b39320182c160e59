#![deny(warnings)]

use crate::scanner::Scanner;

pub(crate) static WHITE: &[char] = &[' ', '\n', '\r', '\t'];
pub(crate) static DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];


impl<I: Iterator<Item=char>> Scanner<I> {
    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }

    // discard leading whitespace and anything consumed before it
    pub fn ignore_ws(&mut self) {
        self.skip_all(WHITE);
        self.ignore();
    }

    // scan [0-9]+
    pub fn scan_digits(&mut self) -> Option<String> {
        if !self.skip_all(DIGITS) {
            return None;
        }
        Some(self.extract_string())
    }
}

///////////////////////////////////////////////////////////////////////////////
