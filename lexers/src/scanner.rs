#![deny(warnings)]

/// Buffered iterator adapter with backtracking.
///
/// Items pulled from the source stay buffered until `ignore` or `extract`
/// drops them, so a caller can rewind `buffer_pos` while deciding where a
/// token ends.
pub struct Scanner<I: Iterator> where I::Item: Clone {
    src: I,
    buf: Vec<I::Item>,
    // number of buffered items consumed so far
    pos: usize,
}

impl<I> Iterator for Scanner<I> where I: Iterator, I::Item: Clone {
    type Item = I::Item;
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.buf.len() {
            self.buf.push(self.src.next()?);
        }
        self.pos += 1;
        self.curr()
    }
}

impl<I> Scanner<I> where I: Iterator, I::Item: Clone {
    pub fn new(source: I) -> Scanner<I> {
        Scanner{src: source, buf: Vec::new(), pos: 0}
    }

    pub fn buffer_pos(&self) -> usize { self.pos }

    /// Rewind (or replay) to a position within the buffer.
    pub fn set_buffer_pos(&mut self, pos: usize) -> bool {
        if pos > self.buf.len() {
            return false;
        }
        self.pos = pos;
        true
    }

    /// Last consumed item.
    pub fn curr(&self) -> Option<I::Item> {
        self.view().last().cloned()
    }

    pub fn peek(&mut self) -> Option<I::Item> {
        let backtrack = self.pos;
        let peeked = self.next();
        self.pos = backtrack;
        peeked
    }

    /// Items consumed since the last `ignore`/`extract`.
    pub fn view(&self) -> &[I::Item] {
        &self.buf[..self.pos]
    }

    /// Drop everything consumed so far, the next item starts a new token.
    pub fn ignore(&mut self) {
        self.buf.drain(..self.pos);
        self.pos = 0;
    }

    pub fn extract(&mut self) -> Vec<I::Item> {
        let consumed = self.buf.drain(..self.pos).collect();
        self.pos = 0;
        consumed
    }
}

impl<I> Scanner<I> where I: Iterator, I::Item: Clone + PartialEq {
    /// Consume the next item only if it's in `any`.
    pub fn accept_any(&mut self, any: &[I::Item]) -> Option<I::Item> {
        match self.peek() {
            Some(next) if any.contains(&next) => self.next(),
            _ => None,
        }
    }

    /// Consume a run of items from `over`, true if anything was consumed.
    pub fn skip_all(&mut self, over: &[I::Item]) -> bool {
        let start = self.pos;
        while self.accept_any(over).is_some() {}
        self.pos > start
    }

    /// Consume up to (not including) the first item in `any` or the end of
    /// input, true if anything was consumed.
    pub fn until_any(&mut self, any: &[I::Item]) -> bool {
        let start = self.pos;
        while let Some(next) = self.peek() {
            if any.contains(&next) { break; }
            self.next();
        }
        self.pos > start
    }
}
