//! The program cursor
//!
//! A [`Cursor`] is the single index into the program that serves as both the
//! instruction pointer and the literal-parse position. Operators consume their
//! operands by eating characters after the cursor, so the cursor always sits on
//! the last character consumed once an operator returns; the run loop then
//! [`advance`](Cursor::advance)s onto the next operator.
//!
//! Only two kinds of movement exist:
//! - forward consumption ([`eat`](Cursor::eat) and the scans built on it), used
//!   by every operator and literal parser
//! - non-local jumps ([`jump_to`](Cursor::jump_to), [`land_on`](Cursor::land_on)),
//!   reserved for the loop and function engines

use crate::interpreter::constants::WHITESPACE;
use crate::interpreter::errors::RuntimeError;

#[derive(Debug, Clone)]
pub struct Cursor {
    source: Vec<char>,
    position: usize,
    /// Set by `land_on` so the next `advance` stays on the target
    hold: bool,
}

impl Cursor {
    pub fn new(source: &str) -> Self {
        Cursor {
            source: source.chars().collect(),
            position: 0,
            hold: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn source(&self) -> &[char] {
        &self.source
    }

    /// Character under the cursor
    pub fn current(&self) -> Option<char> {
        self.source.get(self.position).copied()
    }

    /// Character after the cursor, without consuming it
    pub fn peek(&self) -> Option<char> {
        self.source.get(self.position + 1).copied()
    }

    /// First non-whitespace character after the cursor and its position
    pub fn peek_past_whitespace(&self) -> Option<(usize, char)> {
        self.source
            .iter()
            .enumerate()
            .skip(self.position + 1)
            .find(|(_, c)| !WHITESPACE.contains(c))
            .map(|(i, c)| (i, *c))
    }

    /// Consume and return the character after the cursor.
    pub fn eat(&mut self) -> Result<char, RuntimeError> {
        let next = self.peek().ok_or(RuntimeError::Eof)?;
        self.position += 1;
        Ok(next)
    }

    /// Consume characters up to and including `position`.
    pub fn skip_to(&mut self, position: usize) {
        debug_assert!(position >= self.position);
        self.position = position.min(self.source.len());
    }

    /// Move onto the next operator.
    pub fn advance(&mut self) {
        if self.hold {
            self.hold = false;
        } else {
            self.position += 1;
        }
    }

    /// Jump so that the character after `position` is the next one executed.
    pub(crate) fn jump_to(&mut self, position: usize) {
        self.position = position;
        self.hold = false;
    }

    /// Jump so that the character at `position` is the next one executed.
    pub(crate) fn land_on(&mut self, position: usize) {
        self.position = position;
        self.hold = true;
    }

    /// Restore a recorded position exactly, as the debugger does.
    pub(crate) fn restore(&mut self, position: usize) {
        self.position = position;
        self.hold = false;
    }

    /// Skip a loop body whose condition just failed for the first time.
    ///
    /// Consumes the body marker `{`, then scans to the matching `}`. Each nested
    /// loop opens twice (condition and body) but closes once, so a nested `{`
    /// also consumes through the next `{`. The scan does not know about string
    /// literals: braces inside them are counted too.
    pub fn skip_loop_body(&mut self) -> Result<(), RuntimeError> {
        while self.eat()? != '{' {}

        let mut depth = 1usize;
        while depth > 0 {
            match self.eat()? {
                '{' => {
                    depth += 1;
                    while self.eat()? != '{' {}
                }
                '}' => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    /// Skip a function definition from its `(` to the matching `)`.
    pub fn skip_function_body(&mut self) -> Result<(), RuntimeError> {
        let mut depth = 0usize;
        loop {
            match self.eat()? {
                '(' => depth += 1,
                ')' if depth == 0 => return Ok(()),
                ')' => depth -= 1,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_past_whitespace() {
        let cursor = Cursor::new("v \t\n'a:");
        assert_eq!(cursor.peek_past_whitespace(), Some((4, '\'')));
        assert_eq!(Cursor::new("v  ").peek_past_whitespace(), None);
    }

    #[test]
    fn test_peek_and_eat() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.current(), Some('a'));
        assert_eq!(cursor.peek(), Some('b'));
        assert_eq!(cursor.eat(), Ok('b'));
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.eat(), Err(RuntimeError::Eof));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_land_on_holds_one_advance() {
        let mut cursor = Cursor::new("abcdef");
        cursor.skip_to(4);
        cursor.land_on(1);
        cursor.advance();
        assert_eq!(cursor.current(), Some('b'));
        cursor.advance();
        assert_eq!(cursor.current(), Some('c'));
    }

    #[test]
    fn test_jump_to_executes_next_character() {
        let mut cursor = Cursor::new("abcdef");
        cursor.jump_to(2);
        cursor.advance();
        assert_eq!(cursor.current(), Some('d'));
    }

    #[test]
    fn test_skip_flat_loop_body() {
        // Cursor sits on the last character of the condition.
        let mut cursor = Cursor::new("{0=1{!!}v");
        cursor.skip_to(3);
        cursor.skip_loop_body().unwrap();
        assert_eq!(cursor.position(), 7);
        assert_eq!(cursor.current(), Some('}'));
    }

    #[test]
    fn test_skip_nested_loop_body() {
        let mut cursor = Cursor::new("{0=1{{1=1{!}!}v");
        cursor.skip_to(3);
        cursor.skip_loop_body().unwrap();
        assert_eq!(cursor.position(), 13);
    }

    #[test]
    fn test_skip_function_body() {
        let mut cursor = Cursor::new("(v1(v2)!)v");
        cursor.skip_function_body().unwrap();
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_unterminated_loop_body() {
        let mut cursor = Cursor::new("{0=1{!");
        cursor.skip_to(3);
        assert_eq!(cursor.skip_loop_body(), Err(RuntimeError::Eof));
    }
}
