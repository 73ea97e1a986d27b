use std::f64::consts::PI;

use crate::format::format_f64;

/// Binary operators a calculator keypad offers
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    /// The symbol shown on the display and stored in the accumulated text.
    /// Division uses the keypad glyph and is substituted with `/` right
    /// before evaluation
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "÷",
            BinOp::Pow => "^",
        }
    }
}

/// A single keypad input appended to the accumulated expression
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Token {
    /// Digit 0..=9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// The π constant, substituted with its numeric literal
    Pi,
    Open,
    Close,
    /// An operator appended inline (expression mode input surfaces)
    Op(BinOp),
}

/// Accumulates keypad input into a syntactically coherent expression string.
///
/// The builder owns all mutable calculator state: the operand being typed,
/// the captured left-hand operand, the pending operator, the count of
/// unclosed brackets, and the sticky error flag. Once the error flag is set
/// every edit is ignored until `clear` resets the whole state atomically.
pub struct ExpressionBuilder {
    pub(crate) current: String,
    pub(crate) previous: String,
    pub(crate) pending: Option<BinOp>,
    pub(crate) depth: usize,
    pub(crate) error: bool,
}

impl Default for ExpressionBuilder {
    fn default() -> ExpressionBuilder {
        ExpressionBuilder {
            current: String::new(),
            previous: String::new(),
            pending: None,
            depth: 0,
            error: false,
        }
    }
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Resets every field to its initial state. The only operation honored
    /// while the error flag is set
    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
        self.pending = None;
        self.depth = 0;
        self.error = false;
    }

    /// The operand text after the last operator or bracket: the run of
    /// characters a new decimal point would belong to
    fn active_segment(&self) -> &str {
        match self
            .current
            .char_indices()
            .rfind(|(_, c)| matches!(*c, '+' | '-' | '*' | '÷' | '^' | '(' | ')'))
        {
            Some((i, c)) => &self.current[i + c.len_utf8()..],
            None => &self.current,
        }
    }

    pub fn append(&mut self, token: Token) {
        if self.error {
            return;
        }
        match token {
            Token::Digit(d) => {
                if d <= 9 {
                    self.current.push((b'0' + d) as char);
                }
            }
            Token::Decimal => {
                let seg = self.active_segment();
                if seg.contains('.') {
                    return;
                }
                if seg.is_empty() {
                    self.current.push_str("0.");
                } else {
                    self.current.push('.');
                }
            }
            Token::Pi => self.current.push_str(&format_f64(PI)),
            Token::Open => {
                // juxtaposition: `2(` and `)(` mean multiplication
                if let Some(c) = self.current.chars().last() {
                    if c.is_ascii_digit() || c == '.' || c == ')' {
                        self.current.push('*');
                    }
                }
                self.current.push('(');
                self.depth += 1;
            }
            Token::Close => {
                // a closing bracket without a matching open one is dropped
                if self.depth > 0 {
                    self.current.push(')');
                    self.depth -= 1;
                }
            }
            Token::Op(op) => self.current.push_str(op.symbol()),
        }
    }

    /// Removes the last character, undoing the bracket bookkeeping the
    /// matching append performed
    pub fn delete_last(&mut self) {
        if self.error {
            return;
        }
        match self.current.pop() {
            Some('(') => self.depth -= 1,
            Some(')') => self.depth += 1,
            _ => {}
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }

    pub fn pending(&self) -> Option<BinOp> {
        self.pending
    }

    /// Count of still-unclosed opening brackets in the current operand
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn has_error(&self) -> bool {
        self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(b: &mut ExpressionBuilder, s: &str) {
        for c in s.chars() {
            match c {
                '.' => b.append(Token::Decimal),
                _ => b.append(Token::Digit(c as u8 - b'0')),
            }
        }
    }

    #[test]
    fn test_digit_sequence() {
        let mut b = ExpressionBuilder::new();
        type_digits(&mut b, "40960");
        assert_eq!(b.current(), "40960");
    }

    #[test]
    fn test_decimal_rules() {
        let mut b = ExpressionBuilder::new();
        b.append(Token::Decimal);
        assert_eq!(b.current(), "0.");
        type_digits(&mut b, "12");
        b.append(Token::Decimal);
        assert_eq!(b.current(), "0.12");

        // a new segment after an operator may hold its own point
        b.append(Token::Op(BinOp::Add));
        b.append(Token::Decimal);
        type_digits(&mut b, "5");
        assert_eq!(b.current(), "0.12+0.5");
    }

    #[test]
    fn test_bracket_balance() {
        let mut b = ExpressionBuilder::new();
        b.append(Token::Close); // ignored - nothing to close
        assert_eq!(b.current(), "");
        assert_eq!(b.depth(), 0);

        b.append(Token::Open);
        type_digits(&mut b, "1");
        b.append(Token::Op(BinOp::Add));
        type_digits(&mut b, "2");
        assert_eq!(b.depth(), 1);
        b.append(Token::Close);
        assert_eq!(b.current(), "(1+2)");
        assert_eq!(b.depth(), 0);
        b.append(Token::Close); // ignored again
        assert_eq!(b.current(), "(1+2)");
    }

    #[test]
    fn test_implicit_multiplication() {
        let mut b = ExpressionBuilder::new();
        type_digits(&mut b, "2");
        b.append(Token::Open);
        type_digits(&mut b, "3");
        b.append(Token::Op(BinOp::Add));
        type_digits(&mut b, "4");
        b.append(Token::Close);
        b.append(Token::Open);
        assert_eq!(b.current(), "2*(3+4)*(");
        assert_eq!(b.depth(), 1);

        // no multiplication after an operator or another open bracket
        let mut b = ExpressionBuilder::new();
        b.append(Token::Open);
        b.append(Token::Open);
        assert_eq!(b.current(), "((");
    }

    #[test]
    fn test_delete_inverse() {
        let mut b = ExpressionBuilder::new();
        type_digits(&mut b, "1");
        b.append(Token::Open);
        assert_eq!(b.depth(), 1);
        b.delete_last();
        assert_eq!(b.current(), "1*");
        assert_eq!(b.depth(), 0);

        let mut b = ExpressionBuilder::new();
        b.append(Token::Open);
        b.append(Token::Close);
        b.delete_last();
        // deleting `)` reopens the bracket
        assert_eq!(b.depth(), 1);
        b.delete_last();
        assert_eq!(b.depth(), 0);
        assert_eq!(b.current(), "");
        b.delete_last(); // empty - no-op
        assert_eq!(b.current(), "");
    }

    #[test]
    fn test_pi_substitution() {
        let mut b = ExpressionBuilder::new();
        b.append(Token::Pi);
        assert_eq!(b.current(), "3.141592653589793");
    }

    #[test]
    fn test_error_freezes_edits() {
        let mut b = ExpressionBuilder::new();
        type_digits(&mut b, "5");
        b.error = true;
        b.append(Token::Digit(1));
        b.delete_last();
        assert_eq!(b.current(), "5");
        b.clear();
        assert!(!b.has_error());
        assert_eq!(b.current(), "");
    }
}
