use crate::errors::*;

#[derive(Clone, Debug)]
pub(crate) enum Entry {
    Val(f64),
    Op(String, i32, bool),
    OpenB,
}

pub(crate) struct Stack {
    pub(crate) queue: Vec<Entry>,
    pub(crate) output: Vec<Entry>,
    values: Vec<f64>,
}

pub(crate) const UNARY_MINUS: &str = "---";

macro_rules! one_arg_op {
    ($id:ident, $f:expr) => {
        fn $id(&mut self) -> CalcErrorResult {
            if self.values.is_empty() {
                return Err(CalcError::TooManyOps);
            }

            // not empty - unwrap is OK
            let v = self.values.pop().unwrap();
            self.values.push($f(v));
            Ok(())
        }
    };
}
macro_rules! two_arg_op {
    ($id:ident, $f:expr) => {
        fn $id(&mut self) -> CalcErrorResult {
            if self.values.len() < 2 {
                return Err(CalcError::TooManyOps);
            }

            let v2 = self.values.pop().unwrap();
            let v1 = self.values.pop().unwrap();
            self.values.push($f(v1, v2));
            Ok(())
        }
    };
}

impl Stack {
    fn priority(op: &str) -> (i32, bool) {
        match op {
            UNARY_MINUS => (20, true), // negate
            "^" => (17, true),         // power
            "*" | "/" => (12, false),  // mult, div
            "+" | "-" => (8, false),   // add, sub
            _ => (0, false),           // invalid op
        }
    }

    // move operators from the queue to output while the top operator in the
    // queue has equal or greater priority
    fn pop_while_priority(&mut self, priority: i32) {
        loop {
            if self.queue.is_empty() {
                return;
            }
            // queue is not empty, so unwrap is OK
            let e = self.queue.pop().unwrap();
            match &e {
                Entry::OpenB => {
                    self.queue.push(e);
                    return;
                }
                Entry::Op(_, p, right) => {
                    if *p > priority || (*p == priority && !*right) {
                        self.output.push(e);
                    } else {
                        self.queue.push(e);
                        return;
                    }
                }
                _ => return, // unreachable
            }
        }
    }

    // move operators from the queue to output until the first open bracket
    fn pop_until_bracket(&mut self) -> CalcErrorResult {
        loop {
            if self.queue.is_empty() {
                return Err(CalcError::ClosingBracketMismatch);
            }

            // unwrap is ok - vector is not empty
            let e = self.queue.pop().unwrap();
            match &e {
                Entry::Val(..) | Entry::Op(..) => self.output.push(e),
                Entry::OpenB => return Ok(()),
            }
        }
    }

    // move all operators from queue to output.
    // Must be called only after the expression ends.
    fn pop_all(&mut self) -> CalcErrorResult {
        while let Some(v) = self.queue.pop() {
            match &v {
                Entry::OpenB => {} // do nothing - allows to omit last closing brackets
                Entry::Op(..) => self.output.push(v),
                _ => return Err(CalcError::Unreachable),
            }
        }
        Ok(())
    }

    // ------------ PUBLIC -----------------

    pub(crate) fn new() -> Self {
        Stack {
            queue: Vec::new(),
            output: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, op: &str, val: Option<f64>) -> CalcErrorResult {
        if op.is_empty() {
            if let Some(v) = val {
                self.output.push(Entry::Val(v))
            } else {
                return Err(CalcError::EmptyExpression);
            }
            return Ok(());
        }

        if op == "(" {
            self.queue.push(Entry::OpenB);
            return Ok(());
        }

        if op == ")" {
            return self.pop_until_bracket();
        }

        let (pri, right_assoc) = Stack::priority(op);
        if pri == 0 {
            return Err(CalcError::InvalidOp(op.to_owned()));
        }

        self.pop_while_priority(pri);
        self.queue.push(Entry::Op(op.to_owned(), pri, right_assoc));

        Ok(())
    }

    pub(crate) fn calculate(&mut self) -> CalcResult {
        self.pop_all()?;
        if self.output.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        self.values = Vec::new();

        for i in 0..self.output.len() {
            let o = self.output[i].clone();
            match o {
                Entry::Val(v) => {
                    self.values.push(v);
                }
                Entry::Op(op, ..) => {
                    self.process_operator(&op)?;
                }
                _ => return Err(CalcError::Unreachable),
            }
        }

        if self.values.len() != 1 {
            return Err(CalcError::InsufficientOps);
        }

        // values is never empty after calculation - unwrap is fine
        Ok(self.values.pop().unwrap())
    }

    fn process_operator(&mut self, op: &str) -> CalcErrorResult {
        match op {
            "/" => self.divide(),
            "*" => self.multiply(),
            "+" => self.addition(),
            "-" => self.subtract(),
            "^" => self.power(),
            UNARY_MINUS => self.negate(),
            _ => Err(CalcError::InvalidOp(op.to_string())),
        }
    }

    one_arg_op!(negate, |v: f64| -v);

    two_arg_op!(addition, |v1: f64, v2: f64| v1 + v2);
    two_arg_op!(subtract, |v1: f64, v2: f64| v1 - v2);
    two_arg_op!(multiply, |v1: f64, v2: f64| v1 * v2);
    two_arg_op!(divide, |v1: f64, v2: f64| v1 / v2);
    two_arg_op!(power, f64::powf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_order() {
        let mut stack = Stack::new();
        // 2 + 3 * 2 + 5 = 13
        let _ = stack.push("", Some(2.0));
        let _ = stack.push("+", None);
        let _ = stack.push("", Some(3.0));
        let _ = stack.push("*", None);
        let _ = stack.push("", Some(2.0));
        let _ = stack.push("+", None);
        let _ = stack.push("", Some(5.0));
        let v = stack.calculate();
        assert_eq!(v, Ok(13.0));
    }

    #[test]
    fn test_braces() {
        let mut stack = Stack::new();
        // 2 + 3 * (2 + 5) + 1 = 24
        let _ = stack.push("", Some(2.0));
        let _ = stack.push("+", None);
        let _ = stack.push("", Some(3.0));
        let _ = stack.push("*", None);
        let _ = stack.push("(", None);
        let _ = stack.push("", Some(2.0));
        let _ = stack.push("+", None);
        let _ = stack.push("", Some(5.0));
        let _ = stack.push(")", None);
        let _ = stack.push("+", None);
        let _ = stack.push("", Some(1.0));
        let v = stack.calculate();
        assert_eq!(v, Ok(24.0));
    }

    #[test]
    fn test_power_right_assoc() {
        let mut stack = Stack::new();
        // 5 + 2 ^ 2 ^ 3 + 1 = 262
        let _ = stack.push("", Some(5.0));
        let _ = stack.push("+", None);
        let _ = stack.push("", Some(2.0));
        let _ = stack.push("^", None);
        let _ = stack.push("", Some(2.0));
        let _ = stack.push("^", None);
        let _ = stack.push("", Some(3.0));
        let _ = stack.push("+", None);
        let _ = stack.push("", Some(1.0));
        let v = stack.calculate();
        assert_eq!(v, Ok(262.0));
    }

    #[test]
    fn test_unary_minus() {
        let mut stack = Stack::new();
        // -3 ^ 2 = 9: negation binds tighter than power
        let _ = stack.push(UNARY_MINUS, None);
        let _ = stack.push("", Some(3.0));
        let _ = stack.push("^", None);
        let _ = stack.push("", Some(2.0));
        let v = stack.calculate();
        assert_eq!(v, Ok(9.0));
    }

    #[test]
    fn test_unclosed_bracket_tolerated() {
        let mut stack = Stack::new();
        // (1 + 2 -> 3
        let _ = stack.push("(", None);
        let _ = stack.push("", Some(1.0));
        let _ = stack.push("+", None);
        let _ = stack.push("", Some(2.0));
        let v = stack.calculate();
        assert_eq!(v, Ok(3.0));
    }

    #[test]
    fn test_mismatched_closing_bracket() {
        let mut stack = Stack::new();
        let _ = stack.push("", Some(1.0));
        let _ = stack.push("+", None);
        let _ = stack.push("", Some(2.0));
        let v = stack.push(")", None);
        assert_eq!(v, Err(CalcError::ClosingBracketMismatch));
    }
}
