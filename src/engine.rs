use lazy_static::lazy_static;
use log::debug;
use std::f64::consts::PI;

use crate::builder::{BinOp, ExpressionBuilder, Token};
use crate::errors::*;
use crate::format::{format_f64, round_result};
use crate::parse;

/// Selects how `=` resolves the accumulated state.
///
/// `Expression` parses the current operand as a full expression with
/// standard precedence and nested brackets. `Binary` keeps the classic
/// two-operand keypad behavior: choosing an operator while another one is
/// pending evaluates the pending pair first, so `2+3*4` gives `20` - the
/// operators chain left to right and there is no precedence. Both behaviors
/// exist on purpose; neither is a degenerate form of the other
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum EvalMode {
    Expression,
    Binary,
}

/// Scientific functions applied to the current operand
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SciFunc {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Square,
    Cube,
    Factorial,
    /// Does not compute immediately: captures the current operand as the
    /// base and defers to the next `=` as a binary power operation
    PowY,
}

lazy_static! {
    /// Keypad labels recognized by `SciFunc::from_label`, in display order
    pub static ref SCI_FUNCS: Vec<(&'static str, SciFunc)> = vec![
        ("sin", SciFunc::Sin),
        ("cos", SciFunc::Cos),
        ("tan", SciFunc::Tan),
        ("log", SciFunc::Log),
        ("ln", SciFunc::Ln),
        ("sqrt", SciFunc::Sqrt),
        ("x²", SciFunc::Square),
        ("x³", SciFunc::Cube),
        ("n!", SciFunc::Factorial),
        ("x^y", SciFunc::PowY),
    ];
}

impl SciFunc {
    pub fn from_label(label: &str) -> Option<SciFunc> {
        for (name, func) in SCI_FUNCS.iter() {
            if *name == label {
                return Some(*func);
            }
        }
        None
    }
}

/// A single keypad event. Every input maps 1:1 to one state transition
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Event {
    Digit(u8),
    Decimal,
    Pi,
    OpenParen,
    CloseParen,
    Operator(BinOp),
    Scientific(SciFunc),
    Percent,
    Equals,
    Delete,
    Clear,
}

/// The calculator engine: owns the accumulated state and resolves it to
/// numbers. All failures collapse into the builder's sticky error flag; the
/// display projections then show `"Error"` until the state is cleared
pub struct Calculator {
    builder: ExpressionBuilder,
    mode: EvalMode,
}

impl Calculator {
    pub fn new(mode: EvalMode) -> Self {
        Calculator {
            builder: ExpressionBuilder::new(),
            mode,
        }
    }

    /// Dispatches one keypad event. Operator keys append inline in
    /// expression mode and capture the left operand in binary mode; all
    /// other keys behave identically in both modes
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Digit(d) => self.builder.append(Token::Digit(d)),
            Event::Decimal => self.builder.append(Token::Decimal),
            Event::Pi => self.builder.append(Token::Pi),
            Event::OpenParen => self.builder.append(Token::Open),
            Event::CloseParen => self.builder.append(Token::Close),
            Event::Operator(op) => match self.mode {
                EvalMode::Expression => self.builder.append(Token::Op(op)),
                EvalMode::Binary => self.choose_operator(op),
            },
            Event::Scientific(func) => self.compute_scientific(func),
            Event::Percent => self.compute_percentage(),
            Event::Equals => self.compute(),
            Event::Delete => self.builder.delete_last(),
            Event::Clear => self.builder.clear(),
        }
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn builder(&self) -> &ExpressionBuilder {
        &self.builder
    }

    /// Captures the current operand as the left-hand side of `op`. When an
    /// operation is already pending the pending pair is evaluated first, so
    /// repeated operator presses chain left to right
    pub fn choose_operator(&mut self, op: BinOp) {
        if self.builder.error || self.builder.current.is_empty() {
            return;
        }
        if !self.builder.previous.is_empty() {
            self.compute();
            if self.builder.error {
                return;
            }
        }
        self.builder.pending = Some(op);
        self.builder.previous = std::mem::replace(&mut self.builder.current, String::new());
    }

    /// Resolves the accumulated state to a number: the pending pair when an
    /// operation is pending, otherwise (expression mode only) the current
    /// operand as a full expression. The result becomes the new current
    /// operand; any failure sets the error flag
    pub fn compute(&mut self) {
        if self.builder.error {
            return;
        }
        let res = match self.builder.pending {
            Some(op) => self.compute_pending(op),
            None => match self.mode {
                EvalMode::Expression => self.compute_expression(),
                EvalMode::Binary => return,
            },
        };
        self.store(res);
    }

    fn store(&mut self, res: CalcResult) {
        let v = match res {
            Ok(v) => v,
            Err(e) => {
                self.fail(e);
                return;
            }
        };
        if !v.is_finite() {
            self.fail(CalcError::NonFiniteResult);
            return;
        }
        let v = round_result(v);
        debug!("computed {}", v);
        self.builder.current = format_f64(v);
        self.builder.previous.clear();
        self.builder.pending = None;
        self.builder.depth = 0;
    }

    fn fail(&mut self, e: CalcError) {
        debug!("calculation failed: {}", e);
        self.builder.error = true;
    }

    fn compute_expression(&self) -> CalcResult {
        let mut expr = self.builder.current.clone();
        for _ in 0..self.builder.depth {
            expr.push(')');
        }
        let expr = expr.replace('÷', "/");
        parse::validate(&expr)?;
        parse::eval(&expr)
    }

    // A pending pair is always evaluated as a flat binary operation. In
    // binary mode each side must be a plain numeric literal; in expression
    // mode a side may itself be an accumulated sub-expression
    fn compute_pending(&self, op: BinOp) -> CalcResult {
        let lhs = self.parse_operand(&self.builder.previous)?;
        let rhs = self.parse_operand(&self.builder.current)?;
        match op {
            BinOp::Add => Ok(lhs + rhs),
            BinOp::Sub => Ok(lhs - rhs),
            BinOp::Mul => Ok(lhs * rhs),
            BinOp::Div => {
                if rhs == 0.0 {
                    Err(CalcError::DividedByZero(self.builder.previous.clone()))
                } else {
                    Ok(lhs / rhs)
                }
            }
            BinOp::Pow => Ok(lhs.powf(rhs)),
        }
    }

    fn parse_operand(&self, text: &str) -> CalcResult {
        if let Ok(v) = text.parse::<f64>() {
            return Ok(v);
        }
        if self.mode == EvalMode::Binary {
            return Err(CalcError::StrToFloat(text.to_string()));
        }
        let mut expr = text.replace('÷', "/");
        let open = expr.chars().filter(|c| *c == '(').count();
        let close = expr.chars().filter(|c| *c == ')').count();
        for _ in close..open {
            expr.push(')');
        }
        parse::validate(&expr)?;
        parse::eval(&expr)
    }

    /// Applies a scientific function to the current operand. A no-op when
    /// the operand does not hold a plain number
    pub fn compute_scientific(&mut self, func: SciFunc) {
        if self.builder.error {
            return;
        }
        let x = match self.builder.current.parse::<f64>() {
            Ok(v) => v,
            Err(..) => return,
        };

        let res = match func {
            SciFunc::Sin => Ok((x * PI / 180.0).sin()),
            SciFunc::Cos => Ok((x * PI / 180.0).cos()),
            SciFunc::Tan => Ok((x * PI / 180.0).tan()),
            SciFunc::Log => Ok(x.log10()),
            SciFunc::Ln => Ok(x.ln()),
            SciFunc::Sqrt => Ok(x.sqrt()),
            SciFunc::Square => Ok(x.powi(2)),
            SciFunc::Cube => Ok(x.powi(3)),
            SciFunc::Factorial => factorial(x),
            SciFunc::PowY => {
                self.builder.pending = Some(BinOp::Pow);
                self.builder.previous = std::mem::replace(&mut self.builder.current, String::new());
                return;
            }
        };

        match res {
            Ok(v) if v.is_finite() => self.builder.current = format_f64(round_result(v)),
            Ok(..) => self.fail(CalcError::NonFiniteResult),
            Err(e) => self.fail(e),
        }
    }

    /// Divides the current operand by 100. A no-op when the operand is
    /// empty or not a plain number
    pub fn compute_percentage(&mut self) {
        if self.builder.error || self.builder.current.is_empty() {
            return;
        }
        if let Ok(v) = self.builder.current.parse::<f64>() {
            self.builder.current = format_f64(v / 100.0);
        }
    }

    /// The current operand as display-ready text; `"Error"` once the error
    /// flag is set
    pub fn current_display(&self) -> String {
        if self.builder.error {
            "Error".to_string()
        } else {
            self.builder.current.clone()
        }
    }

    /// The captured left operand together with the pending operator symbol;
    /// empty when nothing is pending or the engine is in error state
    pub fn previous_display(&self) -> String {
        if self.builder.error {
            return String::new();
        }
        match self.builder.pending {
            Some(op) => format!("{} {}", self.builder.previous, op.symbol()),
            None => String::new(),
        }
    }
}

fn factorial(x: f64) -> CalcResult {
    if x < 0.0 {
        return Err(CalcError::NegativeFactorial(x));
    }
    if x.fract() != 0.0 {
        return Err(CalcError::NonIntegerFactorial(x));
    }
    // 171! does not fit into f64
    if x > 170.0 {
        return Err(CalcError::NonFiniteResult);
    }
    let mut res = 1.0;
    let mut i = 2.0;
    while i <= x {
        res *= i;
        i += 1.0;
    }
    Ok(res)
}
