use std::fmt;

/// Expression calculation result: either a finite float or an error
pub type CalcResult = Result<f64, CalcError>;
pub(crate) type CalcErrorResult = Result<(), CalcError>;

#[derive(Clone, PartialEq)]
pub enum CalcError {
    MalformedExpression(String),
    StrToFloat(String),
    DividedByZero(String),
    NonFiniteResult,
    InvalidOp(String),
    NegativeFactorial(f64),
    NonIntegerFactorial(f64),

    EmptyExpression,
    TooManyOps,
    InsufficientOps,
    OpenBracketMismatch,
    ClosingBracketMismatch,

    Unreachable,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::MalformedExpression(s) => write!(f, "Malformed expression '{}'", s),
            CalcError::StrToFloat(s) => write!(f, "Failed to convert '{}' to float", s),
            CalcError::DividedByZero(s) => write!(f, "'{}' divided by zero", s),
            CalcError::NonFiniteResult => write!(f, "Result is not a finite number"),
            CalcError::InvalidOp(s) => write!(f, "Invalid operator '{}'", s),
            CalcError::NegativeFactorial(v) => write!(f, "Factorial is undefined for negative number {}", v),
            CalcError::NonIntegerFactorial(v) => write!(f, "Factorial is undefined for non-integer number {}", v),

            CalcError::EmptyExpression => write!(f, "Nothing to calculate"),
            CalcError::TooManyOps => write!(f, "Too many operators"),
            CalcError::InsufficientOps => write!(f, "Too many numbers"),
            CalcError::OpenBracketMismatch => write!(f, "Mismatched opening bracket"),
            CalcError::ClosingBracketMismatch => write!(f, "Mismatched closing bracket"),

            CalcError::Unreachable => write!(f, "unreachable"),
        }
    }
}

impl fmt::Debug for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
