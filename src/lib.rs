//! # Event-driven scientific calculator engine
//!
//! The engine accumulates keypad input into an expression, keeps bracket
//! balance correct, inserts implicit multiplication for juxtaposition like
//! `2(3+4)`, and resolves the accumulated state to a number with consistent
//! rounding. It never panics on malformed input: every failure collapses
//! into a sticky error state that only `clear` leaves.
//!
//! Two evaluation modes exist because both behaviors are wanted:
//! * `Expression` - the current operand is a full expression with nested
//!   brackets and standard precedence: `*` and `/` bind tighter than `+`
//!   and `-`, `^` is right-associative, brackets override. Missing closing
//!   brackets are appended automatically on `=`
//! * `Binary` - classic two-operand keypad behavior: choosing an operator
//!   while another one is pending evaluates the pending pair immediately,
//!   so operators chain left to right without precedence
//!
//! Scientific functions apply to the current operand:
//! * trigonometric: sin, cos, tan - the argument is in degrees
//! * logarithms: log (base 10), ln
//! * powers: sqrt, x², x³, and x^y (deferred to the next `=` as a binary
//!   power operation)
//! * factorial: n! - defined for non-negative integers up to 170
//!
//! Percentage divides the current operand by 100. The π key substitutes the
//! numeric literal. Results are rounded to ten decimal digits to suppress
//! floating point representation noise, so `0.1 + 0.2` displays as `0.3`.
//!
//! ```
//! use scicalc::builder::BinOp;
//! use scicalc::engine::{Calculator, EvalMode, Event};
//!
//! let mut calc = Calculator::new(EvalMode::Expression);
//! for ev in [
//!     Event::Digit(2),
//!     Event::Operator(BinOp::Add),
//!     Event::Digit(3),
//!     Event::Operator(BinOp::Mul),
//!     Event::Digit(4),
//!     Event::Equals,
//! ]
//! .iter()
//! {
//!     calc.handle(*ev);
//! }
//! assert_eq!(calc.current_display(), "14");
//! ```

#[macro_use]
extern crate pest_derive;

pub mod builder;
pub mod engine;
pub mod errors;
pub mod format;
pub mod parse;
pub mod stack;
