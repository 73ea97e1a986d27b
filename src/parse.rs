use pest::Parser;

use crate::errors::*;
use crate::stack::{Stack, UNARY_MINUS};

#[derive(Parser)]
#[grammar = "calc.pest"]
pub struct CalcParser;

/// Checks an accumulated expression before evaluation: only digits, basic
/// operators, brackets, decimal point, and whitespace are allowed, and the
/// running bracket count must never go negative and must end at zero
pub fn validate(expr: &str) -> Result<(), CalcError> {
    let mut depth = 0i32;
    for c in expr.chars() {
        match c {
            '0'..='9' | '+' | '-' | '*' | '/' | '.' | ' ' | '\t' => {}
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(CalcError::ClosingBracketMismatch);
                }
            }
            _ => return Err(CalcError::MalformedExpression(expr.to_string())),
        }
    }
    if depth != 0 {
        return Err(CalcError::OpenBracketMismatch);
    }
    Ok(())
}

/// Evaluates an expression with standard arithmetic precedence: `^` binds
/// tighter than `*` and `/`, which bind tighter than `+` and `-`, brackets
/// override. Juxtaposition like `2(3+4)` or `(1+2)(3+4)` is treated as
/// multiplication
pub fn eval(expr: &str) -> CalcResult {
    let pairs = match CalcParser::parse(Rule::expr, expr) {
        Ok(p) => p,
        Err(..) => return Err(CalcError::MalformedExpression(expr.to_string())),
    };

    // true when the previous token was a number or a closing bracket,
    // i.e. an operator or an implicit multiplication must follow
    let mut is_last_value = false;

    let mut stk = Stack::new();
    for pair in pairs {
        let rule = pair.as_rule();
        let val = pair.as_span().as_str();
        match rule {
            Rule::num => {
                let v = match val.parse::<f64>() {
                    Ok(v) => v,
                    Err(..) => return Err(CalcError::StrToFloat(val.to_string())),
                };
                if is_last_value {
                    stk.push("*", None)?;
                }
                stk.push("", Some(v))?;
                is_last_value = true;
            }
            Rule::open_b => {
                if is_last_value {
                    stk.push("*", None)?;
                }
                stk.push("(", None)?;
                is_last_value = false;
            }
            Rule::close_b => {
                stk.push(")", None)?;
                is_last_value = true;
            }
            Rule::operator => {
                if val == "+" && !is_last_value {
                    // unary plus is a no-op
                } else if val == "-" && !is_last_value {
                    stk.push(UNARY_MINUS, None)?;
                } else {
                    stk.push(val, None)?;
                    is_last_value = false;
                }
            }
            Rule::EOI => {}
            _ => return Err(CalcError::Unreachable),
        }
    }
    stk.calculate()
}
