//! Two-operand integer calculator fed one line of text at a time.

mod reader;
mod request;

pub use reader::CalculationRequestReader;
pub use request::CalculationRequest;

use std::fmt;
use std::str::FromStr;

/// One of the four supported binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }
}

impl FromStr for Operator {
    type Err = CalculatorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            other => Err(CalculatorError::InvalidOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Apply `operator` to the operands. Division truncates toward zero.
    pub fn calculate(&self, num1: i64, operator: &str, num2: i64) -> Result<i64, CalculatorError> {
        self.apply(num1, operator.parse()?, num2)
    }

    pub fn apply(&self, num1: i64, operator: Operator, num2: i64) -> Result<i64, CalculatorError> {
        let result = match operator {
            Operator::Add => num1.checked_add(num2),
            Operator::Subtract => num1.checked_sub(num2),
            Operator::Multiply => num1.checked_mul(num2),
            Operator::Divide => {
                if num2 == 0 {
                    return Err(CalculatorError::DivisionByZero);
                }
                num1.checked_div(num2)
            }
        };

        result.ok_or(CalculatorError::Overflow {
            num1,
            operator,
            num2,
        })
    }

    pub fn evaluate(&self, request: &CalculationRequest) -> Result<i64, CalculatorError> {
        self.apply(request.num1, request.operator, request.num2)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CalculatorError {
    #[error("invalid operator '{0}', expected one of + - * /")]
    InvalidOperator(String),
    #[error("malformed expression '{0}', expected '<num1> <op> <num2>'")]
    Malformed(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("{num1} {operator} {num2} overflows a 64-bit integer")]
    Overflow {
        num1: i64,
        operator: Operator,
        num2: i64,
    },
    #[error("failed to read expression: {0}")]
    Io(#[from] std::io::Error),
}
