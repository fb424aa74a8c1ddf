use std::str::FromStr;

use super::{CalculatorError, Operator};

/// Parsed form of a `"<num1> <op> <num2>"` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationRequest {
    pub num1: i64,
    pub operator: Operator,
    pub num2: i64,
}

impl FromStr for CalculationRequest {
    type Err = CalculatorError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || CalculatorError::Malformed(line.trim().to_string());

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [num1, operator, num2] = tokens.as_slice() else {
            return Err(malformed());
        };

        if operator.chars().count() != 1 {
            return Err(CalculatorError::InvalidOperator(operator.to_string()));
        }

        Ok(Self {
            num1: num1.parse().map_err(|_| malformed())?,
            operator: operator.parse()?,
            num2: num2.parse().map_err(|_| malformed())?,
        })
    }
}
