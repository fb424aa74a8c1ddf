use std::io::{self, BufRead, StdinLock};

use super::{CalculationRequest, CalculatorError};

/// Reads one expression per call from a line-oriented source.
pub struct CalculationRequestReader<B> {
    source: B,
}

impl CalculationRequestReader<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<B: BufRead> CalculationRequestReader<B> {
    pub fn new(source: B) -> Self {
        Self { source }
    }

    pub fn read(&mut self) -> Result<CalculationRequest, CalculatorError> {
        let mut line = String::new();
        if self.source.read_line(&mut line)? == 0 {
            return Err(CalculatorError::Malformed(String::new()));
        }
        line.parse()
    }
}
