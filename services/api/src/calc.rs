use clap::Args;
use member_board::calculator::{CalculationRequest, CalculationRequestReader, Calculator};
use member_board::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct CalcArgs {
    /// Evaluate this expression instead of reading a line from stdin
    #[arg(long)]
    pub(crate) expr: Option<String>,
}

pub(crate) fn run_calc(args: CalcArgs) -> Result<(), AppError> {
    let request = match args.expr {
        Some(expr) => expr.parse::<CalculationRequest>()?,
        None => CalculationRequestReader::stdin().read()?,
    };

    println!("{}", evaluate(&request)?);
    Ok(())
}

fn evaluate(request: &CalculationRequest) -> Result<i64, AppError> {
    Ok(Calculator.evaluate(request)?)
}
