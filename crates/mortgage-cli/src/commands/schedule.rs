use clap::Args;
use serde_json::Value;

use mortgage_core::interest_benefit::compute_interest_benefit;
use mortgage_core::{calculate_mortgage, LoanForm, LoanParameters};

use crate::input;

/// Loan inputs shared by every mortgage command
#[derive(Args, Debug, Default)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long, alias = "amount")]
    pub principal: Option<String>,

    /// Annual interest rate in percent (e.g. 4 for 4%)
    #[arg(long)]
    pub rate: Option<String>,

    /// Term in whole years
    #[arg(long, alias = "years")]
    pub term: Option<String>,

    /// Repayment scheme: annuity or linear
    #[arg(long, default_value = "annuity")]
    pub scheme: String,

    /// Extra principal repaid every month
    #[arg(long)]
    pub extra: Option<String>,

    /// Annual discount factor in percent for the time-value column
    #[arg(long)]
    pub discount: Option<String>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl LoanArgs {
    fn to_form(&self) -> LoanForm {
        LoanForm {
            principal: self.principal.clone().unwrap_or_default(),
            annual_interest_rate_percent: self.rate.clone().unwrap_or_default(),
            term_years: self.term.clone().unwrap_or_default(),
            scheme: self.scheme.clone(),
            extra_monthly_repayment: self.extra.clone().unwrap_or_default(),
            discount_factor_percent: self.discount.clone().unwrap_or_default(),
        }
    }
}

/// Resolve loan parameters: `--input` file, then flags, then piped JSON.
pub fn resolve_params(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        let params: LoanParameters = input::file::read_input(path)?;
        params.validate()?;
        return Ok(params);
    }

    if args.principal.is_some() {
        return Ok(args.to_form().parse()?);
    }

    if let Some(data) = input::stdin::read_stdin()? {
        let params: LoanParameters = serde_json::from_value(data)?;
        params.validate()?;
        return Ok(params);
    }

    Err("--principal, --rate and --term are required (or provide --input / stdin)".into())
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let result = calculate_mortgage(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_interest_benefit(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let result = compute_interest_benefit(&params)?;
    Ok(serde_json::json!({ "result": serde_json::to_value(result)? }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_core::Scheme;
    use rust_decimal::Decimal;

    fn args() -> LoanArgs {
        LoanArgs {
            principal: Some("100000".into()),
            rate: Some("3".into()),
            term: Some("20".into()),
            scheme: "linear".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_become_parameters() {
        let params = resolve_params(&args()).unwrap();
        assert_eq!(params.scheme, Scheme::Linear);
        assert_eq!(params.term_years, 20);
        assert_eq!(params.extra_monthly_repayment, Decimal::ZERO);
    }

    #[test]
    fn test_bad_flag_names_field() {
        let mut a = args();
        a.rate = Some("abc".into());
        let err = resolve_params(&a).unwrap_err();
        assert!(err.to_string().contains("annual_interest_rate_percent"));
    }

    #[test]
    fn test_schedule_value_has_periods() {
        let value = run_schedule(args()).unwrap();
        assert_eq!(value["result"]["periods"].as_array().unwrap().len(), 240);
    }
}
