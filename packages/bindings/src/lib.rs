use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Full schedule for the selected scheme, compared with the other scheme.
///
/// Takes `LoanParameters` as JSON and returns the computation envelope as JSON.
#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    mortgage_core::calculator::calculate_mortgage_json(&input_json).map_err(to_napi_error)
}

/// Interest saved by the extra monthly repayment.
#[napi]
pub fn interest_benefit(input_json: String) -> NapiResult<String> {
    mortgage_core::calculator::interest_benefit_json(&input_json).map_err(to_napi_error)
}
