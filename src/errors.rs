use thiserror::Error;

/// Failures surfaced to the caller before a simulation starts.
///
/// Protocol outcomes are not errors: a security abort is reported through
/// `SimulationResult::qber_exceeded` and a residual key mismatch through
/// `SimulationResult::keys_match`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid parameter `{name}` = {value}: {constraint}")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        constraint: &'static str,
    },
}
