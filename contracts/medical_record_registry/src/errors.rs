use medrec_common::{ErrorCategory, ErrorMeta, ErrorSeverity};
use soroban_sdk::{Address, Env};

/// Contract errors. Codes cannot carry payloads, so the offending caller
/// and operation name travel in the ERROR event context instead.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    RecordAlreadyExists = 1,
    RecordNotFound = 2,
    NotRecordOwner = 3,
    InvalidInput = 4,
}

impl ErrorMeta for ContractError {
    fn code(&self) -> u32 {
        *self as u32
    }

    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::RecordAlreadyExists => ErrorCategory::StateConflict,
            ContractError::RecordNotFound => ErrorCategory::NotFound,
            ContractError::NotRecordOwner => ErrorCategory::Authorization,
            ContractError::InvalidInput => ErrorCategory::Validation,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::RecordAlreadyExists
            | ContractError::RecordNotFound
            | ContractError::InvalidInput => ErrorSeverity::Low,
            ContractError::NotRecordOwner => ErrorSeverity::Medium,
        }
    }

    fn retryable(&self) -> bool {
        // Conflicts need a new hash, authorization needs the owner; none of
        // these succeed on a plain retry.
        false
    }

    fn message(&self) -> &'static str {
        match self {
            ContractError::RecordAlreadyExists => "A record with this hash already exists",
            ContractError::RecordNotFound => "Record does not exist",
            ContractError::NotRecordOwner => "Caller is not the record submitter",
            ContractError::InvalidInput => "Invalid input parameters provided",
        }
    }
}

/// Logs the failure and publishes the ERROR event.
pub fn report(env: &Env, error: ContractError, user: Option<Address>, operation: &str) {
    medrec_common::report(env, &error, user, operation);
}
