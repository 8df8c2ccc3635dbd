use soroban_sdk::{BytesN, String};

use crate::errors::ContractError;
use medrec_common::validation::len_within;

const MAX_DID_LEN: u32 = 256;
const MAX_RECORD_TYPE_LEN: u32 = 64;

/// Reject the all-zero hash. Every registered record must be addressed by
/// a real content digest.
pub fn validate_record_hash(hash: &BytesN<32>) -> Result<(), ContractError> {
    if hash.to_array().iter().all(|b| *b == 0) {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Patient DIDs are opaque index keys; only presence and size are enforced.
pub fn validate_patient_did(did: &String) -> Result<(), ContractError> {
    if !len_within(did, 1, MAX_DID_LEN) {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Validate a record's type label.
pub fn validate_record_type(record_type: &String) -> Result<(), ContractError> {
    if !len_within(record_type, 1, MAX_RECORD_TYPE_LEN) {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}
