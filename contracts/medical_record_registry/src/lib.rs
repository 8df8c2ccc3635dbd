#![no_std]

pub mod errors;
pub mod events;
pub mod validation;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, BytesN, Env, String, Symbol, Vec,
};

use medrec_common::ErrorLogEntry;

pub use errors::ContractError;

/// Storage keys for the contract
const RECORD: Symbol = symbol_short!("RECORD");
const PATIENT_IDX: Symbol = symbol_short!("PAT_IDX");
const ACCESS: Symbol = symbol_short!("ACCESS");
const RECORD_COUNT: Symbol = symbol_short!("REC_CTR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Extends the time-to-live (TTL) for a storage key containing a record hash.
fn extend_ttl_hash_key(env: &Env, key: &(Symbol, BytesN<32>)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for a patient-index storage key.
fn extend_ttl_did_key(env: &Env, key: &(Symbol, String)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for an access grant storage key.
fn extend_ttl_access_key(env: &Env, key: &(Symbol, BytesN<32>, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Metadata stored for a registered medical record. The record content
/// itself lives off-chain; the registry keeps only its hash and provenance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordMetadata {
    pub patient_did: String,
    pub record_type: String,
    pub timestamp: u64,
    pub submitter: Option<Address>,
}

impl RecordMetadata {
    /// Zero-valued metadata returned for hashes that were never registered.
    /// Callers distinguish this from a real entry via `record_exists`.
    fn empty(env: &Env) -> Self {
        Self {
            patient_did: String::from_str(env, ""),
            record_type: String::from_str(env, ""),
            timestamp: 0,
            submitter: None,
        }
    }
}

#[contract]
pub struct MedicalRecordRegistry;

#[contractimpl]
impl MedicalRecordRegistry {
    /// Register a new record under its content hash.
    ///
    /// The authenticated `submitter` becomes the record's owner and the sole
    /// authority over its access list. Each hash can be registered at most
    /// once; the duplicate attempt fails with `RecordAlreadyExists` and
    /// leaves all state untouched.
    pub fn add_record(
        env: Env,
        submitter: Address,
        record_hash: BytesN<32>,
        patient_did: String,
        record_type: String,
    ) -> Result<(Address, u64), ContractError> {
        submitter.require_auth();

        validation::validate_record_hash(&record_hash)?;
        validation::validate_patient_did(&patient_did)?;
        validation::validate_record_type(&record_type)?;

        let key = (RECORD, record_hash.clone());
        if env.storage().persistent().has(&key) {
            errors::report(
                &env,
                ContractError::RecordAlreadyExists,
                Some(submitter),
                "add_record",
            );
            return Err(ContractError::RecordAlreadyExists);
        }

        let timestamp = env.ledger().timestamp();
        let metadata = RecordMetadata {
            patient_did: patient_did.clone(),
            record_type: record_type.clone(),
            timestamp,
            submitter: Some(submitter.clone()),
        };
        env.storage().persistent().set(&key, &metadata);
        extend_ttl_hash_key(&env, &key);

        let idx_key = (PATIENT_IDX, patient_did.clone());
        let mut hashes: Vec<BytesN<32>> = env
            .storage()
            .persistent()
            .get(&idx_key)
            .unwrap_or(Vec::new(&env));
        hashes.push_back(record_hash.clone());
        env.storage().persistent().set(&idx_key, &hashes);
        extend_ttl_did_key(&env, &idx_key);

        let count: u64 = env.storage().instance().get(&RECORD_COUNT).unwrap_or(0);
        env.storage()
            .instance()
            .set(&RECORD_COUNT, &count.saturating_add(1));

        events::publish_record_added(
            &env,
            record_hash,
            patient_did,
            record_type,
            timestamp,
            submitter.clone(),
        );

        Ok((submitter, timestamp))
    }

    /// Look up a record's metadata. Never fails: unknown hashes yield the
    /// zero-valued metadata (empty strings, zero timestamp, no submitter).
    pub fn get_record_metadata(env: Env, record_hash: BytesN<32>) -> RecordMetadata {
        let key = (RECORD, record_hash);
        env.storage()
            .persistent()
            .get(&key)
            .unwrap_or_else(|| RecordMetadata::empty(&env))
    }

    /// Check whether a record hash has been registered.
    pub fn record_exists(env: Env, record_hash: BytesN<32>) -> bool {
        let key = (RECORD, record_hash);
        env.storage().persistent().has(&key)
    }

    /// All record hashes registered under a patient DID, in submission
    /// order. Empty for a DID with no records.
    pub fn get_record_hashes_by_patient(env: Env, patient_did: String) -> Vec<BytesN<32>> {
        let key = (PATIENT_IDX, patient_did);
        env.storage()
            .persistent()
            .get(&key)
            .unwrap_or(Vec::new(&env))
    }

    /// Grant `grantee` access to a record. Only the record's submitter may
    /// call this. Granting an already-granted identity leaves the flag set
    /// and still publishes the notification.
    pub fn grant_access(
        env: Env,
        caller: Address,
        record_hash: BytesN<32>,
        grantee: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let owner = Self::require_record_owner(&env, &caller, &record_hash, "grant_access")?;

        let key = (ACCESS, record_hash.clone(), grantee.clone());
        env.storage().persistent().set(&key, &true);
        extend_ttl_access_key(&env, &key);

        events::publish_access_granted(&env, record_hash, owner, grantee);

        Ok(())
    }

    /// Revoke `grantee`'s access to a record. Only the record's submitter
    /// may call this. The notification is published even when the grantee
    /// never held access.
    pub fn revoke_access(
        env: Env,
        caller: Address,
        record_hash: BytesN<32>,
        grantee: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let owner = Self::require_record_owner(&env, &caller, &record_hash, "revoke_access")?;

        let key = (ACCESS, record_hash.clone(), grantee.clone());
        env.storage().persistent().remove(&key);

        events::publish_access_revoked(&env, record_hash, owner, grantee);

        Ok(())
    }

    /// Check whether `identity` currently holds access to a record.
    /// Never fails: unknown records and ungranted identities yield `false`.
    pub fn check_access(env: Env, record_hash: BytesN<32>, identity: Address) -> bool {
        let key = (ACCESS, record_hash, identity);
        env.storage().persistent().get(&key).unwrap_or(false)
    }

    /// Total number of records registered.
    pub fn get_record_count(env: Env) -> u64 {
        env.storage().instance().get(&RECORD_COUNT).unwrap_or(0)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    /// The most recent entries of the on-chain error log.
    pub fn get_error_log(env: Env) -> Vec<ErrorLogEntry> {
        medrec_common::get_error_log(&env)
    }

    /// Total count of failures reported since deployment.
    pub fn get_error_count(env: Env) -> u64 {
        medrec_common::get_error_count(&env)
    }

    /// Loads a record and verifies `caller` is its submitter. Reports and
    /// returns `RecordNotFound` / `NotRecordOwner` on the failure paths.
    fn require_record_owner(
        env: &Env,
        caller: &Address,
        record_hash: &BytesN<32>,
        operation: &str,
    ) -> Result<Address, ContractError> {
        let key = (RECORD, record_hash.clone());
        let metadata: RecordMetadata = match env.storage().persistent().get(&key) {
            Some(metadata) => metadata,
            None => {
                errors::report(
                    env,
                    ContractError::RecordNotFound,
                    Some(caller.clone()),
                    operation,
                );
                return Err(ContractError::RecordNotFound);
            }
        };

        match metadata.submitter {
            Some(owner) if owner == *caller => Ok(owner),
            _ => {
                errors::report(
                    env,
                    ContractError::NotRecordOwner,
                    Some(caller.clone()),
                    operation,
                );
                Err(ContractError::NotRecordOwner)
            }
        }
    }
}
