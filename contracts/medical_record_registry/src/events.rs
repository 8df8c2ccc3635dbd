use soroban_sdk::{symbol_short, Address, BytesN, Env, String};

/// Event published when a new record is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub record_hash: BytesN<32>,
    pub patient_did: String,
    pub record_type: String,
    pub timestamp: u64,
    pub submitter: Address,
}

/// Event published when a grantee is given access to a record.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub record_hash: BytesN<32>,
    pub owner: Address,
    pub grantee: Address,
    pub timestamp: u64,
}

/// Event published when a grantee's access to a record is revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub record_hash: BytesN<32>,
    pub owner: Address,
    pub grantee: Address,
    pub timestamp: u64,
}

/// Publishes an event when a record is registered. Topics carry the
/// patient DID so indexers can follow a single patient's records.
pub fn publish_record_added(
    env: &Env,
    record_hash: BytesN<32>,
    patient_did: String,
    record_type: String,
    timestamp: u64,
    submitter: Address,
) {
    let topics = (symbol_short!("REC_ADD"), patient_did.clone());
    let data = RecordAddedEvent {
        record_hash,
        patient_did,
        record_type,
        timestamp,
        submitter,
    };
    env.events().publish(topics, data);
}

/// Publishes an event when access to a record is granted.
/// Topics carry the record hash and the grantee.
pub fn publish_access_granted(
    env: &Env,
    record_hash: BytesN<32>,
    owner: Address,
    grantee: Address,
) {
    let topics = (
        symbol_short!("ACC_GRT"),
        record_hash.clone(),
        grantee.clone(),
    );
    let data = AccessGrantedEvent {
        record_hash,
        owner,
        grantee,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when access to a record is revoked. Published on
/// every authorized revoke, including revokes of never-granted identities.
pub fn publish_access_revoked(
    env: &Env,
    record_hash: BytesN<32>,
    owner: Address,
    grantee: Address,
) {
    let topics = (
        symbol_short!("ACC_REV"),
        record_hash.clone(),
        grantee.clone(),
    );
    let data = AccessRevokedEvent {
        record_hash,
        owner,
        grantee,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
