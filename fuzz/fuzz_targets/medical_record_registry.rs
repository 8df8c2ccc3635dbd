#![no_main]

use std::collections::{HashMap, HashSet};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, BytesN, Env, String};

use medical_record_registry::{
    ContractError, MedicalRecordRegistry, MedicalRecordRegistryClient,
};

const DIDS: [&str; 4] = [
    "did:example:p0",
    "did:example:p1",
    "did:example:p2",
    "did:example:p3",
];

/// Actions modelling all registry entry points.
///
/// Record hashes come straight from the fuzzer so both fresh and duplicate
/// registrations are exercised; grants can target known or unknown hashes.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Add {
        hash: [u8; 32],
        submitter: u8,
        did: u8,
        record_type: u8,
    },
    Grant {
        known: bool,
        pick: u8,
        raw: [u8; 32],
        caller: u8,
        grantee: u8,
    },
    Revoke {
        known: bool,
        pick: u8,
        raw: [u8; 32],
        caller: u8,
        grantee: u8,
    },
    Check {
        pick: u8,
        raw: [u8; 32],
        identity: u8,
    },
}

fn record_type_label(n: u8) -> &'static str {
    match n % 4 {
        0 => "DIAGNOSIS",
        1 => "PRESCRIPTION",
        2 => "LAB_RESULT",
        _ => "IMAGING_STUDY",
    }
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let contract_id = env.register(MedicalRecordRegistry, ());
    let client = MedicalRecordRegistryClient::new(&env, &contract_id);

    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();

    // ── Shadow model ──
    // records: hash → (submitter index, did index)
    // index:   did index → hashes in submission order
    // access:  set of (hash, grantee index)
    let mut records: HashMap<[u8; 32], (usize, usize)> = HashMap::new();
    let mut index: HashMap<usize, Vec<[u8; 32]>> = HashMap::new();
    let mut access: HashSet<([u8; 32], usize)> = HashSet::new();
    let mut added: Vec<[u8; 32]> = Vec::new();

    let pick_hash = |known: bool, pick: u8, raw: [u8; 32], added: &Vec<[u8; 32]>| -> [u8; 32] {
        if known && !added.is_empty() {
            added[pick as usize % added.len()]
        } else {
            raw
        }
    };

    for action in actions {
        match action {
            FuzzAction::Add {
                hash,
                submitter,
                did,
                record_type,
            } => {
                let submitter_idx = submitter as usize % users.len();
                let did_idx = did as usize % DIDS.len();
                let hash_val = BytesN::from_array(&env, &hash);
                let did_val = String::from_str(&env, DIDS[did_idx]);
                let type_val = String::from_str(&env, record_type_label(record_type));

                let res =
                    client.try_add_record(&users[submitter_idx], &hash_val, &did_val, &type_val);

                if hash.iter().all(|b| *b == 0) {
                    assert!(matches!(res, Err(Ok(ContractError::InvalidInput))));
                } else if records.contains_key(&hash) {
                    assert!(matches!(res, Err(Ok(ContractError::RecordAlreadyExists))));
                } else {
                    assert!(res.is_ok(), "fresh registration must succeed");
                    records.insert(hash, (submitter_idx, did_idx));
                    index.entry(did_idx).or_default().push(hash);
                    added.push(hash);
                }

                // ── Invariant: the patient index mirrors the model order ──
                let chain_index = client.get_record_hashes_by_patient(&did_val);
                let model_index = index.get(&did_idx).cloned().unwrap_or_default();
                assert_eq!(chain_index.len() as usize, model_index.len());
                for (i, expected) in model_index.iter().enumerate() {
                    assert_eq!(
                        chain_index.get(i as u32).unwrap(),
                        BytesN::from_array(&env, expected)
                    );
                }
            }
            FuzzAction::Grant {
                known,
                pick,
                raw,
                caller,
                grantee,
            } => {
                let hash = pick_hash(known, pick, raw, &added);
                let caller_idx = caller as usize % users.len();
                let grantee_idx = grantee as usize % users.len();
                let hash_val = BytesN::from_array(&env, &hash);

                let res =
                    client.try_grant_access(&users[caller_idx], &hash_val, &users[grantee_idx]);

                match records.get(&hash) {
                    None => assert!(matches!(res, Err(Ok(ContractError::RecordNotFound)))),
                    Some((submitter_idx, _)) if *submitter_idx != caller_idx => {
                        assert!(matches!(res, Err(Ok(ContractError::NotRecordOwner))));
                    }
                    Some(_) => {
                        assert!(res.is_ok(), "owner grant must succeed");
                        access.insert((hash, grantee_idx));
                    }
                }

                assert_eq!(
                    client.check_access(&hash_val, &users[grantee_idx]),
                    access.contains(&(hash, grantee_idx))
                );
            }
            FuzzAction::Revoke {
                known,
                pick,
                raw,
                caller,
                grantee,
            } => {
                let hash = pick_hash(known, pick, raw, &added);
                let caller_idx = caller as usize % users.len();
                let grantee_idx = grantee as usize % users.len();
                let hash_val = BytesN::from_array(&env, &hash);

                let res =
                    client.try_revoke_access(&users[caller_idx], &hash_val, &users[grantee_idx]);

                match records.get(&hash) {
                    None => assert!(matches!(res, Err(Ok(ContractError::RecordNotFound)))),
                    Some((submitter_idx, _)) if *submitter_idx != caller_idx => {
                        assert!(matches!(res, Err(Ok(ContractError::NotRecordOwner))));
                    }
                    Some(_) => {
                        assert!(res.is_ok(), "owner revoke must succeed");
                        access.remove(&(hash, grantee_idx));
                    }
                }

                assert_eq!(
                    client.check_access(&hash_val, &users[grantee_idx]),
                    access.contains(&(hash, grantee_idx))
                );
            }
            FuzzAction::Check {
                pick,
                raw,
                identity,
            } => {
                let hash = pick_hash(!added.is_empty(), pick, raw, &added);
                let identity_idx = identity as usize % users.len();
                let hash_val = BytesN::from_array(&env, &hash);

                assert_eq!(
                    client.check_access(&hash_val, &users[identity_idx]),
                    access.contains(&(hash, identity_idx))
                );
            }
        }

        // ── Post-action invariants ──
        assert_eq!(client.get_record_count(), records.len() as u64);
        for (hash, (submitter_idx, _)) in &records {
            let metadata = client.get_record_metadata(&BytesN::from_array(&env, hash));
            assert_eq!(
                metadata.submitter.as_ref(),
                Some(&users[*submitter_idx]),
                "INVARIANT VIOLATION: record submitter changed"
            );
        }
    }
});
