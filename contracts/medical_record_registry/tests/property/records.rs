#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for record registration and lookup.
//!
//! Invariants tested:
//! - A single `add_record` makes the record visible with exactly the
//!   submitted fields, a positive timestamp, and the caller as submitter
//! - Re-registering a hash always fails and never disturbs the first entry
//! - The patient index always lists hashes in submission order
//! - Lookups on unknown hashes always yield the zero-valued metadata

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, BytesN, Env, String};

use medical_record_registry::{ContractError, MedicalRecordRegistry, MedicalRecordRegistryClient};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, MedicalRecordRegistryClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let contract_id = env.register(MedicalRecordRegistry, ());
    let client = MedicalRecordRegistryClient::new(&env, &contract_id);

    (env, client)
}

/// Map a u8 to one of the record-type labels the portal submits.
fn record_type_from_u8(env: &Env, n: u8) -> String {
    let label = match n % 6 {
        0 => "DIAGNOSIS",
        1 => "PRESCRIPTION",
        2 => "LAB_RESULT",
        3 => "IMMUNIZATION",
        4 => "IMAGING_STUDY",
        _ => "TREATMENT_PLAN",
    };
    String::from_str(env, label)
}

fn nonzero_hash() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>().prop_filter("hash must not be all zero", |h| h.iter().any(|b| *b != 0))
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    /// A registered record must be readable back with exactly the
    /// submitted fields plus provenance.
    #[test]
    fn prop_add_then_lookup_roundtrip(
        hash_bytes in nonzero_hash(),
        did_suffix in "[a-z0-9]{1,12}",
        rtype_seed in 0u8..=255u8,
    ) {
        let (env, client) = setup();

        let submitter = Address::generate(&env);
        let hash = BytesN::from_array(&env, &hash_bytes);
        let did = String::from_str(&env, &format!("did:example:{did_suffix}"));
        let rtype = record_type_from_u8(&env, rtype_seed);

        let (returned, timestamp) = client.add_record(&submitter, &hash, &did, &rtype);

        prop_assert_eq!(returned, submitter.clone());
        prop_assert!(timestamp > 0);
        prop_assert!(client.record_exists(&hash));

        let metadata = client.get_record_metadata(&hash);
        prop_assert_eq!(metadata.patient_did, did);
        prop_assert_eq!(metadata.record_type, rtype);
        prop_assert_eq!(metadata.timestamp, timestamp);
        prop_assert_eq!(metadata.submitter, Some(submitter));
    }

    /// The second registration of a hash always loses, whoever submits it,
    /// and the first entry survives byte for byte.
    #[test]
    fn prop_duplicate_add_always_rejected(
        hash_bytes in nonzero_hash(),
        did_suffix in "[a-z0-9]{1,12}",
        first_seed in 0u8..=255u8,
        second_seed in 0u8..=255u8,
    ) {
        let (env, client) = setup();

        let first = Address::generate(&env);
        let second = Address::generate(&env);
        let hash = BytesN::from_array(&env, &hash_bytes);
        let did = String::from_str(&env, &format!("did:example:{did_suffix}"));
        let first_type = record_type_from_u8(&env, first_seed);
        let second_type = record_type_from_u8(&env, second_seed);

        client.add_record(&first, &hash, &did, &first_type);

        let res = client.try_add_record(&second, &hash, &did, &second_type);
        prop_assert!(res.is_err());
        match res {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::RecordAlreadyExists),
            _ => prop_assert!(false, "Expected RecordAlreadyExists error"),
        }

        let metadata = client.get_record_metadata(&hash);
        prop_assert_eq!(metadata.record_type, first_type);
        prop_assert_eq!(metadata.submitter, Some(first));
        prop_assert_eq!(client.get_record_count(), 1);
    }

    /// For any number of records (1–8) under one DID, the index lists the
    /// hashes in exactly the submission order and the count matches.
    #[test]
    fn prop_patient_index_in_submission_order(
        n_records in 1usize..=8usize,
        did_suffix in "[a-z0-9]{1,12}",
    ) {
        let (env, client) = setup();

        let submitter = Address::generate(&env);
        let did = String::from_str(&env, &format!("did:example:{did_suffix}"));

        let mut submitted = std::vec::Vec::new();
        for i in 0..n_records {
            let hash = BytesN::from_array(&env, &[(i + 1) as u8; 32]);
            client.add_record(
                &submitter,
                &hash,
                &did,
                &record_type_from_u8(&env, i as u8),
            );
            submitted.push(hash);
        }

        let hashes = client.get_record_hashes_by_patient(&did);
        prop_assert_eq!(hashes.len() as usize, n_records);
        for (i, expected) in submitted.iter().enumerate() {
            prop_assert_eq!(&hashes.get(i as u32).unwrap(), expected);
        }
        prop_assert_eq!(client.get_record_count(), n_records as u64);
    }

    /// Lookups never fail: unknown hashes yield the zero-valued metadata
    /// and unknown DIDs an empty index.
    #[test]
    fn prop_unknown_lookups_yield_defaults(
        hash_bytes in any::<[u8; 32]>(),
        did_suffix in "[a-z0-9]{1,12}",
    ) {
        let (env, client) = setup();

        let hash = BytesN::from_array(&env, &hash_bytes);
        prop_assert!(!client.record_exists(&hash));

        let metadata = client.get_record_metadata(&hash);
        prop_assert_eq!(metadata.patient_did, String::from_str(&env, ""));
        prop_assert_eq!(metadata.record_type, String::from_str(&env, ""));
        prop_assert_eq!(metadata.timestamp, 0);
        prop_assert_eq!(metadata.submitter, None);

        let did = String::from_str(&env, &format!("did:example:{did_suffix}"));
        prop_assert!(client.get_record_hashes_by_patient(&did).is_empty());
    }
}
