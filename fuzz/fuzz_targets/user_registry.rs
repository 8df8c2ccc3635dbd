#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env, String};

use user_registry::{ContractError, UserRegistry, UserRegistryClient};

const ROLES: [&str; 3] = ["patient", "doctor", "admin"];

/// Actions modelling the user directory entry points. User ids are drawn
/// from a small pool so duplicate registrations are hit often.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Register { id: u8, role: u8, caller: u8 },
    Lookup { id: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let contract_id = env.register(UserRegistry, ());
    let client = UserRegistryClient::new(&env, &contract_id);

    let callers: Vec<Address> = (0..3).map(|_| Address::generate(&env)).collect();

    // Shadow model: user id suffix → role label
    let mut model: HashMap<u8, &'static str> = HashMap::new();

    for action in actions {
        match action {
            FuzzAction::Register { id, role, caller } => {
                let id_key = id % 16;
                let role_label = ROLES[role as usize % ROLES.len()];
                let user_id = String::from_str(&env, &format!("user-{id_key}"));
                let role_val = String::from_str(&env, role_label);

                let res = client.try_register_user(
                    &callers[caller as usize % callers.len()],
                    &user_id,
                    &role_val,
                );

                if model.contains_key(&id_key) {
                    assert!(matches!(
                        res,
                        Err(Ok(ContractError::UserAlreadyRegistered))
                    ));
                } else {
                    assert!(res.is_ok(), "fresh registration must succeed");
                    model.insert(id_key, role_label);
                }
            }
            FuzzAction::Lookup { id } => {
                let id_key = id % 16;
                let user_id = String::from_str(&env, &format!("user-{id_key}"));
                let (role, registered) = client.get_user_role(&user_id);

                match model.get(&id_key) {
                    Some(expected) => {
                        assert!(registered);
                        assert_eq!(role, String::from_str(&env, expected));
                    }
                    None => {
                        assert!(!registered);
                        assert_eq!(role, String::from_str(&env, ""));
                    }
                }
                assert_eq!(client.user_exists(&user_id), registered);
            }
        }

        // ── Invariant: the count never drifts from the model ──
        assert_eq!(client.get_user_count(), model.len() as u64);
    }
});
