#![no_std]

pub mod events;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, String, Symbol, Vec,
};

use medrec_common::{ErrorCategory, ErrorLogEntry, ErrorMeta, ErrorSeverity};

/// Storage keys for the contract
const USER: Symbol = symbol_short!("USER");
const USER_COUNT: Symbol = symbol_short!("USR_CTR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

const MAX_USER_ID_LEN: u32 = 128;
const MAX_ROLE_LEN: u32 = 32;

/// Extends the time-to-live (TTL) for a user storage key.
fn extend_ttl_user_key(env: &Env, key: &(Symbol, String)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Directory entry for one registered portal user.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserInfo {
    pub user_id: String,
    pub role: String,
    pub registered_at: u64,
    pub registered_by: Address,
}

/// Contract errors
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    UserAlreadyRegistered = 1,
    InvalidInput = 2,
}

impl ErrorMeta for ContractError {
    fn code(&self) -> u32 {
        *self as u32
    }

    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::UserAlreadyRegistered => ErrorCategory::StateConflict,
            ContractError::InvalidInput => ErrorCategory::Validation,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::UserAlreadyRegistered => ErrorSeverity::Medium,
            ContractError::InvalidInput => ErrorSeverity::Low,
        }
    }

    fn retryable(&self) -> bool {
        false
    }

    fn message(&self) -> &'static str {
        match self {
            ContractError::UserAlreadyRegistered => "A user with this id is already registered",
            ContractError::InvalidInput => "Invalid input parameters provided",
        }
    }
}

#[contract]
pub struct UserRegistry;

#[contractimpl]
impl UserRegistry {
    /// Register a portal user under its opaque id with a role label.
    /// Each id can be registered once; the duplicate attempt fails with
    /// `UserAlreadyRegistered` and leaves the original entry in place.
    pub fn register_user(
        env: Env,
        caller: Address,
        user_id: String,
        role: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        if !medrec_common::validation::len_within(&user_id, 1, MAX_USER_ID_LEN)
            || !medrec_common::validation::len_within(&role, 1, MAX_ROLE_LEN)
        {
            medrec_common::report(
                &env,
                &ContractError::InvalidInput,
                Some(caller),
                "register_user",
            );
            return Err(ContractError::InvalidInput);
        }

        let key = (USER, user_id.clone());
        if env.storage().persistent().has(&key) {
            medrec_common::report(
                &env,
                &ContractError::UserAlreadyRegistered,
                Some(caller),
                "register_user",
            );
            return Err(ContractError::UserAlreadyRegistered);
        }

        let info = UserInfo {
            user_id: user_id.clone(),
            role: role.clone(),
            registered_at: env.ledger().timestamp(),
            registered_by: caller.clone(),
        };
        env.storage().persistent().set(&key, &info);
        extend_ttl_user_key(&env, &key);

        let count: u64 = env.storage().instance().get(&USER_COUNT).unwrap_or(0);
        env.storage()
            .instance()
            .set(&USER_COUNT, &count.saturating_add(1));

        events::publish_user_registered(&env, user_id, role, caller);

        Ok(())
    }

    /// Look up a user's role. Never fails: unknown ids yield an empty role
    /// with the registered flag cleared.
    pub fn get_user_role(env: Env, user_id: String) -> (String, bool) {
        let key = (USER, user_id);
        match env.storage().persistent().get::<_, UserInfo>(&key) {
            Some(info) => (info.role, true),
            None => (String::from_str(&env, ""), false),
        }
    }

    /// Check whether a user id has been registered.
    pub fn user_exists(env: Env, user_id: String) -> bool {
        let key = (USER, user_id);
        env.storage().persistent().has(&key)
    }

    /// Total number of registered users.
    pub fn get_user_count(env: Env) -> u64 {
        env.storage().instance().get(&USER_COUNT).unwrap_or(0)
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
}
