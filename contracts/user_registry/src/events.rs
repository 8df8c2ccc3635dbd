use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when a new user is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserRegisteredEvent {
    pub user_id: String,
    pub role: String,
    pub timestamp: u64,
    pub registered_by: Address,
}

/// Publishes an event when a new user is registered.
/// This event includes the user id, role, timestamp, and registrar.
pub fn publish_user_registered(env: &Env, user_id: String, role: String, registered_by: Address) {
    let topics = (symbol_short!("USR_REG"), user_id.clone());
    let data = UserRegisteredEvent {
        user_id,
        role,
        timestamp: env.ledger().timestamp(),
        registered_by,
    };
    env.events().publish(topics, data);
}
