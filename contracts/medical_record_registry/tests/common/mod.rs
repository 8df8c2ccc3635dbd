use medical_record_registry::{MedicalRecordRegistry, MedicalRecordRegistryClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, BytesN, Env, String};

pub struct TestContext {
    pub env: Env,
    pub client: MedicalRecordRegistryClient<'static>,
}

/// Creates a mocked Soroban environment with a nonzero ledger time and
/// deploys the registry.
pub fn setup_test_env() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let contract_id = env.register(MedicalRecordRegistry, ());
    let client = MedicalRecordRegistryClient::new(&env, &contract_id);

    TestContext { env, client }
}

/// Builds a 32-byte record hash from a fill byte.
pub fn record_hash(ctx: &TestContext, fill: u8) -> BytesN<32> {
    BytesN::from_array(&ctx.env, &[fill; 32])
}

/// Registers a record and returns its submitter address.
pub fn submit_test_record(
    ctx: &TestContext,
    hash: &BytesN<32>,
    patient_did: &str,
    record_type: &str,
) -> Address {
    let submitter = Address::generate(&ctx.env);
    ctx.client.add_record(
        &submitter,
        hash,
        &String::from_str(&ctx.env, patient_did),
        &String::from_str(&ctx.env, record_type),
    );
    submitter
}
