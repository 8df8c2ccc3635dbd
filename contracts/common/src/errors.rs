use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

pub const ERROR_LOG_KEY: Symbol = symbol_short!("ERR_LOG");
pub const ERROR_COUNT_KEY: Symbol = symbol_short!("ERR_CNT");
pub const MAX_ERROR_LOG_SIZE: u32 = 100;

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Extends the time-to-live (TTL) for instance storage.
/// Instance storage TTL applies to all keys in the instance storage.
fn extend_ttl_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: invalid input parameters or format errors
    Validation = 1,
    /// Authorization errors: permission and access control failures
    Authorization = 2,
    /// Not found errors: resource lookup failures
    NotFound = 3,
    /// State conflict errors: duplicate registrations
    StateConflict = 4,
    /// Storage errors: storage operation failures
    Storage = 5,
    /// System errors: contract-level issues
    System = 6,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: non-critical errors, informational
    Low = 1,
    /// Medium severity: important but recoverable errors
    Medium = 2,
    /// High severity: significant errors requiring attention
    High = 3,
    /// Critical severity: system-level failures requiring immediate action
    Critical = 4,
}

/// Context captured for every reported failure.
#[contracttype]
#[derive(Clone, Debug)]
pub struct ErrorContext {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub message: String,
    pub user: Option<Address>,
    pub operation: Option<String>,
    pub timestamp: u64,
    pub retryable: bool,
}

/// One entry of the on-chain error log.
#[contracttype]
#[derive(Clone, Debug)]
pub struct ErrorLogEntry {
    pub error_code: u32,
    pub context: ErrorContext,
}

/// Metadata every MedRec `#[contracterror]` enum exposes so the shared
/// log and ERROR event machinery can classify it.
pub trait ErrorMeta {
    fn code(&self) -> u32;
    fn category(&self) -> ErrorCategory;
    fn severity(&self) -> ErrorSeverity;
    fn retryable(&self) -> bool;
    fn message(&self) -> &'static str;
}

/// Builds an [`ErrorContext`] from an error and optional caller/operation
/// information. Category, severity, message, and the retryable flag come
/// from the error's [`ErrorMeta`] implementation.
pub fn error_context<E: ErrorMeta>(
    env: &Env,
    error: &E,
    user: Option<Address>,
    operation: Option<String>,
) -> ErrorContext {
    ErrorContext {
        category: error.category(),
        severity: error.severity(),
        message: String::from_str(env, error.message()),
        user,
        operation,
        timestamp: env.ledger().timestamp(),
        retryable: error.retryable(),
    }
}

/// Logs an error to the contract's error log and returns the context that
/// was recorded. The log keeps the most recent [`MAX_ERROR_LOG_SIZE`]
/// entries; the total count keeps growing past that cap.
pub fn log_error<E: ErrorMeta>(
    env: &Env,
    error: &E,
    user: Option<Address>,
    operation: Option<String>,
) -> ErrorContext {
    let context = error_context(env, error, user, operation);

    let log_entry = ErrorLogEntry {
        error_code: error.code(),
        context: context.clone(),
    };

    let mut error_log: Vec<ErrorLogEntry> = env
        .storage()
        .instance()
        .get(&ERROR_LOG_KEY)
        .unwrap_or(Vec::new(env));

    error_log.push_back(log_entry);

    if error_log.len() > MAX_ERROR_LOG_SIZE {
        error_log.remove(0);
    }

    env.storage().instance().set(&ERROR_LOG_KEY, &error_log);

    let error_count: u64 = env.storage().instance().get(&ERROR_COUNT_KEY).unwrap_or(0);
    env.storage()
        .instance()
        .set(&ERROR_COUNT_KEY, &error_count.saturating_add(1));

    extend_ttl_instance(env);

    context
}

/// Retrieves the error log. Empty if no errors have been logged.
pub fn get_error_log(env: &Env) -> Vec<ErrorLogEntry> {
    env.storage()
        .instance()
        .get(&ERROR_LOG_KEY)
        .unwrap_or(Vec::new(env))
}

/// Total count of errors logged since deployment. Unlike the log itself,
/// the count is never truncated.
pub fn get_error_count(env: &Env) -> u64 {
    env.storage().instance().get(&ERROR_COUNT_KEY).unwrap_or(0)
}

/// Publishes an ERROR event carrying the full failure context, so
/// off-chain indexers can consume failures in diagnostic mode.
pub fn publish_error(env: &Env, error_code: u32, context: ErrorContext) {
    let topics = (
        symbol_short!("ERROR"),
        context.category.clone(),
        context.severity.clone(),
    );
    let data = (
        error_code,
        context.category,
        context.severity,
        context.message,
        context.user,
        context.operation,
        context.retryable,
        context.timestamp,
    );
    env.events().publish(topics, data);
}

/// Logs the failure and publishes the ERROR event in one step. This is the
/// single entry point contract failure paths go through.
pub fn report<E: ErrorMeta>(env: &Env, error: &E, user: Option<Address>, operation: &str) {
    let op = String::from_str(env, operation);
    let context = log_error(env, error, user, Some(op));
    publish_error(env, error.code(), context);
}
