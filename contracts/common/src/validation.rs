use soroban_sdk::String;

/// Inclusive length-bounds check for opaque string fields. The contracts
/// treat identifiers as index keys, so bounds are the only policy applied.
pub fn len_within(value: &String, min: u32, max: u32) -> bool {
    let len = value.len();
    (min..=max).contains(&len)
}
