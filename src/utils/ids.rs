// Every identifier the application mints comes from here. Entity ids are
// random UUIDs; referral codes are NOT checked for uniqueness, two leaders
// of the same branch can collide.
use rand::{distr::Alphanumeric, Rng};
use uuid::Uuid;

pub fn generate_entity_id() -> String {
    Uuid::new_v4().to_string()
}

/// Vouch code a leader hands out: 3-letter branch prefix, dash, 5 random
/// uppercase alphanumerics, e.g. "COM-7Q2PX".
pub fn generate_referral_code(branch: &str) -> String {
    let prefix = branch.chars().take(3).collect::<String>().to_uppercase();
    let suffix = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    format!("{}-{}", prefix, suffix)
}
