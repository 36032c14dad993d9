use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of a deploy key in characters.
pub const DEPLOY_KEY_LEN: usize = 6;

/// Mint a new opaque deploy key: 6 ASCII alphanumerics.
///
/// No collision check is performed against existing keys; the keyspace
/// (62^6) makes collisions unlikely enough to accept.
#[must_use]
pub fn mint_deploy_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(DEPLOY_KEY_LEN)
        .map(char::from)
        .collect()
}
