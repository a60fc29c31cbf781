//! Opaque session token generation.
//!
//! Tokens are `{prefix}_{13 base36 chars}` and carry no claims, signature,
//! or expiry. Uniqueness is only as good as the RNG; these are demo
//! credentials, not suitable for real security use.

use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 13;

/// Token prefix used by the login endpoint.
pub const LOGIN_PREFIX: &str = "jwt_token";
/// Token prefix used by the register endpoint.
pub const REGISTER_PREFIX: &str = "new_user";

/// Generate a token of the form `prefix_<random base36 suffix>`.
pub fn generate(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{prefix}_{suffix}")
}
