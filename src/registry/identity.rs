//! Session identifiers and username discriminators.

use crate::core::GameRng;

/// Digits in a session identifier.
pub const SESSION_ID_DIGITS: usize = 6;

/// Digits in a username discriminator.
pub const DISCRIMINATOR_DIGITS: usize = 4;

/// A fresh numeric session id not accepted by `taken`.
pub fn new_session_id(rng: &mut GameRng, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = rng.digits(SESSION_ID_DIGITS);
        if !taken(&id) {
            return id;
        }
    }
}

/// Append a `#NNNN` discriminator to `username`, retrying until the
/// result is not accepted by `taken`.
///
/// ```
/// use rust_uno::core::GameRng;
/// use rust_uno::registry::disambiguate;
///
/// let mut rng = GameRng::new(1);
/// let identity = disambiguate("ann", &mut rng, |_| false);
/// assert!(identity.starts_with("ann#"));
/// assert_eq!(identity.len(), "ann#0000".len());
/// ```
pub fn disambiguate(username: &str, rng: &mut GameRng, taken: impl Fn(&str) -> bool) -> String {
    let base = match username.trim() {
        "" => "player",
        name => name,
    };
    loop {
        let identity = format!("{base}#{}", rng.digits(DISCRIMINATOR_DIGITS));
        if !taken(&identity) {
            return identity;
        }
    }
}
