// src/verifier.rs
use tracing::{info, warn};

use crate::{
    challenge::ChallengeStore,
    crypto,
    error::{AuthError, Result},
    registry::Registry,
};

/// Check a signed challenge for `id`.
///
/// `id` and `signature_b64` are trimmed; `challenge` is compared byte for
/// byte as received. Checks run in order: required fields, registered
/// identity, active challenge, challenge equality, signature. An unknown
/// id therefore never touches the challenge store, and a mismatched
/// challenge never reaches the signature check. Once the challenge
/// matches it is consumed, whether or not the signature verifies.
pub fn verify(
    registry: &Registry,
    challenges: &ChallengeStore,
    id: &str,
    challenge: &str,
    signature_b64: &str,
) -> Result<bool> {
    let id = id.trim();
    let signature_b64 = signature_b64.trim();
    if id.is_empty() || challenge.is_empty() || signature_b64.is_empty() {
        return Err(AuthError::MissingFields);
    }

    let participant = registry.lookup(id).ok_or(AuthError::UnknownUser)?;
    let expected = challenges.redeem(id, challenge)?;

    // sign-over bytes are the server's copy, not the caller's
    match crypto::verify_signature(&participant.public_key_b64, expected.as_bytes(), signature_b64) {
        Ok(verified) => {
            info!(id, verified, "challenge verified");
            Ok(verified)
        }
        Err(e) => {
            warn!(id, error = %e, "signature check failed");
            Err(e.into())
        }
    }
}
