//! Public-key challenge-response authentication for named participants.
//!
//! A participant registers an RSA public key under an id, asks for a
//! one-time challenge, signs it locally and submits the signature. The
//! challenge is consumed once it has been matched so the same signature
//! cannot be replayed.

pub mod challenge;
pub mod config;
pub mod crypto;
pub mod error;
pub mod registry;
pub mod routes;
pub mod types;
pub mod verifier;

#[cfg(test)]
mod test_keys;

pub use challenge::{ChallengeStore, IssuedChallenge};
pub use error::{AuthError, CryptoError, Result};
pub use registry::{Participant, Registry};
