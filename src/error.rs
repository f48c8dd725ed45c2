// src/error.rs
use thiserror::Error;

/// Every way a registry, challenge or verify call can be refused.
///
/// The `Display` text is what goes out on the wire as `error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing fields")]
    MissingFields,

    #[error("missing id")]
    MissingId,

    #[error("unknown user")]
    UnknownUser,

    /// Never issued and already expired look the same to the caller.
    #[error("challenge expired or missing")]
    ChallengeExpiredOrMissing,

    #[error("challenge mismatch")]
    ChallengeMismatch,

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Malformed key or signature material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid public key encoding: {0}")]
    KeyEncoding(String),

    #[error("invalid public key: {0}")]
    Key(String),

    #[error("invalid signature encoding: {0}")]
    SignatureEncoding(String),

    #[error("signature verification error: {0}")]
    Verify(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_strings_are_stable() {
        assert_eq!(AuthError::MissingFields.to_string(), "missing fields");
        assert_eq!(AuthError::MissingId.to_string(), "missing id");
        assert_eq!(AuthError::UnknownUser.to_string(), "unknown user");
        assert_eq!(
            AuthError::ChallengeExpiredOrMissing.to_string(),
            "challenge expired or missing"
        );
        assert_eq!(AuthError::ChallengeMismatch.to_string(), "challenge mismatch");
    }

    #[test]
    fn crypto_errors_pass_their_text_through() {
        let err: AuthError = CryptoError::Key("not rsa".into()).into();
        assert_eq!(err.to_string(), "invalid public key: not rsa");
    }
}
