// src/crypto.rs
//! RSA-SHA256 (PKCS#1 v1.5) signature checks over challenge strings.

use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine,
};
use rsa::{pkcs8::DecodePublicKey, Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

const PEM_PREFIX: &str = "-----BEGIN";

// Padding optional on input.
const B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a registered key: base64 SubjectPublicKeyInfo DER, or the same
/// structure PEM-armoured.
pub fn decode_public_key(text: &str) -> Result<RsaPublicKey, CryptoError> {
    let text = text.trim();
    if text.starts_with(PEM_PREFIX) {
        return RsaPublicKey::from_public_key_pem(text).map_err(|e| CryptoError::Key(e.to_string()));
    }
    let der = decode_b64(text).map_err(CryptoError::KeyEncoding)?;
    RsaPublicKey::from_public_key_der(&der).map_err(|e| CryptoError::Key(e.to_string()))
}

pub fn decode_signature(signature_b64: &str) -> Result<Vec<u8>, CryptoError> {
    decode_b64(signature_b64).map_err(CryptoError::SignatureEncoding)
}

/// `Ok(false)` means well-formed inputs that simply do not verify.
pub fn verify_signature(
    public_key: &str,
    message: &[u8],
    signature_b64: &str,
) -> Result<bool, CryptoError> {
    let key = decode_public_key(public_key)?;
    let signature = decode_signature(signature_b64)?;
    let digest = Sha256::digest(message);

    match key.verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature) {
        Ok(()) => Ok(true),
        Err(rsa::Error::Verification) => Ok(false),
        Err(e) => Err(CryptoError::Verify(e.to_string())),
    }
}

// Line-wrapped, unpadded and URL-safe base64 are all accepted.
fn decode_b64(text: &str) -> Result<Vec<u8>, String> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    B64.decode(compact).map_err(|e| e.to_string())
}
