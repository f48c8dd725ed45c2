// src/test_keys.rs
// Shared RSA keys for unit tests. Generated once per test binary.

use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use rsa::{
    pkcs8::{EncodePublicKey, LineEnding},
    Pkcs1v15Sign, RsaPrivateKey,
};
use sha2::{Digest, Sha256};

const BITS: usize = 1024;

fn generate() -> RsaPrivateKey {
    RsaPrivateKey::new(&mut rand::thread_rng(), BITS).expect("rsa keygen")
}

pub fn alice() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(generate)
}

pub fn bob() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(generate)
}

pub fn public_key_b64(key: &RsaPrivateKey) -> String {
    let der = key.to_public_key().to_public_key_der().expect("spki der");
    B64.encode(der.as_bytes())
}

pub fn public_key_pem(key: &RsaPrivateKey) -> String {
    key.to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("spki pem")
}

pub fn sign_b64(key: &RsaPrivateKey, message: &str) -> String {
    let digest = Sha256::digest(message.as_bytes());
    let sig = key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .expect("rsa sign");
    B64.encode(sig)
}
