// src/types.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::challenge::IssuedChallenge;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub public_key_base64: String,
}

#[derive(Serialize)]
pub struct RegisterRes { pub ok: bool, pub count: usize }

#[derive(Deserialize, Default)]
pub struct ChallengeQuery {
    #[serde(default)]
    pub id: String,
}

#[derive(Serialize)]
pub struct ChallengeRes {
    pub ok: bool,
    #[serde(flatten)]
    pub issued: IssuedChallenge,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReq {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub challenge: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub signature_base64: String,
}

#[derive(Serialize)]
pub struct VerifyRes { pub ok: bool }

#[derive(Serialize)]
pub struct ErrorRes { pub ok: bool, pub error: String }

/// Accept any JSON scalar as text. Null, `false`, `0`, arrays and objects
/// count as absent and come out empty.
fn loose_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s,
        Some(Value::Bool(true)) => "true".to_owned(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_fields_are_camel_case_and_coerced() {
        let req: RegisterReq =
            serde_json::from_value(json!({"id": 42, "name": "Alice", "publicKeyBase64": "KEY"}))
                .unwrap();
        assert_eq!(req.id, "42");
        assert_eq!(req.name, "Alice");
        assert_eq!(req.public_key_base64, "KEY");
    }

    #[test]
    fn absent_and_falsy_fields_are_empty() {
        let req: VerifyReq =
            serde_json::from_value(json!({"id": null, "challenge": false, "signatureBase64": 0}))
                .unwrap();
        assert!(req.id.is_empty());
        assert!(req.challenge.is_empty());
        assert!(req.signature_base64.is_empty());

        let req: VerifyReq = serde_json::from_value(json!({})).unwrap();
        assert!(req.challenge.is_empty());
    }

    #[test]
    fn challenge_response_is_flat() {
        let res = ChallengeRes {
            ok: true,
            issued: IssuedChallenge {
                id: "u1".into(),
                challenge: "c".into(),
                ttl_seconds: 300,
            },
        };
        assert_eq!(
            serde_json::to_value(res).unwrap(),
            json!({"ok": true, "id": "u1", "challenge": "c", "ttlSeconds": 300})
        );
    }
}
