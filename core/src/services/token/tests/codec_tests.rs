//! Unit tests for the token codec

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::{TokenClaims, TokenKind};
use crate::errors::DomainError;
use crate::services::token::{CodecError, SigningKey, TokenCodec};

const SECRET: &str = "testsecretkey-dfasdfasdfasdfasdfasdfsadfasdfasdfasdfasdf";
const OTHER_SECRET: &str = "invalid jwt secret key testtesttesttesttest";

fn key() -> SigningKey {
    SigningKey::derive(SECRET.as_bytes()).unwrap()
}

fn claims(kind: TokenKind) -> TokenClaims {
    TokenClaims::issue("testUserId", "test user", kind, Duration::seconds(100)).unwrap()
}

/// Signs an arbitrary JSON payload with the test secret
fn sign_raw(payload: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_round_trip_preserves_claims() {
    let key = key();

    for kind in [TokenKind::Access, TokenKind::Refresh] {
        let original = claims(kind);
        let token = TokenCodec::encode(&original, &key).unwrap();

        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(TokenCodec::decode(&token, &key).unwrap(), original);
    }
}

#[test]
fn test_round_trip_with_unicode_display_name() {
    let key = key();
    let original =
        TokenClaims::issue("u-42", "테스트 유저", TokenKind::Access, Duration::minutes(5)).unwrap();

    let token = TokenCodec::encode(&original, &key).unwrap();
    let decoded = TokenCodec::decode(&token, &key).unwrap();

    assert_eq!(decoded.display_name(), "테스트 유저");
    assert_eq!(decoded, original);
}

#[test]
fn test_decode_with_other_key_is_signature_mismatch() {
    let other = SigningKey::derive(OTHER_SECRET.as_bytes()).unwrap();
    let token = TokenCodec::encode(&claims(TokenKind::Refresh), &other).unwrap();

    assert_eq!(
        TokenCodec::decode(&token, &key()),
        Err(CodecError::SignatureMismatch)
    );
}

#[test]
fn test_tampered_payload_is_detected() {
    let key = key();
    let token = TokenCodec::encode(&claims(TokenKind::Access), &key).unwrap();
    let parts: Vec<&str> = token.split('.').collect();

    let mut payload: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
    payload["sub"] = serde_json::json!("admin");
    let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
    let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

    assert_eq!(
        TokenCodec::decode(&forged, &key),
        Err(CodecError::SignatureMismatch)
    );
}

#[test]
fn test_malformed_strings() {
    let key = key();

    for input in ["", "not-a-token", "invalid.token.here", "a.b"] {
        let result = TokenCodec::decode(input, &key);
        assert!(
            matches!(result, Err(CodecError::Malformed(_))),
            "expected malformed for {:?}, got {:?}",
            input,
            result
        );
    }
}

#[test]
fn test_expired_claims_still_decode() {
    let key = key();
    let issued_at = Utc::now() - Duration::hours(2);
    let original = TokenClaims::new(
        Uuid::new_v4(),
        "test",
        "nick",
        TokenKind::Access,
        issued_at,
        issued_at + Duration::hours(1),
    )
    .unwrap();

    let token = TokenCodec::encode(&original, &key).unwrap();
    let decoded = TokenCodec::decode(&token, &key).unwrap();

    assert!(decoded.is_expired_at(Utc::now()));
    assert_eq!(decoded, original);
}

#[test]
fn test_foreign_issuer_is_malformed() {
    let now = Utc::now().timestamp();
    let token = sign_raw(serde_json::json!({
        "sub": "u1",
        "nickname": "nick",
        "type": "ACCESS",
        "iat": now,
        "exp": now + 100,
        "jti": Uuid::new_v4(),
        "iss": "someone-else",
    }));

    assert!(matches!(
        TokenCodec::decode(&token, &key()),
        Err(CodecError::Malformed(_))
    ));
}

#[test]
fn test_unknown_kind_is_malformed() {
    let now = Utc::now().timestamp();
    let token = sign_raw(serde_json::json!({
        "sub": "u1",
        "nickname": "nick",
        "type": "ID",
        "iat": now,
        "exp": now + 100,
        "jti": Uuid::new_v4(),
        "iss": "kpring-auth",
    }));

    assert!(matches!(
        TokenCodec::decode(&token, &key()),
        Err(CodecError::Malformed(_))
    ));
}

#[test]
fn test_expiry_before_issuance_still_decodes() {
    let now = Utc::now().timestamp();
    let token = sign_raw(serde_json::json!({
        "sub": "u1",
        "nickname": "nick",
        "type": "REFRESH",
        "iat": now,
        "exp": now - 10,
        "jti": Uuid::new_v4(),
        "iss": "kpring-auth",
    }));

    let decoded = TokenCodec::decode(&token, &key()).unwrap();

    assert_eq!(decoded.subject_id(), "u1");
    assert_eq!(decoded.kind(), TokenKind::Refresh);
    assert_eq!(decoded.issued_at().timestamp(), now);
    assert_eq!(decoded.expires_at().timestamp(), now - 10);
    assert!(decoded.is_expired_at(Utc::now()));
}

#[test]
fn test_key_derivation_rules() {
    assert!(matches!(
        SigningKey::derive(b""),
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        SigningKey::derive(b"too-short-secret"),
        Err(DomainError::Validation { .. })
    ));
    assert!(SigningKey::derive(&[7u8; 32]).is_ok());
}

#[test]
fn test_signing_key_debug_hides_material() {
    let debug = format!("{:?}", key());
    assert!(!debug.contains(SECRET));
}
