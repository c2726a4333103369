//! Known-answer test: a fixed seed signs a fixed playlist to a fixed
//! signature, matching other DP-1 implementations byte for byte.

use dp1::{parse_playlist, sign_playlist, verify_playlist_signature, Ed25519KeyPair};
use serde_json::json;

const SEED: [u8; 32] = [42u8; 32];
const PUBLIC_KEY_HEX: &str = "197f6b23e16c8532c6abc838facd5ea789be0c76b2920334039bfa8b3d368d61";
const SIGNATURE: &str = "ed25519:0xf4a650d9300fe4869e3e2daf42e37c8f09489c921d7898d733d98e5e5b03dbae3825bd8ef336fa6d4c8f0757884373002941d97a71b1098faa0689a7cdeb340b";

fn vector_playlist() -> serde_json::Value {
    json!({
        "dpVersion": "1.0.0",
        "id": "123e4567-e89b-12d3-a456-426614174000",
        "slug": "vector",
        "title": "Vector",
        "created": "2024-01-15T14:30:00.000Z",
        "items": [{
            "id": "123e4567-e89b-12d3-a456-426614174001",
            "source": "https://example.com/art.html",
            "duration": 300,
            "license": "open",
            "created": "2024-01-15T14:30:00.001Z"
        }]
    })
}

#[test]
fn public_key_from_seed() {
    let kp = Ed25519KeyPair::from_seed(&SEED);
    assert_eq!(hex::encode(kp.public_key()), PUBLIC_KEY_HEX);
}

#[tokio::test]
async fn signs_to_known_signature() {
    let playlist = parse_playlist(&vector_playlist()).unwrap();
    let signature = sign_playlist(&playlist, SEED).await.unwrap();
    assert_eq!(signature, SIGNATURE);
}

#[tokio::test]
async fn verifies_foreign_signature() {
    let mut doc = vector_playlist();
    doc["signature"] = json!(SIGNATURE);
    let playlist = parse_playlist(&doc).unwrap();
    let public_key = hex::decode(PUBLIC_KEY_HEX).unwrap();
    assert!(verify_playlist_signature(&playlist, &public_key).await);
}
