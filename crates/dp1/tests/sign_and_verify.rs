//! End-to-end: untrusted JSON is parsed, signed, re-serialized in a
//! different key order and verified.

use dp1::{
    parse_playlist, sign_playlist, verify_playlist_signature, Ed25519KeyPair, Ed25519Provider,
    Playlist, Signer, Verifier,
};
use serde_json::{json, Value};

fn wire_playlist() -> Value {
    json!({
        "dpVersion": "1.0.0",
        "id": "123e4567-e89b-12d3-a456-426614174000",
        "slug": "my-playlist-1234",
        "title": "My Playlist",
        "created": "2024-01-15T14:30:00.000Z",
        "defaults": {"display": {"scaling": "fit", "background": "#000000"}, "duration": 300},
        "items": [
            {
                "id": "123e4567-e89b-12d3-a456-426614174001",
                "title": "Genesis",
                "source": "https://example.com/art.html",
                "duration": 300,
                "license": "open",
                "created": "2024-01-15T14:30:00.001Z",
                "provenance": {
                    "type": "onChain",
                    "contract": {
                        "chain": "evm",
                        "standard": "erc721",
                        "address": "0x1234567890123456789012345678901234567890",
                        "tokenId": "42"
                    }
                }
            },
            {
                "id": "123e4567-e89b-12d3-a456-426614174002",
                "source": "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
                "duration": 60.5,
                "license": "token",
                "created": "2024-01-15T14:30:00.002Z",
                "repro": {
                    "engineVersion": {"chromium": "123.0.0"},
                    "seed": "0x84a39ef5",
                    "assetsSHA256": ["0xdeadbeef"],
                    "frameHash": {"sha256": "0xdeadbeef", "phash": "0xaf39bc"}
                }
            }
        ]
    })
}

/// Rebuild every object with its keys in reverse order.
fn reverse_key_order(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map.iter().rev() {
                out.insert(k.clone(), reverse_key_order(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(reverse_key_order).collect()),
        other => other.clone(),
    }
}

#[tokio::test]
async fn parse_sign_verify_roundtrip() {
    let kp = Ed25519KeyPair::generate();
    let playlist = parse_playlist(&wire_playlist()).unwrap();

    let signature = sign_playlist(&playlist, kp.private_key()).await.unwrap();
    assert!(signature.starts_with("ed25519:0x"));
    assert_eq!(signature.len(), "ed25519:0x".len() + 128);

    let signed = playlist.with_signature(signature);
    assert!(verify_playlist_signature(&signed, &kp.public_key()).await);
}

#[tokio::test]
async fn signed_playlist_survives_the_wire() {
    let kp = Ed25519KeyPair::generate();
    let playlist = parse_playlist(&wire_playlist()).unwrap();
    let signed = Signer::new(Ed25519Provider)
        .sign_playlist(&playlist, kp.private_key())
        .await
        .unwrap();

    // Consumers receive any equivalent serialization.
    let wire = serde_json::to_string_pretty(&reverse_key_order(&serde_json::to_value(&signed).unwrap()))
        .unwrap();
    let received = dp1::parse_playlist_str(&wire).unwrap();
    assert_eq!(received, signed);
    assert!(verify_playlist_signature(&received, &kp.public_key()).await);
}

#[tokio::test]
async fn tampering_breaks_verification() {
    let kp = Ed25519KeyPair::generate();
    let playlist = parse_playlist(&wire_playlist()).unwrap();
    let signed = Signer::new(Ed25519Provider)
        .sign_playlist(&playlist, kp.private_key())
        .await
        .unwrap();

    let mut retitled = signed.clone();
    retitled.title.push('!');
    assert!(!verify_playlist_signature(&retitled, &kp.public_key()).await);

    let mut longer = signed.clone();
    longer.items[0].duration = 301.0;
    assert!(!verify_playlist_signature(&longer, &kp.public_key()).await);

    let mut reordered = signed.clone();
    reordered.items.reverse();
    assert!(!verify_playlist_signature(&reordered, &kp.public_key()).await);
}

#[tokio::test]
async fn wrong_key_and_missing_signature() {
    let kp = Ed25519KeyPair::generate();
    let other = Ed25519KeyPair::generate();
    let playlist = parse_playlist(&wire_playlist()).unwrap();
    assert!(!verify_playlist_signature(&playlist, &kp.public_key()).await);

    let signed = Signer::new(Ed25519Provider)
        .sign_playlist(&playlist, kp.private_key())
        .await
        .unwrap();
    assert!(!verify_playlist_signature(&signed, &other.public_key()).await);
    assert!(!verify_playlist_signature(&signed, &[0u8; 5]).await);
}

#[tokio::test]
async fn hex_private_key_matches_raw_seed() {
    let kp = Ed25519KeyPair::from_seed(&[42u8; 32]);
    let playlist = parse_playlist(&wire_playlist()).unwrap();

    let from_bytes = sign_playlist(&playlist, kp.secret_seed()).await.unwrap();
    let hex_key = format!("0x{}", "2a".repeat(32));
    let from_hex = sign_playlist(&playlist, hex_key.as_str()).await.unwrap();
    assert_eq!(from_bytes, from_hex);

    let odd = sign_playlist(&playlist, "0xabc").await;
    assert!(matches!(odd, Err(dp1::CryptoError::OddLengthHex)));
}

#[tokio::test]
async fn producer_built_playlist_validates_and_verifies() {
    let kp = Ed25519KeyPair::generate();
    let item = dp1::PlaylistItem::new("https://example.com/work", 120.0, dp1::License::Open);
    let playlist = Playlist::new("Morning Loop", "morning-loop", vec![item]);

    let signed = Signer::new(Ed25519Provider)
        .sign_playlist(&playlist, kp.private_key())
        .await
        .unwrap();
    let reparsed = parse_playlist(&serde_json::to_value(&signed).unwrap()).unwrap();
    assert!(Verifier::new(Ed25519Provider).verify(&reparsed, &kp.public_key()).await);
}
