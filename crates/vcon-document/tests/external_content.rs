//! # External Content Attachment Scenarios
//!
//! End-to-end flows a producer and a consumer of a vCon go through: the
//! producer signs a recording that it publishes at a URL and writes the
//! document; the consumer loads the document, fetches the bytes, and checks
//! them against the entry.

use proptest::prelude::*;
use rand_core::{OsRng, RngCore};
use vcon_core::{PartyRef, Rfc2822Timestamp};
use vcon_document::{
    deserialize, serialize, DialogEntry, DialogType, DocumentError, ExternalRecording, Vcon,
};
use vcon_crypto::LmotsAlgorithm;

const START: &str = "Sat, 14 May 2022 18:16:19 -0000";
const URL: &str = r#"https://example.com?q="ddd"&y='!'"#;

fn start() -> Rfc2822Timestamp {
    START.parse().unwrap()
}

/// Attach a one-second WAV recording and return its dialog index.
fn attach(vcon: &mut Vcon, content: &[u8], parties: PartyRef, url: &str) -> usize {
    vcon.attach_external(content, start(), 1.0, parties, url, "audio/x-wav", "rec.wav")
        .unwrap()
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    buf
}

#[test]
fn external_recording_full_cycle() {
    let mut vcon = Vcon::new();
    vcon.set_party_tel_url("tel:+12345678901").unwrap();
    vcon.set_party_tel_url("tel:+19876543210").unwrap();

    let content = random_bytes(4096);
    let index = vcon
        .attach_external(
            &content,
            start(),
            94.84,
            PartyRef::Single(0),
            URL,
            "audio/x-wav",
            "my_rec.wav",
        )
        .unwrap();

    let entry = vcon.dialog()[index].as_external().expect("external entry");
    assert_eq!(entry.dialog_type, DialogType::Recording);
    assert_eq!(entry.start.as_str(), START);
    assert_eq!(entry.duration, 94.84);
    assert_eq!(entry.parties, PartyRef::Single(0));
    assert_eq!(entry.url, URL);
    assert_eq!(entry.mimetype, "audio/x-wav");
    assert_eq!(entry.filename, "my_rec.wav");

    let text = vcon.dumps().unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let dialog = &json["dialog"][index];
    assert_eq!(dialog["type"], "recording");
    assert_eq!(dialog["start"], START);
    assert_eq!(dialog["parties"], 0);
    assert_eq!(dialog["url"], URL);
    assert!(dialog.get("body").is_none());

    let loaded = Vcon::loads(&text).unwrap();
    assert_eq!(loaded, vcon);
    assert_eq!(loaded.uuid(), vcon.uuid());

    loaded.verify_external(index, &content).unwrap();
    let err = loaded.verify_external(index, &content[1..]).unwrap_err();
    assert!(err.is_invalid_signature(), "{err}");
}

#[test]
fn inline_entry_cannot_be_verified_as_external() {
    let mut vcon = Vcon::new();
    vcon.set_party_tel_url("tel:+12345678901").unwrap();
    let content = random_bytes(64);
    let index = vcon
        .add_dialog_inline_recording(
            &content,
            start(),
            3.0,
            PartyRef::Single(0),
            "audio/x-wav",
            Some("a.wav"),
        )
        .unwrap();

    let loaded = Vcon::loads(&vcon.dumps().unwrap()).unwrap();
    let err = loaded.verify_external(index, &content).unwrap_err();
    assert!(matches!(err, DocumentError::NotExternalEntry { index: 0 }));
    assert_eq!(loaded.inline_body(index).unwrap(), Some(content));
}

#[test]
fn swapping_keys_between_entries_is_detected() {
    let mut vcon = Vcon::new();
    vcon.set_party_tel_url("tel:+1").unwrap();
    let a = random_bytes(128);
    let b = random_bytes(128);
    attach(&mut vcon, &a, PartyRef::Single(0), "https://x/a");
    attach(&mut vcon, &b, PartyRef::Single(0), "https://x/b");

    let mut json: serde_json::Value = serde_json::from_str(&vcon.dumps().unwrap()).unwrap();
    let key_b = json["dialog"][1]["key"].clone();
    json["dialog"][0]["key"] = key_b;
    let tampered = Vcon::loads(&json.to_string()).unwrap();

    assert!(tampered.verify_external(0, &a).unwrap_err().is_invalid_signature());
    tampered.verify_external(1, &b).unwrap();
}

#[test]
fn mixed_dialog_loads_in_order() {
    let mut vcon = Vcon::new();
    vcon.set_party_tel_url("tel:+1").unwrap();
    vcon.set_party_tel_url("tel:+2").unwrap();
    vcon.add_dialog_inline_recording(
        b"one",
        start(),
        1.0,
        PartyRef::Many(vec![0, 1]),
        "audio/x-wav",
        None,
    )
    .unwrap();
    attach(&mut vcon, b"two", PartyRef::Many(vec![1]), "https://x/2");

    let loaded = Vcon::loads(&vcon.dumps_pretty().unwrap()).unwrap();
    assert!(matches!(loaded.dialog()[0], DialogEntry::Inline(_)));
    assert!(loaded.dialog()[1].is_external());
    assert_eq!(loaded.dialog()[1].parties(), &PartyRef::Many(vec![1]));
}

#[test]
fn documents_from_other_producers_load() {
    let text = format!(
        r#"{{
            "vcon": "0.0.1",
            "uuid": "7b0e4a1c-8f55-4c1e-9a2f-3d6f1c2b5a90",
            "created_at": "2022-05-14T18:20:00Z",
            "parties": [{{"tel": "+12345678901"}}, {{"mailto": "agent@example.com"}}],
            "dialog": [{{
                "type": "recording",
                "start": "{START}",
                "duration": 30,
                "parties": [0, 1],
                "url": "https://media.example.com/r.wav",
                "mimetype": "audio/x-wav",
                "filename": "r.wav",
                "signature": "c2lnbmF0dXJl",
                "key": "a2V5"
            }}]
        }}"#
    );
    let vcon = Vcon::loads(&text).unwrap();
    assert_eq!(vcon.parties()[1].mailto.as_deref(), Some("agent@example.com"));
    // Well-formed text that is not a valid key is still a signature failure.
    assert!(vcon.verify_external(0, b"anything").unwrap_err().is_invalid_signature());
}

#[test]
fn load_rejects_unknown_dialog_type() {
    let mut vcon = Vcon::new();
    vcon.set_party_tel_url("tel:+1").unwrap();
    attach(&mut vcon, b"x", PartyRef::Single(0), "https://x");
    let mut json: serde_json::Value = serde_json::from_str(&vcon.dumps().unwrap()).unwrap();
    json["dialog"][0]["type"] = serde_json::json!("hologram");
    assert!(matches!(
        Vcon::loads(&json.to_string()).unwrap_err(),
        DocumentError::MalformedDocument(_)
    ));
}

fn arb_start() -> impl Strategy<Value = Rfc2822Timestamp> {
    (0i64..4_000_000_000, prop::sample::select(vec!["+0000", "-0000", "-0500", "+0930"]))
        .prop_map(|(secs, offset)| {
            let base = chrono::DateTime::from_timestamp(secs, 0)
                .unwrap()
                .format("%a, %d %b %Y %H:%M:%S")
                .to_string();
            format!("{base} {offset}").parse().unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Any signed entry survives its text form unchanged and still verifies.
    #[test]
    fn external_entry_round_trips(
        content in prop::collection::vec(any::<u8>(), 1..256),
        start in arb_start(),
        duration in 0.0f64..100_000.0,
        parties in prop::collection::vec(0usize..8, 1..4),
        url in "https://[a-z]{1,12}\\.example/[ -~]{0,24}",
        filename in "[a-zA-Z0-9_.]{0,16}",
    ) {
        let entry = ExternalRecording {
            start,
            duration,
            parties: PartyRef::Many(parties),
            url,
            mimetype: "audio/x-wav".to_string(),
            filename,
        }
        .sign(&content, LmotsAlgorithm::Sha256N32W4)
        .unwrap();

        let parsed = deserialize(&serialize(&entry).unwrap()).unwrap();
        prop_assert_eq!(&parsed, &entry);
        prop_assert!(parsed.verify(&content).is_ok());
    }
}
