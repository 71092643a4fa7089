//! End-to-end decoding of synthetic bundles.

use std::fs;

use familyfile::{
    BundleData, BundleFiles, DecodeError, DecodeOptions, Decoder, ErrorCode, Sex, decode_bundle,
};

const PERSON: u16 = 0x20C4;
const FAMILY: u16 = 0x20C8;
const PLACE: u16 = 0x20D8;

// =============================================================================
// BUILDERS
// =============================================================================

/// File header: magic, then device strings at byte 80, padded to 256 bytes.
fn header() -> Vec<u8> {
    let mut data = b"3SDUAU~R".to_vec();
    data.resize(80, 0);
    data.extend_from_slice(b"DEVICE-1\nModel 7\nSN-0042\n/Applications/Tree.app\0");
    data.resize(256, 0);
    data
}

fn record(kind: u16, seq: u16, id: u32, payload: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; 4];
    buf.extend_from_slice(&seq.to_le_bytes());
    buf.extend_from_slice(&kind.to_le_bytes());
    buf.extend_from_slice(&[0x05, 0x03, 0x02, 0x01]);
    buf.extend_from_slice(&((payload.len() + 4) as u32).to_le_bytes());
    buf.extend_from_slice(&id.to_le_bytes());
    buf.extend_from_slice(&[0u8; 4]);
    buf.extend_from_slice(payload);
    buf
}

fn tlv(tag: u16, data: &[u8]) -> Vec<u8> {
    let mut out = ((data.len() + 4) as u16).to_le_bytes().to_vec();
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(data);
    out
}

/// TLV payload: the two remaining preamble bytes, then the fields.
fn fields(list: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![0u8; 2];
    for f in list {
        out.extend_from_slice(f);
    }
    out
}

/// Text payload for place records: the rest of the 8-byte preamble, then text.
fn text(s: &str) -> Vec<u8> {
    let mut out = vec![0u8; 4];
    out.extend_from_slice(s.as_bytes());
    out
}

/// Marriage on 15 Mar 1990 at place 7.
fn marriage() -> Vec<u8> {
    let mut event = vec![0u8; 18];
    event.extend_from_slice(&8u16.to_le_bytes());
    event.extend_from_slice(&0u16.to_le_bytes());
    event.push(0);
    event.push((3 << 6) | 15);
    event.extend_from_slice(&((1990u16 + 8000) * 4).to_le_bytes());
    event.extend_from_slice(b"[[pt:7]]");
    event
}

fn places_cache(entries: &[(u32, &str)]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(b"ahcp");
    data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    data.extend_from_slice(&[0u8; 4]);

    let mut next = 16 + entries.len() * 4;
    for (_, name) in entries {
        data.extend_from_slice(&(next as u32).to_le_bytes());
        next += 16 + name.len();
    }
    for (id, name) in entries {
        data.extend_from_slice(&((16 + name.len()) as u32).to_le_bytes());
        data.extend_from_slice(&id.to_le_bytes());
        data.extend_from_slice(&[0u8; 8]);
        data.extend_from_slice(name.as_bytes());
    }
    let total = data.len() as u32;
    data[..4].copy_from_slice(&total.to_le_bytes());
    data
}

fn sample_family_data() -> Vec<u8> {
    let mut data = header();
    data.extend(record(
        PERSON,
        1,
        10,
        &fields(&[
            tlv(0x001E, b"Alice"),
            tlv(0x000C, b"Smith"),
            tlv(0x001B, &[2]),
        ]),
    ));
    data.extend(record(
        PERSON,
        2,
        11,
        &fields(&[tlv(0x001E, b"Bob"), tlv(0x000C, b"Jones"), tlv(0x001B, &[1])]),
    ));
    data.extend(record(
        FAMILY,
        3,
        500,
        &fields(&[
            tlv(0x0050, &11u32.to_le_bytes()),
            tlv(0x0051, &10u32.to_le_bytes()),
            tlv(0x00FA, &(20u32 << 8).to_le_bytes()),
            tlv(0x00FB, &(21u32 << 8).to_le_bytes()),
            tlv(0x0410, &marriage()),
        ]),
    ));
    data.extend(record(PLACE, 4, 7, &text("Springfield, Illin")));
    data
}

// =============================================================================
// TESTS
// =============================================================================

#[test]
fn test_decode_full_bundle() {
    let bundle = BundleData::new(sample_family_data())
        .with_signature("familyfile v14\n")
        .with_cache("places.cache", places_cache(&[(7, "Springfield, Illinois")]))
        .with_note_file("p10-400-0.note", "Born «b»at home«/b».".as_bytes().to_vec());
    let ff = decode_bundle(&bundle).unwrap();

    assert_eq!(ff.version, 14);
    assert_eq!(ff.signature, "familyfile v14");
    assert_eq!(ff.fingerprint.len(), 64);

    let header = ff.header.as_ref().unwrap();
    assert_eq!(header.magic, "3SDUAU~R");
    assert_eq!(header.device_id, "DEVICE-1");
    assert_eq!(header.model, "Model 7");
    assert_eq!(header.serial, "SN-0042");
    assert_eq!(header.app_path, "/Applications/Tree.app");

    assert_eq!(ff.persons.len(), 2);
    let alice = ff.person(10).unwrap();
    assert_eq!(alice.full_name(), "Alice Smith");
    assert_eq!(alice.sex, Sex::Female);
    assert_eq!(ff.person(11).unwrap().sex, Sex::Male);

    let family = ff.family(500).unwrap();
    assert_eq!(family.partner1, Some(11));
    assert_eq!(family.partner2, Some(10));
    assert_eq!(family.children, vec![20, 21]);
    assert_eq!(family.events.len(), 1);
    assert_eq!(family.events[0].tag, 0x0410);
    assert_eq!(family.events[0].date, "15 Mar 1990");
    assert_eq!(family.events[0].place_refs, vec![7]);

    // truncated name restored from places.cache
    assert_eq!(ff.place(7).unwrap().name, "Springfield, Illinois");

    assert_eq!(ff.notes.len(), 1);
    assert_eq!(ff.notes[0].person_id, 10);
    assert_eq!(ff.notes[0].display_text, "Born at home.");
}

#[test]
fn test_json_output() {
    let ff = decode_bundle(&BundleData::new(sample_family_data())).unwrap();
    let json: serde_json::Value = serde_json::from_str(&ff.to_json().unwrap()).unwrap();
    assert_eq!(json["version"], 14);
    assert_eq!(json["persons"][0]["given_name"], "Alice");
    assert_eq!(json["persons"][0]["sex"], "female");
    assert_eq!(json["families"][0]["children"][1], 21);
}

#[test]
fn test_no_records() {
    let ff = decode_bundle(&BundleData::new(header())).unwrap();
    assert!(ff.header.is_some());
    assert!(ff.persons.is_empty());
    assert!(ff.families.is_empty());
    assert!(ff.places.is_empty());
}

#[test]
fn test_bad_cache_does_not_fail_decode() {
    let mut cache = places_cache(&[(7, "Springfield, Illinois")]);
    cache[4..8].copy_from_slice(b"nope");
    let bundle = BundleData::new(sample_family_data()).with_cache("places.cache", cache);
    let ff = decode_bundle(&bundle).unwrap();
    assert_eq!(ff.place(7).unwrap().name, "Springfield, Illin");
    assert_eq!(ff.warnings.len(), 1);
    assert!(ff.warnings[0].contains("places.cache"));
}

#[test]
fn test_wrong_magic_is_fatal() {
    let mut data = sample_family_data();
    data[..8].copy_from_slice(b"NOTMAGIC");
    let err = decode_bundle(&BundleData::new(data.clone())).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidMagic { .. }));
    assert_eq!(err.code(), ErrorCode::InvalidMagicOrVersion);

    let lenient = Decoder::new(DecodeOptions::default().with_require_magic(false));
    let ff = lenient.decode(&BundleData::new(data)).unwrap();
    assert_eq!(ff.persons.len(), 2);
}

#[test]
fn test_decode_files() {
    let dir = tempfile::tempdir().unwrap();
    let family_data = dir.path().join("familydata");
    let signature = dir.path().join("signature");
    let places = dir.path().join("places.cache");
    let note = dir.path().join("p11-400-0.note");
    let changes = dir.path().join("alice.changes");
    fs::write(&family_data, sample_family_data()).unwrap();
    fs::write(&signature, "sig-14").unwrap();
    fs::write(&places, places_cache(&[(7, "Springfield, Illinois")])).unwrap();
    fs::write(&note, "Moved away.").unwrap();
    let mut log = 5u32.to_le_bytes().to_vec();
    log.extend_from_slice(b"hello");
    fs::write(&changes, log).unwrap();

    let files = BundleFiles {
        family_data,
        signature: Some(signature),
        caches: vec![places, dir.path().join("missing.cache")],
        note_files: vec![note],
        members: vec![("alice".to_string(), changes)],
    };
    let ff = Decoder::default().decode_files(&files).unwrap();

    assert_eq!(ff.signature, "sig-14");
    assert_eq!(ff.place(7).unwrap().name, "Springfield, Illinois");
    assert_eq!(ff.notes[0].filename, "p11-400-0.note");
    assert_eq!(ff.notes[0].person_id, 11);
    assert_eq!(ff.members[0].name, "alice");
    assert_eq!(ff.members[0].changes.len(), 1);
    assert_eq!(ff.members[0].changes[0].data, b"hello");
    // the unreadable side file becomes a warning
    assert_eq!(ff.warnings.len(), 1);
    assert!(ff.warnings[0].contains("missing.cache"));
}

#[test]
fn test_missing_primary_file() {
    let dir = tempfile::tempdir().unwrap();
    let files = BundleFiles {
        family_data: dir.path().join("familydata"),
        ..Default::default()
    };
    let err = Decoder::default().decode_files(&files).unwrap_err();
    assert!(matches!(err, DecodeError::Io { .. }));
    assert_eq!(err.code(), ErrorCode::Unreadable);
}
