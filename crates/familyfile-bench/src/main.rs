//! Decode benchmark over a synthetic family data file.
//!
//! Usage: `bench-decode [persons]`. Builds one person record per person, a
//! family for every pair and a place for every ten persons, then decodes the
//! result a few times.

use std::time::Instant;

use familyfile::{BundleData, DecodeOptions, Decoder};
use log::info;

const PERSON: u16 = 0x20C4;
const FAMILY: u16 = 0x20C8;
const PLACE: u16 = 0x20D8;

const ITERATIONS: usize = 5;

const GIVEN_NAMES: [&str; 8] = [
    "Alice", "Bernard", "Clara", "Dmitri", "Elsa", "Farid", "Greta", "Hugo",
];
const SURNAMES: [&str; 6] = ["Smith", "Novak", "Lindqvist", "Okafor", "Moreau", "Tanaka"];
const PLACE_NAMES: [&str; 4] = [
    "Springfield, Illinois, USA",
    "Glen Cove, New York, USA",
    "Lyon, Auvergne-Rhone-Alpes, France",
    "Uppsala, Uppsala County, Sweden",
];

// =============================================================================
// RECORD SYNTHESIS
// =============================================================================

fn record(out: &mut Vec<u8>, kind: u16, seq: u16, id: u32, payload: &[u8]) {
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&seq.to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&[0x05, 0x03, 0x02, 0x01]);
    out.extend_from_slice(&((payload.len() + 4) as u32).to_le_bytes());
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(payload);
}

fn field(out: &mut Vec<u8>, tag: u16, data: &[u8]) {
    out.extend_from_slice(&((data.len() + 4) as u16).to_le_bytes());
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(data);
}

/// Birth event payload dated 1 Jan of `year`, at `place`.
fn birth(year: u16, place: u32) -> Vec<u8> {
    let mut event = vec![0u8; 18];
    event.extend_from_slice(&8u16.to_le_bytes());
    event.extend_from_slice(&0u16.to_le_bytes());
    event.push(0);
    event.push((1 << 6) | 1);
    event.extend_from_slice(&((year + 8000) * 4).to_le_bytes());
    event.extend_from_slice(format!("[[pt:{place}]]").as_bytes());
    event
}

fn synthesize(persons: u32) -> Vec<u8> {
    let mut data = b"3SDUAU~R".to_vec();
    data.resize(80, 0);
    data.extend_from_slice(b"BENCH\nsynthetic\n0000\n/bench\0");
    data.resize(256, 0);

    let places = persons.div_ceil(10).max(1);
    let mut seq: u16 = 0;
    let mut next_seq = || {
        seq = seq.wrapping_add(1);
        seq
    };

    for id in 1..=persons {
        let i = id as usize;
        let mut payload = vec![0u8; 2];
        field(&mut payload, 0x001E, GIVEN_NAMES[i % GIVEN_NAMES.len()].as_bytes());
        field(&mut payload, 0x000C, SURNAMES[i % SURNAMES.len()].as_bytes());
        field(&mut payload, 0x001B, &[(id % 2 + 1) as u8]);
        let year = 1800 + (id % 200) as u16;
        field(&mut payload, 0x0410, &birth(year, 100_000 + id % places));
        record(&mut data, PERSON, next_seq(), id, &payload);
    }

    for (n, pair) in (1..=persons).collect::<Vec<_>>().chunks_exact(2).enumerate() {
        let mut payload = vec![0u8; 2];
        field(&mut payload, 0x0050, &pair[0].to_le_bytes());
        field(&mut payload, 0x0051, &pair[1].to_le_bytes());
        let child = persons + n as u32 + 1;
        field(&mut payload, 0x00FA, &(child << 8).to_le_bytes());
        record(&mut data, FAMILY, next_seq(), 50_000 + n as u32, &payload);
    }

    for p in 0..places {
        let name = PLACE_NAMES[p as usize % PLACE_NAMES.len()];
        // cut at a fixed width, like the real file does
        let mut payload = vec![0u8; 4];
        payload.extend_from_slice(&name.as_bytes()[..name.len().min(20)]);
        record(&mut data, PLACE, next_seq(), 100_000 + p, &payload);
    }

    data
}

fn places_cache(places: u32) -> Vec<u8> {
    let names: Vec<(u32, &str)> = (0..places)
        .map(|p| (100_000 + p, PLACE_NAMES[p as usize % PLACE_NAMES.len()]))
        .collect();

    let mut data = vec![0u8; 4];
    data.extend_from_slice(b"ahcp");
    data.extend_from_slice(&(names.len() as u32).to_le_bytes());
    data.extend_from_slice(&[0u8; 4]);
    let mut next = 16 + names.len() * 4;
    for (_, name) in &names {
        data.extend_from_slice(&(next as u32).to_le_bytes());
        next += 16 + name.len();
    }
    for (id, name) in &names {
        data.extend_from_slice(&((16 + name.len()) as u32).to_le_bytes());
        data.extend_from_slice(&id.to_le_bytes());
        data.extend_from_slice(&[0u8; 8]);
        data.extend_from_slice(name.as_bytes());
    }
    let total = data.len() as u32;
    data[..4].copy_from_slice(&total.to_le_bytes());
    data
}

// =============================================================================
// MAIN
// =============================================================================

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .and_then(|logger| logger.start())
        .expect("Failed to start logger");

    let persons: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(100_000);

    println!("=== Synthesis ===");
    let start = Instant::now();
    let family_data = synthesize(persons);
    let cache = places_cache(persons.div_ceil(10).max(1));
    println!("Persons: {persons}");
    println!("Family data: {} bytes", family_data.len());
    println!("Places cache: {} bytes", cache.len());
    println!("Built in {:?}", start.elapsed());
    info!(
        "event=synthesize module=bench status=ok persons={persons} bytes={}",
        family_data.len()
    );

    let bundle = BundleData::new(family_data).with_cache("places.cache", cache);
    let decoder = Decoder::new(DecodeOptions::default().with_max_errors(100));

    println!("\n=== Decode ===");
    let mut timings = Vec::with_capacity(ITERATIONS);
    let mut last = None;
    for _ in 0..ITERATIONS {
        let start = Instant::now();
        let ff = decoder.decode(&bundle).expect("Failed to decode");
        timings.push(start.elapsed());
        last = Some(ff);
    }
    let Some(ff) = last else {
        return;
    };
    timings.sort();
    println!("Min: {:?}", timings[0]);
    println!("Median: {:?}", timings[timings.len() / 2]);
    println!("Max: {:?}", timings[timings.len() - 1]);
    let mb = bundle.family_data.len() as f64 / (1024.0 * 1024.0);
    println!("Throughput: {:.1} MB/s", mb / timings[0].as_secs_f64());

    println!("\n=== Output ===");
    println!(
        "Persons: {}, families: {}, places: {}, warnings: {}",
        ff.persons.len(),
        ff.families.len(),
        ff.places.len(),
        ff.warnings.len()
    );
    if let Some(place) = ff.places.first() {
        println!("First place: {}", place.name);
    }

    let start = Instant::now();
    let json = serde_json::to_vec(&ff).expect("Failed to serialize");
    println!("JSON: {} bytes in {:?}", json.len(), start.elapsed());
}
