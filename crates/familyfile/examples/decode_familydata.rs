//! Simple decoder to inspect a family data file.
//!
//! Usage: `decode_familydata <familydata> [places.cache]`. Set `RUST_LOG` for
//! decoder logs.

use std::path::PathBuf;

use familyfile::{BundleFiles, Decoder, DecodeOptions, FamilyFile, Sex};

fn sex_label(sex: Sex) -> &'static str {
    match sex {
        Sex::Male => "M",
        Sex::Female => "F",
        Sex::Unknown => "?",
    }
}

fn print_summary(ff: &FamilyFile) {
    println!("\n=== Header ===");
    if let Some(header) = &ff.header {
        println!("Magic: {}", header.magic);
        println!("Device: {} ({})", header.device_id, header.model);
        println!("App: {}", header.app_path);
    }
    println!("Fingerprint: {}", ff.fingerprint);

    println!("\n=== Counts ===");
    println!("Persons: {}", ff.persons.len());
    println!("Families: {}", ff.families.len());
    println!("Places: {}", ff.places.len());
    println!("Event definitions: {}", ff.event_definitions.len());
    println!("Sources: {}", ff.sources.len());
    println!("Notes: {}", ff.notes.len());
    println!("Media: {}", ff.media_refs.len());

    println!("\n=== First persons ===");
    for person in ff.persons.iter().take(10) {
        println!(
            "  #{:<6} {} [{}] events={} notes={}",
            person.id,
            person.full_name(),
            sex_label(person.sex),
            person.events.len(),
            person.note_refs.len()
        );
        for event in person.events.iter().filter(|e| !e.date.is_empty()).take(3) {
            let place = event
                .place_refs
                .first()
                .and_then(|&id| ff.place(id))
                .map(|p| p.name.as_str())
                .unwrap_or("");
            println!("      0x{:04X} {} {}", event.tag, event.date, place);
        }
    }

    println!("\n=== First families ===");
    for family in ff.families.iter().take(10) {
        println!(
            "  #{:<6} partners={:?} children={:?}",
            family.id,
            family.partners().collect::<Vec<_>>(),
            family.children
        );
    }

    if !ff.warnings.is_empty() {
        println!("\n=== Warnings ({}) ===", ff.warnings.len());
        for warning in ff.warnings.iter().take(20) {
            println!("  {warning}");
        }
    }
}

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .expect("Failed to start logger");

    let mut args = std::env::args().skip(1);
    let family_data = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("familyfile.familydata"));
    let places_cache = args.next().map(PathBuf::from);

    println!("Reading: {}", family_data.display());

    let files = BundleFiles {
        family_data,
        caches: places_cache.into_iter().collect(),
        ..Default::default()
    };
    let decoder = Decoder::new(DecodeOptions::default().with_max_errors(1000));
    let ff = decoder.decode_files(&files).expect("Failed to decode");

    print_summary(&ff);
}
