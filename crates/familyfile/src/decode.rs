//! Bundle decoding: runs every decoder over one bundle and assembles the
//! [`FamilyFile`].
//!
//! Only the primary data file can fail the decode. Everything else (side
//! caches, note files, change logs, the signature) is best effort; problems
//! end up as warnings on the result.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use sha2::{Digest, Sha256};

use crate::cache::{self, CacheKind};
use crate::codec::familydata::decode_family_data;
use crate::codec::header::decode_header;
use crate::codec::primitives::{lossy, to_hex};
use crate::diagnostics::Diagnostics;
use crate::enrich::enrich_place_names;
use crate::error::{CacheError, DecodeError};
use crate::limits::{FAMILY_DATA_FILE, FAMILY_DATA_MAGIC, FORMAT_VERSION, MIN_FAMILY_DATA_LEN};
use crate::model::FamilyFile;
use crate::notes::decode_note_file;

const BUNDLE_EXTENSION_PREFIX: &str = "familyfile";
const SIGNATURE_FILE: &str = "signature";
const NOTES_FILE: &str = "notes";

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Supported bundle format versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    V14,
}

impl FormatVersion {
    pub fn number(self) -> u32 {
        match self {
            FormatVersion::V14 => FORMAT_VERSION,
        }
    }

    /// Parses a bundle extension such as `.familyfile14`.
    pub fn from_extension(ext: &str) -> Result<FormatVersion, DecodeError> {
        let unsupported = || DecodeError::UnsupportedVersion {
            version: ext.to_string(),
        };
        let number = ext
            .trim_start_matches('.')
            .strip_prefix(BUNDLE_EXTENSION_PREFIX)
            .ok_or_else(unsupported)?;
        match number.parse::<u32>() {
            Ok(FORMAT_VERSION) => Ok(FormatVersion::V14),
            _ => Err(unsupported()),
        }
    }

    /// Returns the decoder for this version.
    pub fn decoder(self, options: DecodeOptions) -> Decoder {
        match self {
            FormatVersion::V14 => Decoder::new(options),
        }
    }
}

/// Options controlling a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of warnings kept; zero keeps all of them.
    pub max_errors: usize,
    /// Reject primary data files that do not start with the format magic.
    pub require_magic: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_errors: 0,
            require_magic: true,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn with_require_magic(mut self, require_magic: bool) -> Self {
        self.require_magic = require_magic;
        self
    }
}

// =============================================================================
// INPUTS
// =============================================================================

/// A bundle already loaded into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleData {
    pub family_data: Vec<u8>,
    pub signature: Option<Vec<u8>>,
    /// `(file name, bytes)` of side caches, e.g. `("places.cache", ..)`.
    pub caches: Vec<(String, Vec<u8>)>,
    /// `(file name, bytes)` of standalone note files.
    pub note_files: Vec<(String, Vec<u8>)>,
    /// `(member name, change log bytes)`.
    pub members: Vec<(String, Vec<u8>)>,
}

impl BundleData {
    pub fn new(family_data: impl Into<Vec<u8>>) -> Self {
        Self {
            family_data: family_data.into(),
            ..Default::default()
        }
    }

    pub fn with_signature(mut self, signature: impl Into<Vec<u8>>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_cache(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.caches.push((name.into(), data.into()));
        self
    }

    pub fn with_note_file(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.note_files.push((name.into(), data.into()));
        self
    }

    pub fn with_member(mut self, name: impl Into<String>, changes: impl Into<Vec<u8>>) -> Self {
        self.members.push((name.into(), changes.into()));
        self
    }
}

/// Paths of the files making up a bundle, as found by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleFiles {
    pub family_data: PathBuf,
    pub signature: Option<PathBuf>,
    /// Side caches; the file name selects the decoder.
    pub caches: Vec<PathBuf>,
    pub note_files: Vec<PathBuf>,
    /// `(member name, path of its .changes file)`.
    pub members: Vec<(String, PathBuf)>,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// =============================================================================
// DECODER
// =============================================================================

/// Decoder for version 14 bundles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decodes an in-memory bundle.
    pub fn decode(&self, bundle: &BundleData) -> Result<FamilyFile, DecodeError> {
        let diags = Diagnostics::new(self.options.max_errors);
        self.decode_with(bundle, &diags)
    }

    /// Reads and decodes a bundle from disk.
    ///
    /// Failing to read the primary data file is fatal. Any other unreadable
    /// file is skipped with a warning.
    pub fn decode_files(&self, files: &BundleFiles) -> Result<FamilyFile, DecodeError> {
        let family_data = fs::read(&files.family_data).map_err(|source| DecodeError::Io {
            path: files.family_data.clone(),
            source,
        })?;
        let diags = Diagnostics::new(self.options.max_errors);
        let mut bundle = BundleData::new(family_data);

        if let Some(path) = &files.signature {
            bundle.signature = read_side_file(path, SIGNATURE_FILE, &diags);
        }
        for path in &files.caches {
            let name = file_name(path);
            if let Some(data) = read_side_file(path, &name, &diags) {
                bundle.caches.push((name, data));
            }
        }
        for path in &files.note_files {
            if let Some(data) = read_side_file(path, NOTES_FILE, &diags) {
                bundle.note_files.push((file_name(path), data));
            }
        }
        for (name, path) in &files.members {
            if let Some(data) = read_side_file(path, name, &diags) {
                bundle.members.push((name.clone(), data));
            }
        }

        self.decode_with(&bundle, &diags)
    }

    fn decode_with(&self, bundle: &BundleData, diags: &Diagnostics) -> Result<FamilyFile, DecodeError> {
        let data = bundle.family_data.as_slice();
        info!(
            "event=decode module=decoder status=start version={FORMAT_VERSION} bytes={}",
            data.len()
        );
        self.validate(data)?;

        let mut ff = FamilyFile {
            version: FORMAT_VERSION,
            fingerprint: to_hex(Sha256::digest(data).as_slice()),
            ..Default::default()
        };

        match decode_header(data) {
            Ok(header) => ff.header = Some(header),
            Err(e) => {
                diags.add(FAMILY_DATA_FILE, Some(0), "header parse error", Some(&e));
            }
        }
        if let Some(signature) = &bundle.signature {
            ff.signature = lossy(signature).trim().to_string();
        }

        let records = decode_family_data(data, diags);
        ff.persons = records.persons;
        ff.families = records.families;
        ff.places = records.places;
        ff.event_definitions = records.event_definitions;
        ff.sources = records.sources;
        ff.notes = records.notes;
        ff.media_refs = records.media_refs;

        for (name, bytes) in &bundle.caches {
            let Some(kind) = CacheKind::from_file_name(name) else {
                debug!("event=skip_cache module=decoder file={name} reason=unknown");
                continue;
            };
            if let Err(e) = apply_cache(kind, bytes, &mut ff) {
                warn!("event=skip_cache module=decoder file={name} error=\"{e}\"");
                diags.add(name, None, "failed to parse", Some(&e));
            }
        }

        ff.notes.extend(
            bundle
                .note_files
                .iter()
                .map(|(name, bytes)| decode_note_file(name, bytes)),
        );
        ff.members = bundle
            .members
            .iter()
            .map(|(name, bytes)| cache::decode_member(name, bytes))
            .collect();

        ff.warnings = diags.warnings();
        info!(
            "event=decode module=decoder status=ok persons={} families={} places={} notes={} sources={} warnings={}",
            ff.persons.len(),
            ff.families.len(),
            ff.places.len(),
            ff.notes.len(),
            ff.sources.len(),
            ff.warnings.len(),
        );
        Ok(ff)
    }

    fn validate(&self, data: &[u8]) -> Result<(), DecodeError> {
        if data.len() < MIN_FAMILY_DATA_LEN {
            return Err(DecodeError::TooShort {
                len: data.len(),
                min: MIN_FAMILY_DATA_LEN,
            });
        }
        let magic = &data[..FAMILY_DATA_MAGIC.len()];
        if self.options.require_magic && magic != FAMILY_DATA_MAGIC.as_bytes() {
            return Err(DecodeError::InvalidMagic {
                expected: FAMILY_DATA_MAGIC,
                found: lossy(magic),
            });
        }
        Ok(())
    }
}

fn read_side_file(path: &Path, tag: &str, diags: &Diagnostics) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(data) => Some(data),
        Err(source) => {
            let err = CacheError::Io {
                path: path.to_path_buf(),
                source,
            };
            warn!("event=skip_file module=decoder file={tag} error=\"{err}\"");
            diags.add(tag, None, "failed to read", Some(&err));
            None
        }
    }
}

/// Decodes one side cache into its slot of the aggregate.
fn apply_cache(kind: CacheKind, data: &[u8], ff: &mut FamilyFile) -> Result<(), CacheError> {
    match kind {
        CacheKind::Places => {
            let cached = cache::decode_places_cache(data)?;
            let renamed = enrich_place_names(&mut ff.places, &cached);
            debug!(
                "event=enrich module=decoder cached={} places={} renamed={renamed}",
                cached.len(),
                ff.places.len()
            );
        }
        CacheKind::PlaceUsage => ff.place_usages = cache::decode_place_usage(data)?,
        CacheKind::FirstNames => ff.first_names = cache::decode_first_names(data)?,
        CacheKind::Surnames => ff.surnames = cache::decode_surnames(data)?,
        CacheKind::SearchNames => ff.search_names = cache::decode_search_names(data)?,
        CacheKind::Timestamps => ff.timestamps = cache::decode_timestamps(data)?,
        CacheKind::Bookmarks => ff.bookmarks = Some(cache::decode_opaque(data)),
        CacheKind::ColorTags => ff.color_tags = Some(cache::decode_opaque(data)),
        CacheKind::Associations => ff.associations = Some(cache::decode_opaque(data)),
        CacheKind::GlobalRecords => ff.global_records = Some(cache::decode_global_records(data)),
        CacheKind::Find => ff.find_text = cache::decode_find(data),
        CacheKind::Descriptions => ff.description = cache::decode_descriptions(data),
    }
    debug!(
        "event=decode_cache module=decoder file={} bytes={}",
        kind.file_name(),
        data.len()
    );
    Ok(())
}

/// Decodes an in-memory bundle with default options.
pub fn decode_bundle(bundle: &BundleData) -> Result<FamilyFile, DecodeError> {
    Decoder::default().decode(bundle)
}
