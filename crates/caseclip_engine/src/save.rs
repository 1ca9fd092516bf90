use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use caseclip_core::{analyze, derive_filename, metadata_filename, CaseIdExtractor, CaseIds};
use caseclip_logging::{clip_debug, clip_info, clip_warn, get_poll_tick};
use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};

use crate::{CaseFileWriter, SaveError, SaveOutcome, SaveRecord};

/// Injected time source so collision naming and metadata timestamps are
/// deterministic under test.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

pub struct SaveSettings {
    pub output_dir: PathBuf,
    pub auto_create_dir: bool,
    pub max_content_bytes: u64,
    /// Recorded in metadata; content files are always written UTF-8.
    pub file_encoding: String,
    /// The session hash cache is cleared once it reaches this many entries.
    pub dedupe_cap: usize,
    pub clock: Clock,
}

impl SaveSettings {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            auto_create_dir: true,
            max_content_bytes: 10 * 1024 * 1024,
            file_encoding: "utf-8".to_string(),
            dedupe_cap: 100,
            clock: Arc::new(Local::now),
        }
    }
}

/// Extract-and-save pipeline shared by the monitor loop and the synchronous
/// "process now" action. Internally synchronized: the dedupe cache and the
/// write path sit behind one lock, so overlapping callers serialize.
pub struct SaveService {
    extractor: CaseIdExtractor,
    writer: CaseFileWriter,
    settings: SaveSettings,
    seen_hashes: Mutex<HashSet<String>>,
}

impl SaveService {
    pub fn new(settings: SaveSettings) -> Self {
        let writer = CaseFileWriter::new(settings.output_dir.clone(), settings.auto_create_dir);
        Self {
            extractor: CaseIdExtractor::new(),
            writer,
            settings,
            seen_hashes: Mutex::new(HashSet::new()),
        }
    }

    /// Identifiers a snippet would be filed under, without writing anything.
    pub fn extract(&self, text: &str) -> CaseIds {
        self.extractor.extract(text)
    }

    /// Run the full pipeline on one snippet.
    ///
    /// Content without identifiers and already-saved content are `Ok`
    /// outcomes distinct from a save; only directory and write problems are
    /// errors. The duplicate cache records a hash only after its content was
    /// actually written.
    pub fn save(&self, text: &str) -> Result<SaveOutcome, SaveError> {
        let ids = self.extractor.extract(text);
        let Some(filename) = derive_filename(&ids) else {
            clip_debug!("tick {}: no case identifiers in content", get_poll_tick());
            return Ok(SaveOutcome::NoMatch);
        };

        let actual = text.len() as u64;
        if actual > self.settings.max_content_bytes {
            return Err(SaveError::ContentTooLarge {
                max_bytes: self.settings.max_content_bytes,
                actual,
            });
        }

        let content_hash = content_hash(text);

        // One lock spans the dedupe check and the write, so a manual
        // "process now" cannot interleave with the loop's write path.
        let mut seen = match self.seen_hashes.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                clip_warn!("dedupe cache lock poisoned, continuing with recovered data");
                poisoned.into_inner()
            }
        };
        if seen.contains(&content_hash) {
            clip_debug!(
                "tick {}: duplicate content {} skipped",
                get_poll_tick(),
                content_hash
            );
            return Ok(SaveOutcome::DuplicateSkipped { content_hash });
        }

        let now = (self.settings.clock)();
        let stamp = now.format("%Y%m%d_%H%M%S").to_string();
        let path = self.writer.write_new(&filename, text, &stamp)?;

        if seen.len() >= self.settings.dedupe_cap {
            clip_debug!("dedupe cache reached {} entries, clearing", seen.len());
            seen.clear();
        }
        seen.insert(content_hash.clone());
        drop(seen);

        let record = SaveRecord {
            path: path.clone(),
            bytes_written: actual,
            content_hash,
            saved_at: now.to_rfc3339(),
        };
        clip_info!("tick {}: saved {}", get_poll_tick(), path.display());

        self.write_metadata(text, &ids, &record);
        Ok(SaveOutcome::Saved(record))
    }

    /// Best-effort metadata sibling. A failure here is logged and never
    /// rolls back the content write.
    fn write_metadata(&self, text: &str, ids: &CaseIds, record: &SaveRecord) {
        let Some(file_name) = record.path.file_name().and_then(|n| n.to_str()) else {
            return;
        };
        let signals = analyze(text);
        let metadata = serde_json::json!({
            "saved_at": record.saved_at,
            "content_file": file_name,
            "content_hash": record.content_hash,
            "icm_id": ids.icm_id,
            "case_id": ids.case_id,
            "text_length": text.len(),
            "line_count": text.lines().count(),
            "encoding": self.settings.file_encoding,
            "content_type": signals.content_type.as_str(),
            "priority": signals.priority.as_str(),
            "contains_incident": signals.contains_incident,
            "contains_critical": signals.contains_critical,
            "contains_support": signals.contains_support,
        });

        let meta_path = self
            .settings
            .output_dir
            .join(metadata_filename(file_name));
        let payload = match serde_json::to_string_pretty(&metadata) {
            Ok(payload) => payload,
            Err(err) => {
                clip_warn!("failed to serialize metadata for {}: {}", file_name, err);
                return;
            }
        };
        if let Err(err) = fs::write(&meta_path, payload) {
            clip_warn!("failed to write metadata {}: {}", meta_path.display(), err);
        }
    }
}

/// Hex SHA-256 over the exact raw text; keys the duplicate-suppression cache.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(64);
    for byte in digest.iter() {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
