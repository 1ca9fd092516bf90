use crate::CaseIds;

/// Derive the output filename from extracted identifiers.
///
/// First matching rule wins:
/// 1. both present -> `{icm}_{case}.txt`
/// 2. only ICM     -> `ICM_{icm}.txt`
/// 3. only case    -> `Case_{case}.txt`
/// 4. neither      -> `None` (no file; a no-op, not an error)
pub fn derive_filename(ids: &CaseIds) -> Option<String> {
    match (&ids.icm_id, &ids.case_id) {
        (Some(icm), Some(case)) => Some(format!("{icm}_{case}.txt")),
        (Some(icm), None) => Some(format!("ICM_{icm}.txt")),
        (None, Some(case)) => Some(format!("Case_{case}.txt")),
        (None, None) => None,
    }
}

/// Insert a `_{stamp}` suffix before the extension, used when the target
/// name already exists on disk. `stamp` is expected to be `YYYYMMDD_HHMMSS`.
pub fn timestamped_variant(filename: &str, stamp: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{stamp}.{ext}"),
        None => format!("{filename}_{stamp}"),
    }
}

/// Name of the sibling metadata file for a content file.
pub fn metadata_filename(filename: &str) -> String {
    let stem = filename.strip_suffix(".txt").unwrap_or(filename);
    format!("{stem}_metadata.json")
}
