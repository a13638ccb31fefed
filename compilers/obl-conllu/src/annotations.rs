use std::io::BufRead;

use obl_protocol::AnnotationRecord;

use crate::error::AnnotationError;

/// Reads a JSON Lines file of tagger output, one record per sentence.
/// Blank lines are skipped; fields other than `tokens` and `tags` are ignored.
pub fn read_annotations<R: BufRead>(reader: R) -> Result<Vec<AnnotationRecord>, AnnotationError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .map_err(|source| AnnotationError::Json { line: idx + 1, source })?;
        records.push(record);
    }
    tracing::debug!("Read {} annotation records", records.len());
    Ok(records)
}
