//! Serialized score-artifact codec.
//!
//! A score artifact is a gzip-compressed postcard stream of wire records.
//! Embedded strings travel as raw bytes under the producing pipeline's
//! legacy single-byte (Latin-1) text convention; the decode happens here,
//! at the wire boundary, so table-building code only ever sees `String`.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

use crate::core::ScoreRecord;
use crate::io::writer::create_output;

/// On-disk form of one score record.
#[derive(Serialize, Deserialize)]
struct WireScoreRecord {
    file_path: Vec<u8>,
    line: u32,
    score_min: f64,
    score_mean: f64,
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("compressed body could not be read: {0}")]
    Body(#[from] std::io::Error),
    #[error("record stream is malformed: {0}")]
    Records(#[from] postcard::Error),
    #[error("string is not representable in the legacy encoding: {0:?}")]
    Unencodable(String),
}

/// Latin-1 maps each byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn encode_latin1(text: &str) -> Result<Vec<u8>, ArtifactError> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).map_err(|_| ArtifactError::Unencodable(text.to_string())))
        .collect()
}

fn decode_body(compressed: &[u8]) -> Result<Vec<ScoreRecord>, ArtifactError> {
    let mut body = Vec::new();
    GzDecoder::new(compressed).read_to_end(&mut body)?;

    let wire: Vec<WireScoreRecord> = postcard::from_bytes(&body)?;
    Ok(wire
        .into_iter()
        .map(|record| ScoreRecord {
            file_path: decode_latin1(&record.file_path),
            line: record.line,
            score_min: record.score_min,
            score_mean: record.score_mean,
        })
        .collect())
}

fn encode_body(records: &[ScoreRecord]) -> Result<Vec<u8>, ArtifactError> {
    let wire: Vec<WireScoreRecord> = records
        .iter()
        .map(|record| {
            Ok(WireScoreRecord {
                file_path: encode_latin1(&record.file_path)?,
                line: record.line,
                score_min: record.score_min,
                score_mean: record.score_mean,
            })
        })
        .collect::<Result<_, ArtifactError>>()?;
    Ok(postcard::to_allocvec(&wire)?)
}

/// Load a score artifact in full. Any decode failure is fatal to the
/// reporting run; there is no partial-report fallback.
pub fn read_score_artifact(path: &Path) -> Result<Vec<ScoreRecord>> {
    let compressed = std::fs::read(path)
        .with_context(|| format!("failed to read score artifact: {}", path.display()))?;
    decode_body(&compressed)
        .with_context(|| format!("failed to decode score artifact: {}", path.display()))
}

/// Write a score artifact in the format `read_score_artifact` consumes.
/// Used by fixture generation and downstream tooling.
pub fn write_score_artifact(path: &Path, records: &[ScoreRecord]) -> Result<()> {
    let body = encode_body(records)
        .with_context(|| format!("failed to encode score artifact: {}", path.display()))?;

    let writer = create_output(path)?;
    let mut encoder = GzEncoder::new(writer, Compression::default());
    encoder
        .write_all(&body)
        .with_context(|| format!("failed to write score artifact: {}", path.display()))?;
    let mut inner = encoder
        .finish()
        .with_context(|| format!("failed to finish score artifact: {}", path.display()))?;
    inner
        .flush()
        .with_context(|| format!("failed to flush score artifact: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Vec<ScoreRecord> {
        vec![
            ScoreRecord {
                file_path: "src/widgets.py".to_string(),
                line: 17,
                score_min: 0.91,
                score_mean: 1.34,
            },
            ScoreRecord {
                file_path: "src/gadgets.py".to_string(),
                line: 3,
                score_min: 0.12,
                score_mean: 0.55,
            },
        ]
    }

    #[test]
    fn round_trips_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.bin");

        write_score_artifact(&path, &sample()).unwrap();
        let loaded = read_score_artifact(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn high_latin1_bytes_decode_to_matching_code_points() {
        // 0xE9 is 'é' in Latin-1.
        assert_eq!(decode_latin1(&[0x73, 0x72, 0x63, 0x2F, 0xE9]), "src/é");
        assert_eq!(encode_latin1("src/é").unwrap(), vec![0x73, 0x72, 0x63, 0x2F, 0xE9]);
    }

    #[test]
    fn non_latin1_strings_are_rejected_on_write() {
        let err = encode_latin1("src/日本語.py").unwrap_err();
        assert!(matches!(err, ArtifactError::Unencodable(_)));
    }

    #[test]
    fn garbage_artifact_is_a_decode_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.bin");
        std::fs::write(&path, b"definitely not gzip").unwrap();

        let err = read_score_artifact(&path).unwrap_err();
        assert!(err.to_string().contains("failed to decode"));
    }

    #[test]
    fn truncated_artifact_is_a_decode_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.bin");
        write_score_artifact(&path, &sample()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        assert!(read_score_artifact(&path).is_err());
    }

    #[test]
    fn missing_artifact_is_fatal() {
        let err = read_score_artifact(Path::new("/nonexistent/scores.bin")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
