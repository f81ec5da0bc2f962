mod atomic_io;
mod hashing;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::level::Level;

use self::atomic_io::write_text_atomic;
use self::hashing::level_fingerprint;

pub const LEVEL_DOCUMENT_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, Deserialize, Serialize)]
struct LevelDocumentV1 {
    format_version: u16,
    fingerprint_sha256_hex: String,
    level: Level,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read/write level document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode level document {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse level document {path} at {field_path}: {source}")]
    Parse {
        path: PathBuf,
        field_path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("level document {path} has format version {found}, expected {expected}")]
    VersionMismatch {
        path: PathBuf,
        expected: u16,
        found: u16,
    },
    #[error("level document {path} fingerprint mismatch: stored {stored}, computed {computed}")]
    FingerprintMismatch {
        path: PathBuf,
        stored: String,
        computed: String,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    pub pretty: bool,
}

pub fn save_level(path: &Path, level: &Level, options: SaveOptions) -> Result<(), DocumentError> {
    let encode_err = |source| DocumentError::Encode {
        path: path.to_path_buf(),
        source,
    };
    let document = LevelDocumentV1 {
        format_version: LEVEL_DOCUMENT_FORMAT_VERSION,
        fingerprint_sha256_hex: level_fingerprint(level).map_err(encode_err)?,
        level: level.clone(),
    };
    let text = if options.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .map_err(encode_err)?;
    write_text_atomic(path, &text).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        objects = level.object_count(),
        color_channels = level.colors().materialized_count(),
        fingerprint = %document.fingerprint_sha256_hex,
        "level_document_saved"
    );
    Ok(())
}

pub fn load_level(path: &Path) -> Result<Level, DocumentError> {
    let raw = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_document(path, &raw)?;
    if document.format_version != LEVEL_DOCUMENT_FORMAT_VERSION {
        return Err(DocumentError::VersionMismatch {
            path: path.to_path_buf(),
            expected: LEVEL_DOCUMENT_FORMAT_VERSION,
            found: document.format_version,
        });
    }
    let computed = level_fingerprint(&document.level).map_err(|source| DocumentError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    if computed != document.fingerprint_sha256_hex {
        return Err(DocumentError::FingerprintMismatch {
            path: path.to_path_buf(),
            stored: document.fingerprint_sha256_hex,
            computed,
        });
    }
    info!(
        path = %path.display(),
        objects = document.level.object_count(),
        color_channels = document.level.colors().materialized_count(),
        "level_document_loaded"
    );
    Ok(document.level)
}

fn parse_document(path: &Path, raw: &str) -> Result<LevelDocumentV1, DocumentError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, LevelDocumentV1>(&mut deserializer).map_err(|error| {
        let field_path = error.path().to_string();
        DocumentError::Parse {
            path: path.to_path_buf(),
            field_path,
            source: error.into_inner(),
        }
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::level::{ColorChannel, LevelObject, ObjectData};

    fn sample_level() -> Level {
        let mut level = Level::new("doc");
        level.add_objects([
            LevelObject::new(1, ObjectData::general(3, 4)).with_groups([1, 2]),
            LevelObject::new(899, ObjectData::color_trigger(3, 4)).with_position(30.0, 15.0),
        ]);
        level
            .colors_mut()
            .insert(3, ColorChannel::copying(4))
            .expect("insert");
        level
    }

    #[test]
    fn save_then_load_returns_the_same_level() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("level.json");
        let level = sample_level();
        save_level(&path, &level, SaveOptions { pretty: true }).expect("save");
        assert_eq!(load_level(&path).expect("load"), level);
    }

    #[test]
    fn edited_document_fails_fingerprint_check() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("level.json");
        save_level(&path, &sample_level(), SaveOptions::default()).expect("save");
        let raw = fs::read_to_string(&path).expect("read");
        fs::write(&path, raw.replace("\"name\":\"doc\"", "\"name\":\"tampered\"")).expect("write");

        let error = load_level(&path).expect_err("tampered");
        assert!(matches!(error, DocumentError::FingerprintMismatch { .. }));
    }

    #[test]
    fn version_mismatch_is_reported() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("level.json");
        save_level(&path, &sample_level(), SaveOptions::default()).expect("save");
        let raw = fs::read_to_string(&path).expect("read");
        fs::write(&path, raw.replace("\"format_version\":1", "\"format_version\":9")).expect("write");

        let error = load_level(&path).expect_err("version");
        assert!(matches!(
            error,
            DocumentError::VersionMismatch {
                expected: 1,
                found: 9,
                ..
            }
        ));
    }

    #[test]
    fn parse_errors_name_the_offending_field() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("level.json");
        fs::write(
            &path,
            r#"{"format_version":1,"fingerprint_sha256_hex":"x","level":{"name":"a","objects":[{"object_id":"one","x":0,"y":0,"data":{"type":"General","main_color_id":0,"detail_color_id":0}}]}}"#,
        )
        .expect("write");

        match load_level(&path).expect_err("bad field") {
            DocumentError::Parse { field_path, .. } => {
                assert_eq!(field_path, "level.objects[0].object_id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
