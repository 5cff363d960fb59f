use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// On-disk format version written by this crate
pub const FORMAT_VERSION: u32 = 1;

fn default_version() -> u32 {
    FORMAT_VERSION
}

/// Ordered pair of language codes: the learned language, then the meaning language
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair(pub String, pub String);

impl LanguagePair {
    pub fn new(original: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self(original.into(), meaning.into())
    }

    pub fn original(&self) -> &str {
        &self.0
    }

    pub fn meaning(&self) -> &str {
        &self.1
    }
}

/// Persisted dictionary document.
///
/// Stored as gzip-compressed JSON with exactly `languages`, `index` and `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryFile {
    pub languages: LanguagePair,
    pub index: BTreeMap<String, String>,
    #[serde(default = "default_version")]
    pub version: u32,
}

impl DictionaryFile {
    /// Empty document for a language pair
    pub fn new(languages: LanguagePair) -> Self {
        Self {
            languages,
            index: BTreeMap::new(),
            version: FORMAT_VERSION,
        }
    }

    /// Read and validate a dictionary file
    pub fn read_from(path: &Path) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
            _ => StoreError::io(path, e),
        })?;

        let mut json = String::new();
        GzDecoder::new(BufReader::new(file))
            .read_to_string(&mut json)
            .map_err(|e| StoreError::format(path, format!("cannot decompress: {e}")))?;

        let document = Self::from_json(&json).map_err(|reason| StoreError::format(path, reason))?;
        tracing::info!(
            "Loaded {} entries ({} -> {}) from {}",
            document.index.len(),
            document.languages.original(),
            document.languages.meaning(),
            path.display()
        );
        Ok(document)
    }

    /// Parse the JSON payload, rejecting unknown versions
    pub fn from_json(json: &str) -> Result<Self, String> {
        let document: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        if document.version != FORMAT_VERSION {
            return Err(format!("unsupported version {}", document.version));
        }
        Ok(document)
    }

    /// Write the document, replacing the target only once the data is fully on disk
    pub fn write_to(&self, path: &Path) -> StoreResult<()> {
        let temp_path = temp_path_for(path);

        self.write_compressed(&temp_path)
            .map_err(|e| StoreError::io(&temp_path, e))?;

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StoreError::io(path, e)
        })?;

        tracing::info!("Saved {} entries to {}", self.index.len(), path.display());
        Ok(())
    }

    fn write_compressed(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        serde_json::to_writer_pretty(&mut encoder, self)?;
        let mut writer = encoder.finish()?;
        writer.flush()?;
        writer.get_ref().sync_all()
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write a fresh, empty dictionary for the language pair
pub fn create(path: &Path, languages: LanguagePair) -> StoreResult<()> {
    tracing::info!(
        "Creating dictionary {} for {} -> {}",
        path.display(),
        languages.original(),
        languages.meaning()
    );
    DictionaryFile::new(languages).write_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_create_writes_empty_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words");

        create(&path, LanguagePair::new("cz", "en")).unwrap();

        let document = DictionaryFile::read_from(&path).unwrap();
        assert_eq!(document.languages, LanguagePair::new("cz", "en"));
        assert!(document.index.is_empty());
        assert_eq!(document.version, FORMAT_VERSION);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_file_is_gzipped_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words");
        let mut document = DictionaryFile::new(LanguagePair::new("cz", "en"));
        document.index.insert("auto".into(), "car".into());
        document.write_to(&path).unwrap();

        let mut json = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["languages"], serde_json::json!(["cz", "en"]));
        assert_eq!(value["index"], serde_json::json!({"auto": "car"}));
        assert_eq!(value["version"], serde_json::json!(1));
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = DictionaryFile::read_from(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_not_gzip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain");
        fs::write(&path, br#"{"languages": ["a", "b"], "index": {}, "version": 1}"#).unwrap();

        let err = DictionaryFile::read_from(&path).unwrap_err();
        assert!(matches!(err, StoreError::Format { .. }));
    }

    #[test]
    fn test_rejects_missing_fields() {
        let dir = tempdir().unwrap();
        for payload in [
            r#"{"index": {}, "version": 1}"#,
            r#"{"languages": ["a", "b"], "version": 1}"#,
            r#"{"languages": ["a"], "index": {}, "version": 1}"#,
            r#"{"languages": ["a", "b", "c"], "index": {}, "version": 1}"#,
            r#"{"languages": ["a", "b"], "index": {"w": 1}, "version": 1}"#,
            r#"{"languages": ["a", "b"], "index": {}, "version": 2}"#,
            r#"[]"#,
        ] {
            let path = dir.path().join("bad");
            fs::write(&path, gzip(payload.as_bytes())).unwrap();
            let err = DictionaryFile::read_from(&path).unwrap_err();
            assert!(
                matches!(err, StoreError::Format { .. }),
                "payload should be rejected: {payload}"
            );
        }
    }

    #[test]
    fn test_version_defaults_when_absent() {
        let document = DictionaryFile::from_json(r#"{"languages": ["a", "b"], "index": {}}"#).unwrap();
        assert_eq!(document.version, FORMAT_VERSION);
    }

    #[test]
    fn test_create_in_missing_directory_fails_with_io() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("words");
        let err = create(&path, LanguagePair::new("cz", "en")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
