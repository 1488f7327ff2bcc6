use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Load a JSON document, or `T::default()` when the file does not exist yet.
pub fn load_document<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "document missing, using default");
        return Ok(T::default());
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a JSON document in full.
///
/// The content goes to a sibling temp file first and is renamed over the
/// target, so readers never see a half-written document.
pub fn save_document<T, P>(path: P, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    tracing::debug!(path = %path.display(), "document saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_missing_document_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded: Vec<String> = load_document(dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("names.json");

        save_document(&path, &vec!["rice".to_string(), "tofu".to_string()]).unwrap();
        let loaded: Vec<String> = load_document(&path).unwrap();
        assert_eq!(loaded, vec!["rice", "tofu"]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let loaded: Result<Vec<String>> = load_document(file.path());
        assert!(loaded.is_err());
    }
}
