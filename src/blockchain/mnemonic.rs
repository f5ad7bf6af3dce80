//! Secret phrase resolution.
//!
//! # Security
//! - The resolved phrase is returned to the caller and never logged
//! - File contents are used verbatim, including any trailing newline

use std::fs;
use std::path::Path;

use crate::blockchain::types::MnemonicError;
use crate::config::schema::{MnemonicDirective, MnemonicMethod};

/// Resolve a validated directive to the secret phrase.
pub fn resolve_mnemonic(directive: &MnemonicDirective) -> Result<String, MnemonicError> {
    match directive.method {
        MnemonicMethod::Raw => Ok(directive.value.clone()),
        MnemonicMethod::File => read_mnemonic_file(Path::new(&directive.value)),
    }
}

fn read_mnemonic_file(path: &Path) -> Result<String, MnemonicError> {
    if !path.exists() {
        return Err(MnemonicError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = fs::metadata(path).map_err(|source| MnemonicError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(MnemonicError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let phrase = fs::read_to_string(path).map_err(|source| MnemonicError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "Mnemonic read from file");
    Ok(phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(method: MnemonicMethod, value: &str) -> MnemonicDirective {
        MnemonicDirective {
            method,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_raw_is_returned_unchanged() {
        let phrase = resolve_mnemonic(&directive(MnemonicMethod::Raw, "  word1 word2 ")).unwrap();
        assert_eq!(phrase, "  word1 word2 ");
    }

    #[test]
    fn test_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = resolve_mnemonic(&directive(MnemonicMethod::File, path.to_str().unwrap())).unwrap_err();
        assert!(matches!(err, MnemonicError::FileNotFound { path: p } if p == path));
    }

    #[test]
    fn test_file_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_mnemonic(&directive(MnemonicMethod::File, dir.path().to_str().unwrap())).unwrap_err();
        assert!(matches!(err, MnemonicError::NotAFile { .. }));
    }

    #[test]
    fn test_file_contents_are_not_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phrase.txt");
        let phrase = "test test test test test test test test test test test junk\n";
        fs::write(&path, phrase).unwrap();

        let resolved = resolve_mnemonic(&directive(MnemonicMethod::File, path.to_str().unwrap())).unwrap();
        assert_eq!(resolved, phrase);
    }
}
