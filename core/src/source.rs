//! Contract source
//!
//! Opaque Solidity text plus the heuristic pre-submission check: an SPDX
//! license line and a `pragma solidity` directive must both be present.
//! Nothing here parses Solidity.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// File extensions accepted by `ContractSource::from_file`
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["sol", "txt"];

static SPDX_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//\s*SPDX-License-Identifier:\s*[^\s]+").expect("SPDX pattern is valid")
});

static PRAGMA_SOLIDITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"pragma\s+solidity\s+[^;]+;").expect("pragma pattern is valid")
});

/// Pre-submission check failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Contract source is empty")]
    Empty,

    #[error("The provided code does not appear to be a valid Solidity smart contract: missing SPDX license identifier")]
    MissingLicense,

    #[error("The provided code does not appear to be a valid Solidity smart contract: missing 'pragma solidity' directive")]
    MissingPragma,
}

/// File import errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Unsupported file type: {} (expected .sol or .txt)", .path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Contract text as submitted by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractSource {
    text: String,
}

impl ContractSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a `.sol` or `.txt` file
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|allowed| ext.eq_ignore_ascii_case(allowed))
            })
            .unwrap_or(false);

        if !accepted {
            return Err(SourceError::UnsupportedExtension {
                path: path.to_path_buf(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded contract source");
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Heuristic Solidity check run before any model call
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::Empty);
        }
        if !SPDX_LINE.is_match(&self.text) {
            return Err(ValidationError::MissingLicense);
        }
        if !PRAGMA_SOLIDITY.is_match(&self.text) {
            return Err(ValidationError::MissingPragma);
        }
        Ok(())
    }
}

impl From<String> for ContractSource {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for ContractSource {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for ContractSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const VALID: &str = "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.20;\n\ncontract Vault {}\n";

    #[test]
    fn test_validate_accepts_spdx_and_pragma() {
        assert_eq!(ContractSource::new(VALID).validate(), Ok(()));
    }

    #[test]
    fn test_validate_spdx_without_space() {
        let src = ContractSource::new("//SPDX-License-Identifier:GPL-3.0\npragma solidity >=0.7.0 <0.9.0;");
        assert_eq!(src.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_missing_license() {
        let src = ContractSource::new("pragma solidity ^0.8.0;\ncontract A {}");
        assert_eq!(src.validate(), Err(ValidationError::MissingLicense));
    }

    #[test]
    fn test_validate_rejects_missing_pragma() {
        let src = ContractSource::new("// SPDX-License-Identifier: MIT\ncontract A {}");
        assert_eq!(src.validate(), Err(ValidationError::MissingPragma));
    }

    #[test]
    fn test_validate_rejects_unterminated_pragma() {
        let src = ContractSource::new("// SPDX-License-Identifier: MIT\npragma solidity ^0.8.0\n");
        assert_eq!(src.validate(), Err(ValidationError::MissingPragma));
    }

    #[test]
    fn test_validate_rejects_blank() {
        assert_eq!(ContractSource::new("  \n").validate(), Err(ValidationError::Empty));
    }

    #[test]
    fn test_from_file_reads_sol_and_txt() {
        let dir = TempDir::new().unwrap();
        for name in ["Vault.sol", "vault.TXT"] {
            let path = dir.path().join(name);
            std::fs::File::create(&path)
                .unwrap()
                .write_all(VALID.as_bytes())
                .unwrap();
            let src = ContractSource::from_file(&path).unwrap();
            assert_eq!(src.as_str(), VALID);
        }
    }

    #[test]
    fn test_from_file_rejects_other_extensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Vault.js");
        std::fs::write(&path, VALID).unwrap();
        let err = ContractSource::from_file(&path).unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedExtension { .. }));
    }

    #[test]
    fn test_from_file_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ContractSource::from_file(&dir.path().join("absent.sol")).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().contains("absent.sol"));
    }
}
