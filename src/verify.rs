//! Local dist file verification against published digests.

use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::domain::{ArtifactDescriptor, ArtifactPair};
use crate::error::{AnnounceError, Result};

/// Compute the lowercase hex SHA-256 digest of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Check that `dist_dir` holds a file matching `artifact`.
///
/// # Errors
/// `MissingFile` when `dist_dir/<filename>` is not a regular file,
/// `VerificationMismatch` when its SHA-256 differs from the published one.
pub fn verify(artifact: &ArtifactDescriptor, dist_dir: &Path) -> Result<()> {
    let path = dist_dir.join(&artifact.filename);
    if !path.is_file() {
        return Err(AnnounceError::MissingFile {
            filename: artifact.filename.clone(),
        });
    }

    let actual = sha256_file(&path)?;
    if !actual.eq_ignore_ascii_case(artifact.digests.sha256.trim()) {
        tracing::debug!(
            path = %path.display(),
            expected = %artifact.digests.sha256,
            %actual,
            "digest mismatch"
        );
        return Err(AnnounceError::VerificationMismatch {
            path,
            url: artifact.url.clone(),
        });
    }

    tracing::debug!(path = %path.display(), "verified");
    Ok(())
}

/// Verify every artifact of a release in declared order, stopping at the first failure.
pub fn verify_all(artifacts: &ArtifactPair, dist_dir: &Path) -> Result<()> {
    for artifact in artifacts.iter() {
        verify(artifact, dist_dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::fixtures;
    use tempfile::TempDir;

    // SHA-256 of the ASCII bytes "hello world"
    const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn dist_with(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_sha256_file() {
        let dir = dist_with(&[("hello.txt", "hello world")]);
        assert_eq!(sha256_file(&dir.path().join("hello.txt")).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn test_verify_matching_file() {
        let dir = dist_with(&[("ansible-9.0.0.tar.gz", "hello world")]);
        let artifact = fixtures::descriptor("ansible-9.0.0.tar.gz", "sdist", HELLO_SHA256);
        assert!(verify(&artifact, dir.path()).is_ok());
    }

    #[test]
    fn test_verify_digest_is_case_insensitive() {
        let dir = dist_with(&[("ansible-9.0.0.tar.gz", "hello world")]);
        let artifact = fixtures::descriptor(
            "ansible-9.0.0.tar.gz",
            "sdist",
            &HELLO_SHA256.to_uppercase(),
        );
        assert!(verify(&artifact, dir.path()).is_ok());
    }

    #[test]
    fn test_verify_missing_file() {
        let dir = dist_with(&[]);
        let artifact = fixtures::descriptor("ansible-9.0.0.tar.gz", "sdist", HELLO_SHA256);
        let err = verify(&artifact, dir.path()).unwrap_err();
        assert!(matches!(err, AnnounceError::MissingFile { ref filename } if filename == "ansible-9.0.0.tar.gz"));
    }

    #[test]
    fn test_verify_directory_in_place_of_file() {
        let dir = dist_with(&[]);
        fs::create_dir(dir.path().join("ansible-9.0.0.tar.gz")).unwrap();
        let artifact = fixtures::descriptor("ansible-9.0.0.tar.gz", "sdist", HELLO_SHA256);
        assert!(matches!(
            verify(&artifact, dir.path()).unwrap_err(),
            AnnounceError::MissingFile { .. }
        ));
    }

    #[test]
    fn test_verify_mismatch() {
        let dir = dist_with(&[("ansible-9.0.0.tar.gz", "tampered")]);
        let artifact = fixtures::descriptor("ansible-9.0.0.tar.gz", "sdist", HELLO_SHA256);
        let err = verify(&artifact, dir.path()).unwrap_err();
        assert!(matches!(err, AnnounceError::VerificationMismatch { .. }));
        assert!(err.to_string().contains(&artifact.url));
    }

    #[test]
    fn test_verify_all_reports_first_failure_in_order() {
        // Both files are missing; the sdist is declared first.
        let dir = dist_with(&[]);
        let pair = fixtures::pair("9.0.0");
        let err = verify_all(&pair, dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "ansible-9.0.0.tar.gz was not found in --dist-dir");
    }

    #[test]
    fn test_verify_all_checks_wheel_after_sdist() {
        let dir = dist_with(&[("ansible-9.0.0.tar.gz", "hello world")]);
        let mut pair = fixtures::pair("9.0.0");
        pair.sdist.digests.sha256 = HELLO_SHA256.to_string();
        let err = verify_all(&pair, dir.path()).unwrap_err();
        assert!(err.to_string().contains("ansible-9.0.0-py3-none-any.whl"));
    }

    #[test]
    fn test_verify_all_success() {
        let dir = dist_with(&[
            ("ansible-9.0.0.tar.gz", "hello world"),
            ("ansible-9.0.0-py3-none-any.whl", "hello world"),
        ]);
        let mut pair = fixtures::pair("9.0.0");
        pair.sdist.digests.sha256 = HELLO_SHA256.to_string();
        pair.wheel.digests.sha256 = HELLO_SHA256.to_string();
        assert!(verify_all(&pair, dir.path()).is_ok());
    }
}
