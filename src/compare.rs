use crate::errors::{CompareError, HashError};
use crate::file_ops;
use crate::models::{Algorithm, Comparison, HexDigest, Verdict};
use futures::future::join;
use log::info;
use std::path::{Path, PathBuf};

/// Hash both files with the algorithm named `algorithm` and compare the digests.
pub async fn compare_files(
    first: &Path,
    second: &Path,
    algorithm: &str,
) -> Result<Comparison, CompareError> {
    let algorithm: Algorithm = algorithm.parse().map_err(CompareError::Algorithm)?;
    compare_with(first, second, algorithm).await
}

/// Both files are hashed concurrently on the blocking pool. Any failure
/// yields an error, never a mismatch.
pub async fn compare_with(
    first: &Path,
    second: &Path,
    algorithm: Algorithm,
) -> Result<Comparison, CompareError> {
    let (a, b) = join(
        hash_on_worker(first.to_path_buf(), algorithm),
        hash_on_worker(second.to_path_buf(), algorithm),
    )
    .await;

    let (first_digest, second_digest) = match (a, b) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), Ok(_)) => return Err(CompareError::First(e)),
        (Ok(_), Err(e)) => return Err(CompareError::Second(e)),
        (Err(first), Err(second)) => return Err(CompareError::Both { first, second }),
    };

    let verdict = if first_digest == second_digest {
        Verdict::Match
    } else {
        Verdict::Mismatch
    };
    info!(
        "{} {} vs {}: {:?}",
        algorithm,
        first.display(),
        second.display(),
        verdict
    );

    Ok(Comparison {
        algorithm,
        first: first.to_path_buf(),
        second: second.to_path_buf(),
        first_digest,
        second_digest,
        verdict,
    })
}

async fn hash_on_worker(path: PathBuf, algorithm: Algorithm) -> Result<HexDigest, HashError> {
    file_ops::spawn_digest(path, move |p| file_ops::compute_file_hash(p, algorithm)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::fs;

    fn write(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, data).unwrap();
        p
    }

    #[tokio::test]
    async fn same_path_twice_matches() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.bin", b"some content");

        let cmp = compare_files(&a, &a, "sha256").await.unwrap();
        assert!(cmp.is_match());
        assert_eq!(cmp.first_digest, cmp.second_digest);
    }

    #[tokio::test]
    async fn flipped_byte_mismatches() {
        let dir = tempfile::tempdir().unwrap();
        let data = b"the quick brown fox".to_vec();
        let mut tampered = data.clone();
        tampered[4] ^= 0x01;
        let a = write(dir.path(), "a.txt", &data);
        let b = write(dir.path(), "b.txt", &tampered);

        for algo in Algorithm::all() {
            let cmp = compare_with(&a, &b, *algo).await.unwrap();
            assert_eq!(cmp.verdict, Verdict::Mismatch, "{algo}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn large_copies_match_and_truncation_mismatches() {
        let dir = tempfile::tempdir().unwrap();
        let data: Vec<u8> = (0..10 * 1024 * 1024u32).map(|i| (i % 253) as u8).collect();
        let a = write(dir.path(), "a.bin", &data);
        let b = write(dir.path(), "b.bin", &data);
        let c = write(dir.path(), "c.bin", &data[..data.len() - 1]);

        assert!(compare_files(&a, &b, "sha256").await.unwrap().is_match());
        let cmp = compare_files(&a, &c, "sha256").await.unwrap();
        assert_eq!(cmp.verdict, Verdict::Mismatch);
    }

    #[tokio::test]
    async fn unsupported_algorithm_fails_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        match compare_files(&missing, &missing, "not-a-hash").await {
            Err(CompareError::Algorithm(e)) => assert_eq!(e.kind(), ErrorKind::UnsupportedAlgorithm),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn one_missing_side_is_an_error_not_a_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.txt", b"x");
        let missing = dir.path().join("gone.txt");

        match compare_files(&a, &missing, "md5").await {
            Err(CompareError::Second(e)) => assert_eq!(e.kind(), ErrorKind::FileNotFound),
            other => panic!("unexpected: {other:?}"),
        }
        match compare_files(&missing, &a, "md5").await {
            Err(CompareError::First(e)) => assert_eq!(e.kind(), ErrorKind::FileNotFound),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn both_missing_reports_both() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");

        let err = compare_files(&a, &b, "sha256").await.unwrap_err();
        assert!(matches!(err, CompareError::Both { .. }));
        assert_eq!(err.errors().len(), 2);
    }
}
