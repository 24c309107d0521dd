use crate::errors::HashError;
use crate::hashers::{self, DEFAULT_CHUNK_SIZE};
use crate::models::{Algorithm, HexDigest};
use log::debug;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tokio::task;

/// Hash the file at `path` with the algorithm named `algorithm`.
pub fn compute_digest(path: &Path, algorithm: &str) -> Result<HexDigest, HashError> {
    let algorithm: Algorithm = algorithm.parse()?;
    compute_file_hash(path, algorithm)
}

/// Compute hash of the file at path using streaming read.
/// This is synchronous; call it inside a spawned blocking task from async code.
pub fn compute_file_hash(path: &Path, algo: Algorithm) -> Result<HexDigest, HashError> {
    compute_file_hash_chunked(path, algo, DEFAULT_CHUNK_SIZE)
}

/// Run a digest job for `path` on the blocking pool. A job that panics or
/// is cancelled is reported as a read failure for `path`.
pub async fn spawn_digest<F>(path: PathBuf, job: F) -> Result<HexDigest, HashError>
where
    F: FnOnce(&Path) -> Result<HexDigest, HashError> + Send + 'static,
{
    let worker_path = path.clone();
    match task::spawn_blocking(move || job(&worker_path)).await {
        Ok(result) => result,
        Err(e) => Err(HashError::read(&path, io::Error::other(e))),
    }
}

/// Same as [`compute_file_hash`] with an explicit read size.
/// The file handle is closed when this returns, on success or error.
pub fn compute_file_hash_chunked(
    path: &Path,
    algo: Algorithm,
    chunk_size: usize,
) -> Result<HexDigest, HashError> {
    let f = File::open(path).map_err(|e| HashError::open(path, e))?;
    let hashed = hashers::compute_hash_for_reader(f, algo, chunk_size)
        .map_err(|e| HashError::read(path, e))?;
    debug_assert_eq!(hashed.hex.len(), algo.hex_len());
    debug!(
        "{} {} ({} bytes): {}",
        algo,
        path.display(),
        hashed.bytes,
        hashed.hex
    );
    Ok(HexDigest::new(algo, hashed.hex))
}
