use crate::errors::HashError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

/// The supported hash functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    #[serde(rename = "blake2b")]
    Blake2b512,
    #[serde(rename = "blake2s")]
    Blake2s256,
    Blake3,
}

impl Algorithm {
    const ALL: [Algorithm; 15] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Sha512_224,
        Algorithm::Sha512_256,
        Algorithm::Sha3_224,
        Algorithm::Sha3_256,
        Algorithm::Sha3_384,
        Algorithm::Sha3_512,
        Algorithm::Blake2b512,
        Algorithm::Blake2s256,
        Algorithm::Blake3,
    ];

    pub fn all() -> &'static [Algorithm] {
        &Self::ALL
    }

    /// Canonical lowercase name, as accepted at the prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha224 => "sha224",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
            Algorithm::Sha512_224 => "sha512_224",
            Algorithm::Sha512_256 => "sha512_256",
            Algorithm::Sha3_224 => "sha3_224",
            Algorithm::Sha3_256 => "sha3_256",
            Algorithm::Sha3_384 => "sha3_384",
            Algorithm::Sha3_512 => "sha3_512",
            Algorithm::Blake2b512 => "blake2b",
            Algorithm::Blake2s256 => "blake2s",
            Algorithm::Blake3 => "blake3",
        }
    }

    /// Uppercased name used to label digests in console output.
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha224 => "SHA224",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha384 => "SHA384",
            Algorithm::Sha512 => "SHA512",
            Algorithm::Sha512_224 => "SHA512_224",
            Algorithm::Sha512_256 => "SHA512_256",
            Algorithm::Sha3_224 => "SHA3_224",
            Algorithm::Sha3_256 => "SHA3_256",
            Algorithm::Sha3_384 => "SHA3_384",
            Algorithm::Sha3_512 => "SHA3_512",
            Algorithm::Blake2b512 => "BLAKE2B",
            Algorithm::Blake2s256 => "BLAKE2S",
            Algorithm::Blake3 => "BLAKE3",
        }
    }

    /// Length of the hex encoded digest.
    pub fn hex_len(&self) -> usize {
        match self {
            Algorithm::Md5 => 32,
            Algorithm::Sha1 => 40,
            Algorithm::Sha224 | Algorithm::Sha512_224 | Algorithm::Sha3_224 => 56,
            Algorithm::Sha256
            | Algorithm::Sha512_256
            | Algorithm::Sha3_256
            | Algorithm::Blake2s256
            | Algorithm::Blake3 => 64,
            Algorithm::Sha384 | Algorithm::Sha3_384 => 96,
            Algorithm::Sha512 | Algorithm::Sha3_512 | Algorithm::Blake2b512 => 128,
        }
    }

    /// Comma separated list of every accepted name.
    pub fn supported_names() -> String {
        Self::all()
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = HashError;

    /// Case-insensitive; `-` and `_` are interchangeable, so `SHA-256`,
    /// `sha256` and `sha3-256` all resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut key = s.trim().to_ascii_lowercase().replace('-', "_");
        if let Some(rest) = key.strip_prefix("sha_") {
            key = format!("sha{rest}");
        }
        match key.as_str() {
            "blake2b512" | "blake2b_512" => key = "blake2b".to_string(),
            "blake2s256" | "blake2s_256" => key = "blake2s".to_string(),
            _ => {}
        }
        Self::all()
            .iter()
            .copied()
            .find(|a| a.as_str() == key)
            .ok_or_else(|| HashError::UnsupportedAlgorithm {
                name: s.trim().to_string(),
            })
    }
}

/// Lowercase hex output of one algorithm over one byte stream.
///
/// Two digests are equal only when both the algorithm and the hex string
/// match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexDigest {
    algorithm: Algorithm,
    hex: String,
}

impl HexDigest {
    pub(crate) fn new(algorithm: Algorithm, hex: String) -> Self {
        HexDigest { algorithm, hex }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn as_str(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Match,
    Mismatch,
}

/// Outcome of hashing two files with the same algorithm.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub algorithm: Algorithm,
    pub first: PathBuf,
    pub second: PathBuf,
    pub first_digest: HexDigest,
    pub second_digest: HexDigest,
    pub verdict: Verdict,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.verdict == Verdict::Match
    }
}

/// One successful check made during the current session. Kept in memory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub file_name: String,
    pub file_path: PathBuf,
    pub algorithm: Algorithm,
    pub computed_hash: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub other_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub other_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verdict: Option<Verdict>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

impl SessionRecord {
    pub fn digest(path: &Path, digest: &HexDigest) -> Self {
        SessionRecord {
            id: Uuid::new_v4(),
            file_name: file_name(path),
            file_path: path.to_path_buf(),
            algorithm: digest.algorithm(),
            computed_hash: digest.as_str().to_string(),
            other_path: None,
            other_hash: None,
            verdict: None,
            timestamp: Utc::now(),
        }
    }

    pub fn comparison(cmp: &Comparison) -> Self {
        SessionRecord {
            id: Uuid::new_v4(),
            file_name: file_name(&cmp.first),
            file_path: cmp.first.clone(),
            algorithm: cmp.algorithm,
            computed_hash: cmp.first_digest.as_str().to_string(),
            other_path: Some(cmp.second.clone()),
            other_hash: Some(cmp.second_digest.as_str().to_string()),
            verdict: Some(cmp.verdict),
            timestamp: Utc::now(),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_loosely() {
        assert_eq!("sha256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
        assert_eq!("SHA-256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
        assert_eq!(" MD5 ".parse::<Algorithm>().unwrap(), Algorithm::Md5);
        assert_eq!("sha3-512".parse::<Algorithm>().unwrap(), Algorithm::Sha3_512);
        assert_eq!("Blake3".parse::<Algorithm>().unwrap(), Algorithm::Blake3);
        assert_eq!("SHA-1".parse::<Algorithm>().unwrap(), Algorithm::Sha1);
        assert_eq!("sha512-256".parse::<Algorithm>().unwrap(), Algorithm::Sha512_256);
        assert_eq!("blake2b".parse::<Algorithm>().unwrap(), Algorithm::Blake2b512);
        assert_eq!("BLAKE2b512".parse::<Algorithm>().unwrap(), Algorithm::Blake2b512);
        assert_eq!("blake2s".parse::<Algorithm>().unwrap(), Algorithm::Blake2s256);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "not-a-hash".parse::<Algorithm>().unwrap_err();
        match err {
            HashError::UnsupportedAlgorithm { name } => assert_eq!(name, "not-a-hash"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!("".parse::<Algorithm>().is_err());
        assert!("sha2".parse::<Algorithm>().is_err());
        assert!("blake2".parse::<Algorithm>().is_err());
    }

    #[test]
    fn every_name_round_trips() {
        for algo in Algorithm::all() {
            assert_eq!(algo.as_str().parse::<Algorithm>().unwrap(), *algo);
            assert_eq!(algo.label().parse::<Algorithm>().unwrap(), *algo);
            let json = serde_json::to_value(algo).unwrap();
            assert_eq!(json, algo.as_str());
        }
    }

    #[test]
    fn digests_of_different_algorithms_never_compare_equal() {
        let a = HexDigest::new(Algorithm::Sha256, "ab".repeat(32));
        let b = HexDigest::new(Algorithm::Blake3, "ab".repeat(32));
        assert_ne!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn record_serializes_timestamp_as_seconds() {
        let digest = HexDigest::new(Algorithm::Md5, "d41d8cd98f00b204e9800998ecf8427e".into());
        let rec = SessionRecord::digest(Path::new("/tmp/empty.bin"), &digest);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["file_name"], "empty.bin");
        assert_eq!(json["algorithm"], "md5");
        assert!(json["timestamp"].is_i64());
        assert!(json.get("verdict").is_none());
    }
}
