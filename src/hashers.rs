use crate::models::Algorithm;
use std::io::{self, Read};

/// Read size used when hashing files.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Finalized hex digest plus the number of bytes fed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hashed {
    pub hex: String,
    pub bytes: u64,
}

/// Hash everything `reader` yields, feeding the accumulator `chunk_size`
/// bytes at a time. The result does not depend on `chunk_size`.
pub fn compute_hash_for_reader<R: Read>(
    mut reader: R,
    algorithm: Algorithm,
    chunk_size: usize,
) -> io::Result<Hashed> {
    match algorithm {
        Algorithm::Blake3 => {
            let mut hasher = blake3::Hasher::new();
            let bytes = pump(&mut reader, chunk_size, |chunk| {
                hasher.update(chunk);
            })?;
            Ok(Hashed {
                hex: hasher.finalize().to_hex().to_string(),
                bytes,
            })
        }
        Algorithm::Md5 => {
            let mut ctx = md5::Context::new();
            let bytes = pump(&mut reader, chunk_size, |chunk| ctx.consume(chunk))?;
            Ok(Hashed {
                hex: format!("{:x}", ctx.finalize()),
                bytes,
            })
        }
        Algorithm::Sha1 => digest_hex::<sha1::Sha1, _>(reader, chunk_size),
        Algorithm::Sha224 => digest_hex::<sha2::Sha224, _>(reader, chunk_size),
        Algorithm::Sha256 => digest_hex::<sha2::Sha256, _>(reader, chunk_size),
        Algorithm::Sha384 => digest_hex::<sha2::Sha384, _>(reader, chunk_size),
        Algorithm::Sha512 => digest_hex::<sha2::Sha512, _>(reader, chunk_size),
        Algorithm::Sha512_224 => digest_hex::<sha2::Sha512_224, _>(reader, chunk_size),
        Algorithm::Sha512_256 => digest_hex::<sha2::Sha512_256, _>(reader, chunk_size),
        Algorithm::Sha3_224 => digest_hex::<sha3::Sha3_224, _>(reader, chunk_size),
        Algorithm::Sha3_256 => digest_hex::<sha3::Sha3_256, _>(reader, chunk_size),
        Algorithm::Sha3_384 => digest_hex::<sha3::Sha3_384, _>(reader, chunk_size),
        Algorithm::Sha3_512 => digest_hex::<sha3::Sha3_512, _>(reader, chunk_size),
        Algorithm::Blake2b512 => digest_hex::<blake2::Blake2b512, _>(reader, chunk_size),
        Algorithm::Blake2s256 => digest_hex::<blake2::Blake2s256, _>(reader, chunk_size),
    }
}

// sha1, sha2, sha3 and blake2 share the RustCrypto `Digest` trait.
fn digest_hex<D: sha2::Digest, R: Read>(mut reader: R, chunk_size: usize) -> io::Result<Hashed> {
    let mut hasher = D::new();
    let bytes = pump(&mut reader, chunk_size, |chunk| hasher.update(chunk))?;
    Ok(Hashed {
        hex: hex::encode(hasher.finalize()),
        bytes,
    })
}

/// Read to end of stream in order, handing each chunk to `sink`.
/// Returns the number of bytes read.
fn pump<R: Read>(reader: &mut R, chunk_size: usize, mut sink: impl FnMut(&[u8])) -> io::Result<u64> {
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        sink(&buf[..n]);
        total += n as u64;
    }
    Ok(total)
}
