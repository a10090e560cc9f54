//! Deterministic fingerprints for policies, catalogs and slide orders.
//!
//! A value is fingerprinted by streaming its compact JSON form through an
//! xxh64 hasher, so two runs over the same input and policy can be compared
//! by a short hex string without keeping the serialized bytes around.
//!
//! Fingerprinted data must not contain `HashMap`s; use `BTreeMap`/`BTreeSet`
//! or vectors so that iteration order is stable.

use std::io;

use serde::Serialize;
use xxhash_rust::xxh64::Xxh64;

/// Seed used for every fingerprint in this crate.
const FINGERPRINT_SEED: u64 = 0;

/// `io::Write` sink that feeds an xxh64 hasher.
struct HashWriter(Xxh64);

impl io::Write for HashWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// xxh64 of the compact JSON form of a value.
///
/// Same value as hashing `serde_json::to_vec(value)` in one piece.
pub fn fingerprint_u64<T: Serialize + ?Sized>(value: &T) -> u64 {
    let mut writer = HashWriter(Xxh64::new(FINGERPRINT_SEED));
    // The sink never fails; only a map with non-string keys could, and no
    // fingerprinted type has one.
    serde_json::to_writer(&mut writer, value).expect("fingerprinted data serializes to JSON");
    writer.0.digest()
}

/// Fingerprint rendered as 16 lowercase hex digits.
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> String {
    format!("{:016x}", fingerprint_u64(value))
}
