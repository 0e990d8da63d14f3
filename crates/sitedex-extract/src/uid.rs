//! Stable unique-ID derivation: md5(url), reinterpreted as a UUID.

use md5::{Digest, Md5};
use uuid::Uuid;

pub fn uid_for(url: &str) -> String {
    let digest = Md5::digest(url.as_bytes());
    let bytes: [u8; 16] = digest.into();
    Uuid::from_bytes(bytes).to_string()
}
