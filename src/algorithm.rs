use std::fmt;

use hmac::{Hmac, Mac, digest::KeyInit};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::format::SALT;

/// Digest used for both the key derivation and the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    /// Infer the digest from a decoded signature length.
    pub fn from_signature_len(len: usize) -> Option<Self> {
        match len {
            20 => Some(Self::Sha1),
            32 => Some(Self::Sha256),
            48 => Some(Self::Sha384),
            64 => Some(Self::Sha512),
            _ => None,
        }
    }

    pub fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Sign `message` the way itsdangerous' `hmac` key derivation does.
    ///
    /// The secret is never used directly: it first keys an HMAC over [`SALT`], and that output keys
    /// the HMAC over the message.
    pub fn compute(self, secret: &[u8], message: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha1 => derive_and_sign::<Hmac<Sha1>>(secret, message),
            Self::Sha256 => derive_and_sign::<Hmac<Sha256>>(secret, message),
            Self::Sha384 => derive_and_sign::<Hmac<Sha384>>(secret, message),
            Self::Sha512 => derive_and_sign::<Hmac<Sha512>>(secret, message),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn derive_and_sign<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> Vec<u8> {
    let derived_key = hmac_bytes::<M>(secret, SALT);
    hmac_bytes::<M>(&derived_key, message)
}

fn hmac_bytes<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length, so this cannot fail.
    let mut mac = <M as KeyInit>::new_from_slice(key).unwrap_or_else(|_| unreachable!());
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
