//! Canonical 12-byte identifiers for users and companies.
//!
//! Both services in the account platform address records with 24-character
//! hexadecimal tokens. [`ObjectId`] is the validated byte form; [`CompanyRef`]
//! and [`UserId`] give the two roles distinct types so a company reference
//! can never be passed where a user identifier is expected.
//!
//! Parsing is strict: tokens are never trimmed, padded or otherwise repaired.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use thiserror::Error;

/// Number of bytes in an [`ObjectId`].
pub const OBJECT_ID_LEN: usize = 12;
/// Number of hexadecimal characters in the textual form of an [`ObjectId`].
pub const OBJECT_ID_HEX_LEN: usize = OBJECT_ID_LEN * 2;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Errors returned when decoding an identifier token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentifierFormatError {
    /// The token was empty.
    #[error("identifier must not be empty")]
    Empty,
    /// The token did not contain exactly 24 characters.
    #[error("identifier must be 24 hexadecimal characters (got {actual})")]
    InvalidLength {
        /// Number of characters supplied.
        actual: usize,
    },
    /// The token contained a non-hexadecimal character.
    #[error("identifier contains a non-hexadecimal character at byte {position}")]
    InvalidCharacter {
        /// Byte offset of the first offending character.
        position: usize,
    },
}

/// Validated 12-byte identifier.
///
/// The canonical text form is 24 lower-case hexadecimal characters; parsing
/// accepts either case.
///
/// # Examples
/// ```
/// use user_service::domain::ObjectId;
///
/// let id = ObjectId::parse("649060D540E3B169621E9629").expect("valid token");
/// assert_eq!(id.to_string(), "649060d540e3b169621e9629");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Decode a 24-character hexadecimal token.
    pub fn parse(token: &str) -> Result<Self, IdentifierFormatError> {
        if token.is_empty() {
            return Err(IdentifierFormatError::Empty);
        }
        if token.len() != OBJECT_ID_HEX_LEN {
            return Err(IdentifierFormatError::InvalidLength {
                actual: token.chars().count(),
            });
        }

        let mut bytes = [0_u8; OBJECT_ID_LEN];
        hex::decode_to_slice(token, &mut bytes).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { index, .. } => {
                IdentifierFormatError::InvalidCharacter { position: index }
            }
            _ => IdentifierFormatError::InvalidLength {
                actual: token.chars().count(),
            },
        })?;
        Ok(Self(bytes))
    }

    /// Mint a fresh identifier.
    ///
    /// Layout: 4 bytes of big-endian Unix seconds, 5 bytes of per-process
    /// randomness and a 3-byte wrapping counter, so identifiers minted by one
    /// process sort by creation second and never collide within it.
    pub fn generate() -> Self {
        static PROCESS_NONCE: OnceLock<[u8; 5]> = OnceLock::new();
        static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let nonce = PROCESS_NONCE.get_or_init(rand::random::<[u8; 5]>);
        let count = COUNTER
            .get_or_init(|| AtomicU32::new(rand::random::<u32>() & COUNTER_MASK))
            .fetch_add(1, Ordering::Relaxed)
            & COUNTER_MASK;

        let mut bytes = [0_u8; OBJECT_ID_LEN];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(nonce);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Borrow the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; OBJECT_ID_LEN] {
        &self.0
    }

    /// Render the canonical lower-case hexadecimal form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = IdentifierFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

macro_rules! object_id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(ObjectId);

        impl $name {
            /// Decode a caller-supplied token into the canonical reference.
            pub fn decode(token: &str) -> Result<Self, IdentifierFormatError> {
                ObjectId::parse(token).map(Self)
            }

            /// Wrap an already validated identifier.
            pub const fn from_object_id(id: ObjectId) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierFormatError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::decode(s)
            }
        }
    };
}

object_id_newtype! {
    /// Canonical reference to a company minted by the company service.
    ///
    /// Immutable once resolved; the user service trusts the format only and
    /// never checks that the company exists.
    CompanyRef
}

object_id_newtype! {
    /// Identifier assigned to a user record by the store on creation.
    UserId
}

impl UserId {
    /// Mint a fresh user identifier.
    pub fn generate() -> Self {
        Self(ObjectId::generate())
    }
}
