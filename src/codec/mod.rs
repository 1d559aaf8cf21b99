//! Layout-keyed text transcoding.
//!
//! Encoding replaces every character with the token of the key that types
//! it (see [`token`] for the wire format). Decoding reverses it. Both are
//! all-or-nothing: the first character or token that cannot be handled
//! aborts the call and no partial output is returned.
//!
//! Input is canonically decomposed (NFD) before lookup, so `é` is typed as
//! `e` plus the reserved acute accent token. Decoded text is recomposed
//! (NFC).

pub mod token;

use thiserror::Error;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::models::Mapping;
use token::{format_position, parse_position, reserved_char, reserved_token, TOKEN_SEPARATOR};

/// A transcoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscodeError {
    /// Input character has no key in the layout and no reserved token.
    #[error("unsupported character {character:?} at index {index}")]
    UnsupportedCharacter {
        /// Offending character
        character: char,
        /// Zero-based character index in the input
        index: usize,
    },

    /// Input token is not a reserved token or a key of the layout.
    #[error("malformed token {token:?} at index {index}")]
    MalformedToken {
        /// Offending token text
        token: String,
        /// Zero-based token index in the input
        index: usize,
    },
}

/// Encoder/decoder bound to one mapping.
#[derive(Debug, Clone, Copy)]
pub struct Transcoder<'a> {
    mapping: &'a Mapping,
}

impl<'a> Transcoder<'a> {
    /// Creates a transcoder over `mapping`.
    #[must_use]
    pub const fn new(mapping: &'a Mapping) -> Self {
        Self { mapping }
    }

    fn token_for(&self, character: char) -> Option<String> {
        match self.mapping.position_of(character) {
            Some(position) => Some(format_position(position)),
            None => reserved_token(character),
        }
    }

    /// Encodes `text` into space-separated tokens.
    ///
    /// Each character is decomposed on its own, so error indices refer to
    /// characters of `text` as given. A character whose decomposition is
    /// not fully encodable falls back to its own key, if it has one.
    pub fn encode(&self, text: &str) -> Result<String, TranscodeError> {
        let mut tokens = Vec::with_capacity(text.len());

        for (index, character) in text.chars().enumerate() {
            let start = tokens.len();
            let decomposed = std::iter::once(character).nfd().all(|part| {
                match self.token_for(part) {
                    Some(token) => {
                        tokens.push(token);
                        true
                    }
                    None => false,
                }
            });

            if !decomposed {
                tokens.truncate(start);
                let token = self
                    .token_for(character)
                    .ok_or(TranscodeError::UnsupportedCharacter { character, index })?;
                tokens.push(token);
            }
        }

        debug!("Encoded {} tokens", tokens.len());
        Ok(tokens.join(TOKEN_SEPARATOR))
    }

    /// Decodes tokens produced by [`Transcoder::encode`].
    ///
    /// Tokens may be separated by any run of ASCII whitespace.
    pub fn decode(&self, encoded: &str) -> Result<String, TranscodeError> {
        let mut text = String::with_capacity(encoded.len() / 3);

        for (index, token) in encoded.split_ascii_whitespace().enumerate() {
            let character = reserved_char(token)
                .or_else(|| parse_position(token).and_then(|p| self.mapping.char_at(p)))
                .ok_or_else(|| TranscodeError::MalformedToken {
                    token: token.to_string(),
                    index,
                })?;
            text.push(character);
        }

        Ok(text.nfc().collect())
    }
}

/// Encodes `text` with `mapping`.
pub fn encode(mapping: &Mapping, text: &str) -> Result<String, TranscodeError> {
    Transcoder::new(mapping).encode(text)
}

/// Decodes `encoded` with `mapping`.
pub fn decode(mapping: &Mapping, encoded: &str) -> Result<String, TranscodeError> {
    Transcoder::new(mapping).decode(encoded)
}
