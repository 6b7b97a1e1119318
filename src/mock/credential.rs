//! Credential generation.
//!
//! Credentials have the shape `AAA-DDDD-BBB`: a three letter tag from each
//! slug around four random decimal digits. They guard test mocks only, so a
//! fast non-cryptographic generator is enough.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mock::slug::Slug;

/// Characters taken from each slug.
const PREFIX_LEN: usize = 3;
/// Random decimal digits in the middle section.
const DIGITS: usize = 4;
/// Filler used when a slug is shorter than `PREFIX_LEN`.
const PAD: char = 'X';

/// A shared secret handed to callers of a generated mock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Generate a fresh credential, seeded from the thread-local generator.
    pub fn generate(first: &Slug, second: &Slug) -> Self {
        Self::generate_with(&mut fastrand::Rng::new(), first, second)
    }

    /// Generate a credential from an explicit generator.
    pub fn generate_with(rng: &mut fastrand::Rng, first: &Slug, second: &Slug) -> Self {
        let digits: String = (0..DIGITS)
            .map(|_| char::from(b'0' + rng.u8(0..10)))
            .collect();
        Self(format!("{}-{}-{}", tag(first), digits, tag(second)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First three characters of the slug, upper-cased, right-padded with `X`.
fn tag(slug: &Slug) -> String {
    let mut tag: String = slug
        .as_str()
        .chars()
        .flat_map(char::to_uppercase)
        .take(PREFIX_LEN)
        .collect();
    while tag.chars().count() < PREFIX_LEN {
        tag.push(PAD);
    }
    tag
}
