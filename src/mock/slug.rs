//! Identifier normalization.
//!
//! Free-text service names become slugs used in route paths and file names.

use std::fmt;

/// A lower-cased, whitespace-free identifier derived from a service name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Normalize a free-text name.
    ///
    /// Lower-cases the name and drops every whitespace character, concatenating
    /// the remaining pieces. No other characters are filtered; an all-blank
    /// name yields an empty slug, which callers must reject.
    pub fn normalize(name: &str) -> Self {
        Self(
            name.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
