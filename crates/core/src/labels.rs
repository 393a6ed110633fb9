//! Alias sets and command paths.
//!
//! A command path is written as a structure string: whitespace separates
//! path segments and [`ALIAS_SEPARATOR`] separates the aliases of a single
//! segment, so `"economy give|g"` is the `economy` command followed by a
//! subcommand reachable as either `give` or `g`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexSet;

use crate::error::{Error, Result};

/// Separates interchangeable aliases inside one path segment.
pub const ALIAS_SEPARATOR: char = '|';

/// Case-folded form used for every alias comparison.
#[must_use]
pub fn normalize(label: &str) -> String {
    label.to_lowercase()
}

fn validate_alias(alias: &str) -> Result<()> {
    if alias.is_empty() {
        return Err(Error::invalid_argument("an alias may not be empty"));
    }

    if alias.chars().any(char::is_whitespace) {
        return Err(Error::invalid_argument(format!(
            "alias `{alias}` may not contain whitespace"
        )));
    }

    if alias.contains(ALIAS_SEPARATOR) {
        return Err(Error::invalid_argument(format!(
            "alias `{alias}` may not contain `{ALIAS_SEPARATOR}`"
        )));
    }

    Ok(())
}

/// The aliases identifying a node among its siblings.
///
/// Aliases are stored case-folded and in insertion order; the first one is
/// the canonical label. A `Labels` value is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels(IndexSet<String>);

impl Labels {
    /// Builds an alias set, folding case and dropping repeated aliases.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if no alias is given or if any alias
    /// is empty, contains whitespace or contains [`ALIAS_SEPARATOR`].
    pub fn new<I, T>(aliases: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut set = IndexSet::new();
        for alias in aliases {
            let alias = alias.as_ref();
            validate_alias(alias)?;
            set.insert(normalize(alias));
        }

        if set.is_empty() {
            return Err(Error::invalid_argument("a segment needs at least one alias"));
        }

        Ok(Self(set))
    }

    /// Parses one segment such as `"give|g"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for empty aliases (`"a||b"`, `"a|"`)
    /// and for whitespace inside the segment.
    pub fn parse(segment: &str) -> Result<Self> {
        Self::new(segment.split(ALIAS_SEPARATOR))
    }

    #[must_use]
    pub fn canonical(&self) -> &str {
        // Never empty, see `new`.
        self.0.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn matches(&self, label: &str) -> bool {
        self.0.contains(&normalize(label))
    }

    /// The first alias of `self` that also belongs to `other`.
    #[must_use]
    pub fn shared_alias<'a>(&'a self, other: &Labels) -> Option<&'a str> {
        self.0
            .iter()
            .find(|alias| other.0.contains(*alias))
            .map(String::as_str)
    }

    #[must_use]
    pub fn intersects(&self, other: &Labels) -> bool {
        self.shared_alias(other).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Labels {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for alias in &self.0 {
            if !first {
                write!(formatter, "{ALIAS_SEPARATOR}")?;
            }
            formatter.write_str(alias)?;
            first = false;
        }

        Ok(())
    }
}

impl FromStr for Labels {
    type Err = Error;

    fn from_str(segment: &str) -> Result<Self> {
        Self::parse(segment)
    }
}

/// An ordered, non-empty sequence of segments leading from a node to one of
/// its descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPath(Vec<Labels>);

impl CommandPath {
    /// Parses a structure string such as `"economy give|g"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the structure has no segments or
    /// any segment is malformed.
    pub fn parse(structure: &str) -> Result<Self> {
        let segments = structure
            .split_whitespace()
            .map(Labels::parse)
            .collect::<Result<Vec<_>>>()?;

        Self::from_labels(segments)
    }

    /// Builds a path from already-split alias lists, one list per segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if there are no segments or any
    /// segment is empty or contains an invalid alias.
    pub fn from_segments<I, S, T>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let segments = segments
            .into_iter()
            .map(Labels::new)
            .collect::<Result<Vec<_>>>()?;

        Self::from_labels(segments)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `segments` is empty.
    pub fn from_labels(segments: Vec<Labels>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::invalid_argument(
                "cannot add a handler to a path with no labels",
            ));
        }

        Ok(Self(segments))
    }

    #[must_use]
    pub fn segments(&self) -> &[Labels] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether both paths name the same node, comparing canonical aliases.
    #[must_use]
    pub fn same_canonical(&self, other: &CommandPath) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(left, right)| left.canonical() == right.canonical())
    }
}

impl Display for CommandPath {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, segment) in self.0.iter().enumerate() {
            if index > 0 {
                formatter.write_str(" ")?;
            }
            write!(formatter, "{segment}")?;
        }

        Ok(())
    }
}

impl FromStr for CommandPath {
    type Err = Error;

    fn from_str(structure: &str) -> Result<Self> {
        Self::parse(structure)
    }
}
