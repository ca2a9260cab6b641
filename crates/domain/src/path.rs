//! JSON path expressions
//!
//! A path expression navigates a parsed JSON document using object-key
//! dot access (`data.email`) and sequence-index bracket access
//! (`data[0]`). Parsing and resolution are separate failure modes: a
//! malformed expression is a fixture bug, while a path that fails to
//! resolve against a live response is an ordinary assertion miss.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// A single step in a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member lookup by key.
    Key(String),
    /// Sequence element lookup by zero-based index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A syntactically malformed path expression.
///
/// This is a programmer error in a fixture and aborts the test case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// The expression is empty.
    #[error("empty path expression")]
    Empty,

    /// A key segment is missing where one was expected.
    #[error("empty segment at byte {position} in '{path}'")]
    EmptySegment {
        /// The full expression.
        path: String,
        /// Byte offset of the offending position.
        position: usize,
    },

    /// A bracketed index is not a non-negative integer.
    #[error("invalid sequence index '{index}' in '{path}'")]
    InvalidIndex {
        /// The full expression.
        path: String,
        /// The text found between the brackets.
        index: String,
    },

    /// An opening bracket was never closed.
    #[error("unclosed '[' in '{path}'")]
    UnclosedBracket {
        /// The full expression.
        path: String,
    },

    /// A character that does not fit the grammar.
    #[error("unexpected character '{found}' at byte {position} in '{path}'")]
    UnexpectedChar {
        /// The full expression.
        path: String,
        /// The offending character.
        found: char,
        /// Byte offset of the offending character.
        position: usize,
    },
}

/// A path that did not resolve against a document.
///
/// Reported as an assertion failure: a missing field is itself a
/// meaningful mismatch, distinguishable from a field holding `null`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("path '{path}' did not resolve: nothing at '{segment}'")]
pub struct PathNotFound {
    /// The full original expression.
    pub path: String,
    /// The first segment that failed to resolve.
    pub segment: String,
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    raw: String,
    segments: Vec<PathSegment>,
}

impl PathExpr {
    /// Parses a path expression.
    ///
    /// Grammar: an identifier or `[index]` segment, followed by any
    /// number of `.identifier` or `[index]` segments. Indices are
    /// non-negative decimal integers.
    ///
    /// # Errors
    /// Returns a `PathParseError` describing the first offending token.
    pub fn parse(input: &str) -> Result<Self, PathParseError> {
        if input.is_empty() {
            return Err(PathParseError::Empty);
        }

        let chars: Vec<(usize, char)> = input.char_indices().collect();
        let total = chars.len();
        let mut segments = Vec::new();
        let mut i = 0;

        while i < total {
            let (pos, ch) = chars[i];
            match ch {
                '[' => {
                    let mut j = i + 1;
                    let mut index_text = String::new();
                    while j < total && chars[j].1 != ']' {
                        index_text.push(chars[j].1);
                        j += 1;
                    }
                    if j >= total {
                        return Err(PathParseError::UnclosedBracket {
                            path: input.to_string(),
                        });
                    }
                    if index_text.is_empty() || !index_text.chars().all(|c| c.is_ascii_digit()) {
                        return Err(PathParseError::InvalidIndex {
                            path: input.to_string(),
                            index: index_text,
                        });
                    }
                    let index: usize =
                        index_text
                            .parse()
                            .map_err(|_| PathParseError::InvalidIndex {
                                path: input.to_string(),
                                index: index_text.clone(),
                            })?;
                    segments.push(PathSegment::Index(index));
                    i = j + 1;
                    i = Self::consume_separator(input, &chars, i)?;
                }
                '.' => {
                    // Only reachable as a leading dot; separators are
                    // consumed together with the segment before them.
                    return Err(PathParseError::EmptySegment {
                        path: input.to_string(),
                        position: pos,
                    });
                }
                ']' => {
                    return Err(PathParseError::UnexpectedChar {
                        path: input.to_string(),
                        found: ch,
                        position: pos,
                    });
                }
                _ => {
                    let mut j = i;
                    let mut key = String::new();
                    while j < total && !matches!(chars[j].1, '.' | '[') {
                        if chars[j].1 == ']' {
                            return Err(PathParseError::UnexpectedChar {
                                path: input.to_string(),
                                found: ']',
                                position: chars[j].0,
                            });
                        }
                        key.push(chars[j].1);
                        j += 1;
                    }
                    segments.push(PathSegment::Key(key));
                    i = j;
                    if i < total && chars[i].1 == '.' {
                        i = Self::consume_dot(input, &chars, i)?;
                    }
                }
            }
        }

        Ok(Self {
            raw: input.to_string(),
            segments,
        })
    }

    /// After a closed segment: expect `.key`, `[`, or end of input.
    fn consume_separator(
        input: &str,
        chars: &[(usize, char)],
        i: usize,
    ) -> Result<usize, PathParseError> {
        match chars.get(i) {
            None => Ok(i),
            Some((_, '.')) => Self::consume_dot(input, chars, i),
            Some((_, '[')) => Ok(i),
            Some(&(pos, found)) => Err(PathParseError::UnexpectedChar {
                path: input.to_string(),
                found,
                position: pos,
            }),
        }
    }

    /// Consumes a `.` and requires a key segment to follow it.
    fn consume_dot(
        input: &str,
        chars: &[(usize, char)],
        i: usize,
    ) -> Result<usize, PathParseError> {
        let next = i + 1;
        let at_end = next >= chars.len();
        if at_end || matches!(chars[next].1, '.' | '[' | ']') {
            return Err(PathParseError::EmptySegment {
                path: input.to_string(),
                position: chars.get(next).map_or(input.len(), |&(pos, _)| pos),
            });
        }
        Ok(next)
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the original expression text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Resolves the expression against a document.
    ///
    /// Resolution is a left-to-right walk: a `Key` segment looks up an
    /// object member, an `Index` segment looks up a sequence element.
    /// The walk borrows from the document and never mutates it, so
    /// resolving twice yields the same value.
    ///
    /// # Errors
    /// Returns `PathNotFound` naming the first segment that does not
    /// resolve (missing key, out-of-range index, or a lookup into a
    /// value of the wrong shape). Successfully resolving to JSON `null`
    /// is not an error.
    pub fn resolve<'a>(&self, document: &'a Value) -> Result<&'a Value, PathNotFound> {
        let mut current = document;
        for segment in &self.segments {
            let next = match segment {
                PathSegment::Key(key) => current.as_object().and_then(|map| map.get(key)),
                PathSegment::Index(index) => current.as_array().and_then(|items| items.get(*index)),
            };
            current = next.ok_or_else(|| PathNotFound {
                path: self.raw.clone(),
                segment: segment.to_string(),
            })?;
        }
        Ok(current)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for PathExpr {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
