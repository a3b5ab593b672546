//! Splits list headings like `12. Du Hast (Sehnsucht, 1997)` into tracks.
//!
//! The album is the last top-level parenthesis group of the heading. Titles and
//! albums may contain parentheses of their own, e.g.
//! `Vermilion (Vol. 3: (The Subliminal Verses), 2004)`, so the group is found by
//! counting depth backwards from the end instead of pattern matching.

use std::sync::LazyLock;

use regex::Regex;

use crate::{config::ParserConfig, domain::track::Track};

pub mod error;

use error::ParseError;

/// `12. ` style ranking at the start of a title. Other rank formats (`#12`) stay in the title.
static RANK_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}\.\s").expect("valid rank regex"));

static YEAR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*(\d{4})\s*$").expect("valid year regex"));

static LIST_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i).*greatest(.*)songs").expect("valid list title regex"));

/// Returns the byte index of the `(` opening the last top-level group of `text`.
///
/// Walks the string from the end with a depth counter (`)` increments, `(`
/// decrements). The first position after the last character where the depth is
/// back to zero is the opening parenthesis. Text that does not end with `)` has
/// no trailing group.
pub fn album_start_index(text: &str) -> Result<usize, ParseError> {
    if !text.ends_with(')') {
        return Err(ParseError::MalformedHeading {
            heading: text.to_string(),
        });
    }

    let mut depth: i32 = 0;

    for (offset, (index, ch)) in text.char_indices().rev().enumerate() {
        match ch {
            ')' => depth += 1,
            '(' => depth -= 1,
            _ => {}
        }

        if offset > 0 && depth == 0 {
            return Ok(index);
        }
    }

    Err(ParseError::MalformedHeading {
        heading: text.to_string(),
    })
}

/// Recovers the artist from a list title such as `The 20 greatest Slipknot songs`.
pub fn artist_from_list_title(list_title: &str) -> Option<String> {
    let captures = LIST_TITLE.captures(list_title)?;
    let artist = captures.get(1)?.as_str().trim();
    if artist.is_empty() {
        None
    } else {
        Some(artist.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadingParser {
    keep_year: bool,
}

impl HeadingParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            keep_year: config.keep_year,
        }
    }

    /// Parses one heading. `artist` is passed through to the track as is.
    pub fn parse_heading(&self, heading: &str, artist: Option<&str>) -> Result<Track, ParseError> {
        let heading = heading.trim();
        let split = album_start_index(heading)?;

        let title = heading[..split].trim();
        let title = match RANK_PREFIX.find(title) {
            Some(rank) => title[rank.end()..].trim_start(),
            None => title,
        };

        // between the opening `(` and the closing `)` at the end
        let inner = &heading[split + 1..heading.len() - 1];
        let (album, year) = match YEAR_SUFFIX.captures(inner) {
            Some(captures) => {
                let year = captures.get(1).and_then(|y| y.as_str().parse::<u16>().ok());
                let start = captures.get(0).map_or(inner.len(), |m| m.start());
                (&inner[..start], year)
            }
            None => (inner, None),
        };
        let album = album.trim();

        Ok(Track::from_parts(
            title,
            artist.map(str::to_string),
            (!album.is_empty()).then(|| album.to_string()),
            if self.keep_year { year } else { None },
        ))
    }

    /// Parses a batch of headings, one result per heading in input order.
    pub fn parse_all<I, S>(&self, headings: I, artist: Option<&str>) -> Vec<Result<Track, ParseError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        headings
            .into_iter()
            .map(|heading| self.parse_heading(heading.as_ref(), artist))
            .collect()
    }
}
