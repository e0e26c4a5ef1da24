//! UDIM scope expressions
//!
//! A scope expression restricts an export to some channels and tiles:
//!
//! ```text
//! basecolor:1001-1005, roughness:1002 normal:*  *:1011
//! ```
//!
//! Items are `channel:range` pairs separated by commas and/or whitespace.
//! A range is `*` (all tiles), a tile number (`1001`) or an ascending
//! inclusive span (`1001-1010`). Bad input never aborts parsing: each bad
//! item is reported and either skipped or relaxed to "all tiles".

use crate::domain::ids::{TileCoord, UdimTile};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// Channel token matching every channel
pub const WILDCARD: &str = "*";

/// Parsed scope: channel key → tiles (empty list = all tiles)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeMap {
    entries: BTreeMap<String, Vec<TileCoord>>,
    wildcard: Option<Vec<TileCoord>>,
}

impl ScopeMap {
    /// True when no channel is restricted, meaning "export everything"
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Tiles recorded for a channel
    pub fn get(&self, key: &str) -> Option<&[TileCoord]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Tiles recorded for the wildcard token, if it appeared
    pub fn wildcard(&self) -> Option<&[TileCoord]> {
        self.wildcard.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TileCoord])> {
        self.entries
            .iter()
            .map(|(key, tiles)| (key.as_str(), tiles.as_slice()))
    }
}

/// Outcome of parsing one range token
#[derive(Debug, PartialEq, Eq)]
enum RangeToken {
    Tiles(Vec<TileCoord>),
    /// `end <= start`; the whole item is dropped
    Reversed,
    Malformed,
}

const CHANNEL_TOKEN_PATTERN: &str = r"^\w+$";
const RANGE_TOKEN_PATTERN: &str = r"^(?:\*|([1-9]\d{3})(?:-([1-9]\d{3}))?)$";

/// Parses scope expressions against a channel-name dictionary
#[derive(Debug, Clone)]
pub struct ScopeExpressionParser {
    dictionary_keys: BTreeSet<String>,
    channel_token: Regex,
    range_token: Regex,
}

impl ScopeExpressionParser {
    /// Creates a parser for the given dictionary keys (matched case-insensitively)
    pub fn new<I, S>(dictionary_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            dictionary_keys: dictionary_keys
                .into_iter()
                .map(|key| key.as_ref().to_lowercase())
                .collect(),
            channel_token: Regex::new(CHANNEL_TOKEN_PATTERN).unwrap(),
            range_token: Regex::new(RANGE_TOKEN_PATTERN).unwrap(),
        }
    }

    /// Parses an expression
    ///
    /// `known_channels` are the dictionary keys resolved for the texture set;
    /// a wildcard item applies to those without an explicit entry. Parsing is
    /// pure: the same inputs always produce the same map.
    pub fn parse<S: AsRef<str>>(&self, expression: &str, known_channels: &[S]) -> ScopeMap {
        let mut scope = ScopeMap::default();

        let items = expression
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|item| !item.is_empty());

        for item in items {
            let (channel_token, range_token) = match item.split_once(':') {
                Some((channel, range)) => (channel, Some(range)),
                None => (item, None),
            };

            let key = if channel_token == WILDCARD {
                None
            } else if self.channel_token.is_match(channel_token) {
                let key = channel_token.to_lowercase();
                if !self.dictionary_keys.contains(&key) {
                    tracing::warn!(channel = %channel_token, "Scope channel not in channel dictionary, skipping");
                    continue;
                }
                Some(key)
            } else {
                tracing::warn!(item = %item, "Invalid scope channel token, skipping");
                continue;
            };

            let tiles = match range_token.map(|range| self.parse_range(range)) {
                Some(RangeToken::Tiles(tiles)) => tiles,
                Some(RangeToken::Reversed) => {
                    tracing::warn!(item = %item, "Invalid tile range, end must be after start");
                    continue;
                }
                Some(RangeToken::Malformed) | None => {
                    tracing::warn!(item = %item, "Invalid scope range, exporting all tiles for this channel");
                    Vec::new()
                }
            };

            match key {
                Some(key) => scope.entries.entry(key).or_default().extend(tiles),
                None => scope.wildcard.get_or_insert_with(Vec::new).extend(tiles),
            }
        }

        if let Some(wildcard) = &scope.wildcard {
            for channel in known_channels {
                let key = channel.as_ref().to_lowercase();
                if !scope.entries.contains_key(&key) {
                    scope.entries.insert(key, wildcard.clone());
                }
            }
        }

        scope
    }

    fn parse_range(&self, token: &str) -> RangeToken {
        let Some(caps) = self.range_token.captures(token) else {
            return RangeToken::Malformed;
        };
        let Some(start) = caps.get(1) else {
            // `*`
            return RangeToken::Tiles(Vec::new());
        };

        let Ok(start) = start.as_str().parse::<u16>() else {
            return RangeToken::Malformed;
        };
        let end = match caps.get(2).map(|m| m.as_str().parse::<u16>()) {
            None => start,
            Some(Ok(end)) if end > start => end,
            Some(Ok(_)) => return RangeToken::Reversed,
            Some(Err(_)) => return RangeToken::Malformed,
        };

        let tiles: Result<Vec<TileCoord>, String> = (start..=end)
            .map(|number| UdimTile::new(number).map(|tile| tile.coordinates()))
            .collect();
        match tiles {
            Ok(tiles) => RangeToken::Tiles(tiles),
            Err(reason) => {
                tracing::debug!(token = %token, reason = %reason, "Tile outside UDIM range");
                RangeToken::Malformed
            }
        }
    }
}
