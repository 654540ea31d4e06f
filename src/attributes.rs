/// Declarative attribute sets
///
/// An `AttributeSet` is the analogue of an element's `data-*` attributes: string keys in
/// hyphenated lowercase form (`team-id`, `show-toolbar`) mapped to string values.
/// Keys given as `data-team-id` or `teamId` are normalized on insertion.
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Recognized attribute names
pub mod keys {
    pub const KEY: &str = "key";
    pub const LANG: &str = "lang";
    pub const CUSTOM_LANG: &str = "custom-lang";
    pub const SPORT: &str = "sport";
    pub const COUNTRY: &str = "country";
    pub const TIMEZONE: &str = "timezone";
    pub const TYPE: &str = "type";
    pub const THEME: &str = "theme";
    pub const GAME_ID: &str = "game-id";
    pub const FIGHT_ID: &str = "fight-id";
    pub const RACE_ID: &str = "race-id";
    pub const TEAM_ID: &str = "team-id";
    pub const PLAYER_ID: &str = "player-id";
    pub const DRIVER_ID: &str = "driver-id";
    pub const FIGHTER_ID: &str = "fighter-id";
    pub const H2H: &str = "h2h";
    pub const LEAGUE: &str = "league";
    pub const SEASON: &str = "season";
    pub const TAB: &str = "tab";
    pub const GAME_TAB: &str = "game-tab";
    pub const TEAM_TAB: &str = "team-tab";
    pub const LOGO_URL: &str = "logo-url";
    pub const GAMES_STYLE: &str = "games-style";
    pub const SHOW_ERROR: &str = "show-error";
    pub const SHOW_LOGOS: &str = "show-logos";
    pub const SHOW_TOOLBAR: &str = "show-toolbar";
    pub const SHOW_FILTERS: &str = "show-filters";
    pub const FAVORITE: &str = "favorite";
    pub const TEAM_SQUAD: &str = "team-squad";
    pub const TEAM_STATISTICS: &str = "team-statistics";
    pub const PLAYER_STATISTICS: &str = "player-statistics";
    pub const EVENTS: &str = "events";
    pub const RANKINGS: &str = "rankings";
    pub const FASTEST_LAPS: &str = "fastest-laps";
    pub const STARTING_GRID: &str = "starting-grid";
    pub const PIT_STOPS: &str = "pit-stops";
    pub const STANDINGS: &str = "standings";
    pub const FIGHT_RESULTS: &str = "fight-results";
    pub const STATISTICS: &str = "statistics";
    pub const QUARTERS: &str = "quarters";
    pub const PLAYER_TROPHIES: &str = "player-trophies";
    pub const PLAYER_INJURIES: &str = "player-injuries";
    pub const GAME_LINEUPS: &str = "game-lineups";
    pub const GAME_H2H: &str = "game-h2h";
    pub const TARGET_GAME: &str = "target-game";
    pub const TARGET_FIGHT: &str = "target-fight";
    pub const TARGET_RACE: &str = "target-race";
    pub const TARGET_STANDINGS: &str = "target-standings";
    pub const TARGET_TEAM: &str = "target-team";
    pub const TARGET_PLAYER: &str = "target-player";
    pub const TARGET_DRIVER: &str = "target-driver";
    pub const TARGET_FIGHTER: &str = "target-fighter";
    pub const TARGET_LEAGUE: &str = "target-league";
    pub const REFRESH: &str = "refresh";
    pub const DATE: &str = "date";
    pub const YEAR: &str = "year";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected key=value, got {0:?}")]
pub struct AttributeParseError(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet(BTreeMap<String, String>);

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (key, value) in pairs {
            set.set(key.as_ref(), value);
        }
        set
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&attribute_name(key)).map(String::as_str)
    }

    /// Value of `key`, treating an empty string as absent
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(&attribute_name(key))
    }

    /// Set an attribute, returning the previous value
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        self.0.insert(attribute_name(key), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(&attribute_name(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge a shared attribute set with a local one; local values win for identical keys
    pub fn merged(shared: &AttributeSet, local: &AttributeSet) -> AttributeSet {
        let mut merged = shared.clone();
        for (key, value) in local.iter() {
            merged.0.insert(key.to_string(), value.to_string());
        }
        merged
    }

    /// Copy every non-empty entry of `other` onto this set
    pub fn extend_non_empty(&mut self, other: &AttributeSet) {
        for (key, value) in other.iter().filter(|(_, v)| !v.is_empty()) {
            self.0.insert(key.to_string(), value.to_string());
        }
    }

    /// Render as `data-*` HTML attributes; names that are not valid are left out
    pub fn to_data_attributes(&self) -> String {
        self.0
            .iter()
            .filter(|(k, _)| is_valid_name(k))
            .map(|(k, v)| format!(" data-{}=\"{}\"", k, escape_attribute(v)))
            .collect()
    }
}

impl<'de> Deserialize<'de> for AttributeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(AttributeSet::from_pairs(raw))
    }
}

/// Parse a `key=value` pair as given on the command line
pub fn parse_pair(raw: &str) -> Result<(String, String), AttributeParseError> {
    match raw.split_once('=') {
        Some((key, value)) if is_valid_name(&attribute_name(key.trim())) => {
            Ok((attribute_name(key.trim()), value.to_string()))
        }
        _ => Err(AttributeParseError(raw.to_string())),
    }
}

/// Normalize an attribute name to hyphenated lowercase without the `data-` prefix
///
/// `teamId`, `data-team-id` and `team-id` all map to `team-id`.
pub fn attribute_name(raw: &str) -> String {
    let raw = raw.strip_prefix("data-").unwrap_or(raw);
    let mut name = String::with_capacity(raw.len() + 4);
    for c in raw.chars() {
        if c.is_ascii_uppercase() {
            if !name.is_empty() && !name.ends_with('-') {
                name.push('-');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

/// Whether `name` can be emitted as an HTML attribute name
///
/// Non-empty, ASCII letters, digits, `-`, `_` and `.` only.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
