/// Configuration normalization
///
/// Turns the shared attribute set and a widget's own attributes into typed options.
/// Local attributes override shared ones; absent keys fall back to defaults.
use std::collections::HashMap;
use std::time::Duration;

use chrono_tz::Tz;
use serde_json::Value;

use crate::attributes::{keys, AttributeSet};
use crate::endpoints::{resolve_endpoint, DEFAULT_LOGO_BASE_URL};
use crate::formatting::resolve_time_zone;
use crate::types::Sport;

/// Smallest non-zero refresh interval, in seconds
pub const MIN_REFRESH_SECONDS: u32 = 15;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_GAMES_STYLE: &str = "1";

/// Configuration shared by every widget of a host
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    pub attributes: AttributeSet,
    /// Preloaded custom translations handed to every widget
    pub custom_translations: Option<Value>,
}

impl SharedConfig {
    pub fn new(attributes: AttributeSet) -> Self {
        Self {
            attributes,
            custom_translations: None,
        }
    }

    pub fn with_custom_translations(mut self, table: Value) -> Self {
        self.custom_translations = Some(table);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub favorite: bool,
    pub team_squad: bool,
    pub team_statistics: bool,
    pub player_statistics: bool,
    pub events: bool,
    pub rankings: bool,
    pub fastest_laps: bool,
    pub starting_grid: bool,
    pub pit_stops: bool,
    pub standings: bool,
    pub fight_results: bool,
    pub statistics: bool,
    pub quarters: bool,
    pub player_trophies: bool,
    pub player_injuries: bool,
    pub game_lineups: bool,
    pub game_h2h: bool,
}

impl FeatureFlags {
    fn from_attributes(attrs: &AttributeSet) -> Self {
        let flag = |key: &str| parse_bool(attrs.get(key), false);
        Self {
            favorite: flag(keys::FAVORITE),
            team_squad: flag(keys::TEAM_SQUAD),
            team_statistics: flag(keys::TEAM_STATISTICS),
            player_statistics: flag(keys::PLAYER_STATISTICS),
            events: flag(keys::EVENTS),
            rankings: flag(keys::RANKINGS),
            fastest_laps: flag(keys::FASTEST_LAPS),
            starting_grid: flag(keys::STARTING_GRID),
            pit_stops: flag(keys::PIT_STOPS),
            standings: flag(keys::STANDINGS),
            fight_results: flag(keys::FIGHT_RESULTS),
            statistics: flag(keys::STATISTICS),
            quarters: flag(keys::QUARTERS),
            player_trophies: flag(keys::PLAYER_TROPHIES),
            player_injuries: flag(keys::PLAYER_INJURIES),
            game_lineups: flag(keys::GAME_LINEUPS),
            game_h2h: flag(keys::GAME_H2H),
        }
    }

    fn entries(&self) -> [(&'static str, bool); 17] {
        [
            (keys::FAVORITE, self.favorite),
            (keys::TEAM_SQUAD, self.team_squad),
            (keys::TEAM_STATISTICS, self.team_statistics),
            (keys::PLAYER_STATISTICS, self.player_statistics),
            (keys::EVENTS, self.events),
            (keys::RANKINGS, self.rankings),
            (keys::FASTEST_LAPS, self.fastest_laps),
            (keys::STARTING_GRID, self.starting_grid),
            (keys::PIT_STOPS, self.pit_stops),
            (keys::STANDINGS, self.standings),
            (keys::FIGHT_RESULTS, self.fight_results),
            (keys::STATISTICS, self.statistics),
            (keys::QUARTERS, self.quarters),
            (keys::PLAYER_TROPHIES, self.player_trophies),
            (keys::PLAYER_INJURIES, self.player_injuries),
            (keys::GAME_LINEUPS, self.game_lineups),
            (keys::GAME_H2H, self.game_h2h),
        ]
    }
}

/// Default tabs of the detail views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabDefaults {
    pub tab: Option<String>,
    pub game_tab: Option<String>,
    pub team_tab: Option<String>,
}

/// Selectors of other widgets that detail views should be opened in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    pub game: Option<String>,
    pub fight: Option<String>,
    pub race: Option<String>,
    pub standings: Option<String>,
    pub team: Option<String>,
    pub player: Option<String>,
    pub driver: Option<String>,
    pub fighter: Option<String>,
    pub league: Option<String>,
}

/// Everything but sport and widget type, resolved from attributes
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOptions {
    pub api_key: Option<String>,
    pub language: String,
    pub custom_language_url: Option<String>,
    pub country: String,
    pub time_zone: Tz,
    pub theme: Option<String>,

    pub game_id: Option<String>,
    pub fight_id: Option<String>,
    pub race_id: Option<String>,
    pub team_id: Option<String>,
    pub player_id: Option<String>,
    pub driver_id: Option<String>,
    pub fighter_id: Option<String>,
    pub h2h: Option<String>,
    pub league: Option<String>,
    pub season: Option<String>,
    pub date: Option<String>,
    pub year: Option<String>,

    pub logo_base_url: String,
    pub games_style: String,
    pub show_logos: bool,
    pub show_toolbar: bool,
    pub show_error: bool,
    pub show_filters: bool,

    pub flags: FeatureFlags,
    pub tabs: TabDefaults,
    pub targets: Targets,
    pub custom_base_urls: HashMap<Sport, String>,
    pub refresh_seconds: u32,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::from_attributes(&AttributeSet::new())
    }
}

impl WidgetOptions {
    pub fn from_attributes(attrs: &AttributeSet) -> Self {
        let text = |key: &str| attrs.get_non_empty(key).map(str::to_string);

        let custom_base_urls = Sport::ALL
            .into_iter()
            .filter_map(|sport| {
                attrs
                    .get_non_empty(&sport.url_attribute())
                    .map(|url| (sport, url.to_string()))
            })
            .collect();

        Self {
            api_key: text(keys::KEY),
            language: text(keys::LANG).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            custom_language_url: text(keys::CUSTOM_LANG),
            country: attrs
                .get_non_empty(keys::COUNTRY)
                .map(str::to_lowercase)
                .unwrap_or_default(),
            time_zone: resolve_time_zone(attrs.get(keys::TIMEZONE)),
            theme: text(keys::THEME),

            game_id: text(keys::GAME_ID),
            fight_id: text(keys::FIGHT_ID),
            race_id: text(keys::RACE_ID),
            team_id: text(keys::TEAM_ID),
            player_id: text(keys::PLAYER_ID),
            driver_id: text(keys::DRIVER_ID),
            fighter_id: text(keys::FIGHTER_ID),
            h2h: text(keys::H2H),
            league: text(keys::LEAGUE),
            season: text(keys::SEASON),
            date: text(keys::DATE),
            year: text(keys::YEAR),

            logo_base_url: text(keys::LOGO_URL)
                .unwrap_or_else(|| DEFAULT_LOGO_BASE_URL.to_string()),
            games_style: text(keys::GAMES_STYLE)
                .unwrap_or_else(|| DEFAULT_GAMES_STYLE.to_string()),
            show_logos: parse_bool(attrs.get(keys::SHOW_LOGOS), false),
            show_toolbar: parse_bool(attrs.get(keys::SHOW_TOOLBAR), true),
            show_error: parse_bool(attrs.get(keys::SHOW_ERROR), false),
            show_filters: parse_bool(attrs.get(keys::SHOW_FILTERS), false),

            flags: FeatureFlags::from_attributes(attrs),
            tabs: TabDefaults {
                tab: text(keys::TAB),
                game_tab: text(keys::GAME_TAB),
                team_tab: text(keys::TEAM_TAB),
            },
            targets: Targets {
                game: text(keys::TARGET_GAME),
                fight: text(keys::TARGET_FIGHT),
                race: text(keys::TARGET_RACE),
                standings: text(keys::TARGET_STANDINGS),
                team: text(keys::TARGET_TEAM),
                player: text(keys::TARGET_PLAYER),
                driver: text(keys::TARGET_DRIVER),
                fighter: text(keys::TARGET_FIGHTER),
                league: text(keys::TARGET_LEAGUE),
            },
            custom_base_urls,
            refresh_seconds: parse_refresh(attrs.get(keys::REFRESH)),
        }
    }

    /// Base URL of the sports-data API for `sport`
    pub fn api_base_url(&self, sport: Sport) -> String {
        resolve_endpoint(sport, self.custom_base_urls.get(&sport).map(String::as_str))
    }

    /// Interval between silent refreshes; zero when disabled
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.refresh_seconds) * 1000)
    }

    /// First non-empty of game, fight and race id
    pub fn detail_id(&self) -> Option<&str> {
        [&self.game_id, &self.fight_id, &self.race_id]
            .into_iter()
            .find_map(|id| id.as_deref())
    }

    /// Resolved fields in attribute form, booleans as `"true"`/`"false"`
    pub fn to_attributes(&self) -> AttributeSet {
        let mut attrs = AttributeSet::new();
        let mut put = |key: &str, value: Option<&str>| {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                attrs.set(key, v);
            }
        };
        let flag = |b: bool| if b { "true" } else { "false" };

        put(keys::KEY, self.api_key.as_deref());
        put(keys::LANG, Some(self.language.as_str()));
        put(keys::CUSTOM_LANG, self.custom_language_url.as_deref());
        put(keys::COUNTRY, Some(self.country.as_str()));
        put(keys::TIMEZONE, Some(self.time_zone.name()));
        put(keys::THEME, self.theme.as_deref());
        put(keys::GAME_ID, self.game_id.as_deref());
        put(keys::FIGHT_ID, self.fight_id.as_deref());
        put(keys::RACE_ID, self.race_id.as_deref());
        put(keys::TEAM_ID, self.team_id.as_deref());
        put(keys::PLAYER_ID, self.player_id.as_deref());
        put(keys::DRIVER_ID, self.driver_id.as_deref());
        put(keys::FIGHTER_ID, self.fighter_id.as_deref());
        put(keys::H2H, self.h2h.as_deref());
        put(keys::LEAGUE, self.league.as_deref());
        put(keys::SEASON, self.season.as_deref());
        put(keys::DATE, self.date.as_deref());
        put(keys::YEAR, self.year.as_deref());
        put(keys::TAB, self.tabs.tab.as_deref());
        put(keys::GAME_TAB, self.tabs.game_tab.as_deref());
        put(keys::TEAM_TAB, self.tabs.team_tab.as_deref());
        put(keys::LOGO_URL, Some(self.logo_base_url.as_str()));
        put(keys::GAMES_STYLE, Some(self.games_style.as_str()));
        put(keys::SHOW_LOGOS, Some(flag(self.show_logos)));
        put(keys::SHOW_TOOLBAR, Some(flag(self.show_toolbar)));
        put(keys::SHOW_ERROR, Some(flag(self.show_error)));
        put(keys::SHOW_FILTERS, Some(flag(self.show_filters)));
        for (key, enabled) in self.flags.entries() {
            put(key, Some(flag(enabled)));
        }
        put(keys::TARGET_GAME, self.targets.game.as_deref());
        put(keys::TARGET_FIGHT, self.targets.fight.as_deref());
        put(keys::TARGET_RACE, self.targets.race.as_deref());
        put(keys::TARGET_STANDINGS, self.targets.standings.as_deref());
        put(keys::TARGET_TEAM, self.targets.team.as_deref());
        put(keys::TARGET_PLAYER, self.targets.player.as_deref());
        put(keys::TARGET_DRIVER, self.targets.driver.as_deref());
        put(keys::TARGET_FIGHTER, self.targets.fighter.as_deref());
        put(keys::TARGET_LEAGUE, self.targets.league.as_deref());
        for (sport, url) in &self.custom_base_urls {
            put(&sport.url_attribute(), Some(url.as_str()));
        }
        let refresh = self.refresh_seconds.to_string();
        put(keys::REFRESH, Some(refresh.as_str()));
        attrs
    }
}

/// Result of merging and coercing attributes, before validation
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Raw sport value, validated later
    pub sport: String,
    /// Raw widget type value, validated later
    pub widget_type: String,
    pub options: WidgetOptions,
    /// Shared and local attributes, merged
    pub attributes: AttributeSet,
    pub custom_translations: Option<Value>,
}

impl Normalized {
    /// Attributes to write back onto the widget
    ///
    /// Every non-empty merged attribute except `type`, plus every non-empty resolved field.
    pub fn write_back(&self) -> AttributeSet {
        let mut merged = self.attributes.clone();
        merged.remove(keys::TYPE);

        let mut out = AttributeSet::new();
        out.extend_non_empty(&merged);
        out.extend_non_empty(&self.options.to_attributes());
        out
    }
}

pub fn normalize(shared: Option<&SharedConfig>, local: &AttributeSet) -> Normalized {
    let empty = AttributeSet::new();
    let shared_attrs = shared.map(|s| &s.attributes).unwrap_or(&empty);
    let attributes = AttributeSet::merged(shared_attrs, local);

    Normalized {
        sport: attributes.get(keys::SPORT).unwrap_or_default().to_string(),
        widget_type: attributes.get(keys::TYPE).unwrap_or_default().to_string(),
        options: WidgetOptions::from_attributes(&attributes),
        custom_translations: shared.and_then(|s| s.custom_translations.clone()),
        attributes,
    }
}

/// `true` only for the literal `"true"`; `default` when the attribute is absent
pub fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw {
        Some(value) => value == "true",
        None => default,
    }
}

/// Refresh interval in seconds: 0 (disabled) or at least `MIN_REFRESH_SECONDS`
pub fn parse_refresh(raw: Option<&str>) -> u32 {
    let seconds = match raw {
        Some("true") => return MIN_REFRESH_SECONDS,
        Some(value) => parse_leading_int(value).unwrap_or(0),
        None => 0,
    };
    if seconds <= 0 {
        0
    } else {
        u32::try_from(seconds)
            .unwrap_or(u32::MAX)
            .max(MIN_REFRESH_SECONDS)
    }
}

/// Leading integer of a string, ignoring what follows it (`"20s"` is 20)
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeSet {
        AttributeSet::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool(Some("true"), false));
        assert!(!parse_bool(Some("TRUE"), false));
        assert!(!parse_bool(Some("1"), true));
        assert!(!parse_bool(Some(""), true));
        assert!(parse_bool(None, true));
        assert!(!parse_bool(None, false));
    }

    #[test]
    fn test_parse_refresh() {
        assert_eq!(parse_refresh(None), 0);
        assert_eq!(parse_refresh(Some("")), 0);
        assert_eq!(parse_refresh(Some("0")), 0);
        assert_eq!(parse_refresh(Some("-5")), 0);
        assert_eq!(parse_refresh(Some("abc")), 0);
        assert_eq!(parse_refresh(Some("true")), 15);
        assert_eq!(parse_refresh(Some("10")), 15);
        assert_eq!(parse_refresh(Some("20")), 20);
        assert_eq!(parse_refresh(Some("45s")), 45);
        assert_eq!(parse_refresh(Some(" 30")), 30);
    }

    #[test]
    fn test_refresh_interval_in_milliseconds() {
        let options = WidgetOptions::from_attributes(&attrs(&[("refresh", "20")]));
        assert_eq!(options.refresh_interval(), Duration::from_millis(20_000));
        assert_eq!(WidgetOptions::default().refresh_interval(), Duration::ZERO);
    }

    #[test]
    fn test_defaults() {
        let options = WidgetOptions::default();
        assert_eq!(options.language, "en");
        assert_eq!(options.logo_base_url, "https://media-api.anymal.xyz");
        assert_eq!(options.games_style, "1");
        assert!(options.show_toolbar);
        assert!(!options.show_logos);
        assert!(!options.show_error);
        assert_eq!(options.flags, FeatureFlags::default());
        assert_eq!(options.refresh_seconds, 0);
    }

    #[test]
    fn test_show_toolbar_can_be_disabled() {
        let options = WidgetOptions::from_attributes(&attrs(&[("show-toolbar", "false")]));
        assert!(!options.show_toolbar);
    }

    #[test]
    fn test_country_is_lowercased() {
        let options = WidgetOptions::from_attributes(&attrs(&[("country", "Brazil")]));
        assert_eq!(options.country, "brazil");
    }

    #[test]
    fn test_invalid_time_zone_is_replaced() {
        let options = WidgetOptions::from_attributes(&attrs(&[("timezone", "Nowhere/City")]));
        assert_eq!(options.time_zone, crate::formatting::host_time_zone());

        let options = WidgetOptions::from_attributes(&attrs(&[("timezone", "America/Sao_Paulo")]));
        assert_eq!(options.time_zone, chrono_tz::America::Sao_Paulo);
    }

    #[test]
    fn test_custom_base_url_for_sport() {
        let options = WidgetOptions::from_attributes(&attrs(&[
            ("url-hockey", "https://proxy.example.com/hockey"),
            ("url-rugby", ""),
        ]));
        assert_eq!(
            options.api_base_url(Sport::Hockey),
            "https://proxy.example.com/hockey/"
        );
        assert_eq!(options.api_base_url(Sport::Rugby), "https://rugby.api.anymal.xyz/");
        assert_eq!(options.custom_base_urls.len(), 1);
    }

    #[test]
    fn test_detail_id_takes_first_present() {
        let options = WidgetOptions::from_attributes(&attrs(&[("race-id", "7"), ("fight-id", "")]));
        assert_eq!(options.detail_id(), Some("7"));

        let options = WidgetOptions::from_attributes(&attrs(&[("game-id", "1"), ("race-id", "7")]));
        assert_eq!(options.detail_id(), Some("1"));
    }

    #[test]
    fn test_local_attribute_overrides_shared() {
        let shared = SharedConfig::new(attrs(&[("sport", "hockey"), ("lang", "pt"), ("league", "57")]));
        let local = attrs(&[("sport", "football")]);

        let normalized = normalize(Some(&shared), &local);

        assert_eq!(normalized.sport, "football");
        assert_eq!(normalized.options.language, "pt");
        assert_eq!(normalized.options.league.as_deref(), Some("57"));
    }

    #[test]
    fn test_normalize_without_shared_config() {
        let normalized = normalize(None, &attrs(&[("type", "standings")]));
        assert_eq!(normalized.sport, "");
        assert_eq!(normalized.widget_type, "standings");
        assert!(normalized.custom_translations.is_none());
    }

    #[test]
    fn test_shared_custom_translations_are_carried() {
        let shared = SharedConfig::default()
            .with_custom_translations(serde_json::json!({"today": "Heute"}));
        let normalized = normalize(Some(&shared), &AttributeSet::new());
        assert_eq!(
            normalized.custom_translations,
            Some(serde_json::json!({"today": "Heute"}))
        );
    }

    #[test]
    fn test_write_back_skips_type_and_empty_values() {
        let shared = SharedConfig::new(attrs(&[("lang", "pt"), ("data-mystery", "42")]));
        let local = attrs(&[("type", "team"), ("team-id", "33"), ("league", "")]);

        let written = normalize(Some(&shared), &local).write_back();

        assert_eq!(written.get("type"), None);
        assert_eq!(written.get("league"), None);
        assert_eq!(written.get("team-id"), Some("33"));
        assert_eq!(written.get("lang"), Some("pt"));
        assert_eq!(written.get("mystery"), Some("42"));
        assert_eq!(written.get("show-toolbar"), Some("true"));
        assert_eq!(written.get("logo-url"), Some("https://media-api.anymal.xyz"));
    }

    #[test]
    fn test_unrecognized_attributes_pass_through() {
        let normalized = normalize(None, &attrs(&[("team", "50")]));
        assert_eq!(normalized.attributes.get("team"), Some("50"));
    }
}
