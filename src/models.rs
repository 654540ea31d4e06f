/// Typed records of the sports-data API
///
/// Every field is optional: the API shape differs between sports and the widgets
/// only read what is present. Missing fields fall back to `Default`.
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Response envelope shared by every endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default = "Vec::new")]
    pub response: Vec<T>,
}

/// A string or number, kept as its textual form
///
/// Identifiers and counters arrive as either depending on the sport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Scalar(pub String);

impl Scalar {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar(value.to_string())
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Scalar(match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }))
    }
}

fn display_or<'a>(value: &'a Option<Scalar>, fallback: &'a str) -> &'a str {
    value.as_ref().map(Scalar::as_str).unwrap_or(fallback)
}

// Fixtures

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Fixture {
    pub fixture: Option<FixtureInfo>,
    pub league: Option<LeagueRef>,
    pub teams: Teams,
    pub goals: Score,
    pub scores: Option<Score>,
    pub events: Vec<MatchEvent>,
    pub lineups: Vec<Lineup>,
    pub statistics: Vec<TeamMatchStatistics>,
    // Sports other than football carry these at the top level
    pub id: Option<Scalar>,
    pub date: Option<String>,
    pub status: Option<FixtureStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FixtureInfo {
    pub id: Option<Scalar>,
    pub date: Option<String>,
    pub status: Option<FixtureStatus>,
    pub venue: Option<Venue>,
    pub referee: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FixtureStatus {
    pub long: Option<String>,
    pub short: Option<String>,
    pub elapsed: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Venue {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<Scalar>,
    pub surface: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LeagueRef {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub logo: Option<String>,
    pub flag: Option<String>,
    pub season: Option<Scalar>,
    pub round: Option<String>,
    pub standings: Vec<Vec<StandingRow>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Teams {
    pub home: Option<TeamRef>,
    pub away: Option<TeamRef>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamRef {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub logo: Option<String>,
    pub winner: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Score {
    pub home: Option<Scalar>,
    pub away: Option<Scalar>,
}

impl Score {
    pub fn home_display(&self) -> &str {
        display_or(&self.home, "-")
    }

    pub fn away_display(&self) -> &str {
        display_or(&self.away, "-")
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchEvent {
    pub time: EventTime,
    pub team: Option<TeamRef>,
    pub player: Option<PersonRef>,
    pub assist: Option<PersonRef>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EventTime {
    pub elapsed: Option<Scalar>,
    pub extra: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PersonRef {
    pub id: Option<Scalar>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Lineup {
    pub team: Option<TeamRef>,
    pub formation: Option<String>,
    #[serde(rename = "startXI")]
    pub start_xi: Vec<LineupSlot>,
    pub substitutes: Vec<LineupSlot>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LineupSlot {
    pub player: LineupPlayer,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LineupPlayer {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub number: Option<Scalar>,
    pub pos: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamMatchStatistics {
    pub team: Option<TeamRef>,
    pub statistics: Vec<StatisticValue>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StatisticValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<Scalar>,
}

impl StatisticValue {
    pub fn value_display(&self) -> &str {
        display_or(&self.value, "0")
    }
}

impl Fixture {
    /// Fixture identifier, wherever the sport puts it
    pub fn id(&self) -> Option<&str> {
        self.fixture
            .as_ref()
            .and_then(|f| f.id.as_ref())
            .or(self.id.as_ref())
            .map(Scalar::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn date(&self) -> Option<&str> {
        self.fixture
            .as_ref()
            .and_then(|f| f.date.as_deref())
            .or(self.date.as_deref())
    }

    pub fn status(&self) -> Option<&FixtureStatus> {
        self.fixture
            .as_ref()
            .and_then(|f| f.status.as_ref())
            .or(self.status.as_ref())
    }

    /// Short status code, `NS` when absent
    pub fn status_short(&self) -> &str {
        self.status()
            .and_then(|s| s.short.as_deref())
            .unwrap_or("NS")
    }

    /// Score shown for the fixture, `goals` first then `scores`
    pub fn score(&self) -> &Score {
        match (&self.goals, &self.scores) {
            (goals, _) if goals.home.is_some() || goals.away.is_some() => goals,
            (_, Some(scores)) => scores,
            (goals, None) => goals,
        }
    }

    pub fn home_team(&self) -> Option<&TeamRef> {
        self.teams.home.as_ref()
    }

    pub fn away_team(&self) -> Option<&TeamRef> {
        self.teams.away.as_ref()
    }

    /// `home-away` team pair used by the head-to-head endpoint
    pub fn head_to_head_key(&self) -> Option<String> {
        let home = self.home_team()?.id.as_ref().filter(|id| !id.is_empty())?;
        let away = self.away_team()?.id.as_ref().filter(|id| !id.is_empty())?;
        Some(format!("{}-{}", home, away))
    }
}

// Teams

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamEntry {
    pub team: TeamInfo,
    pub venue: Option<Venue>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamInfo {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub country: Option<String>,
    pub founded: Option<Scalar>,
    pub national: Option<bool>,
    pub logo: Option<String>,
    pub coach: Option<String>,
    pub stadium: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamStatistics {
    pub league: Option<LeagueRef>,
    pub team: Option<TeamRef>,
    pub form: Option<String>,
    pub fixtures: Option<FixtureTotals>,
    pub goals: Option<GoalTotals>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FixtureTotals {
    pub played: Split,
    pub wins: Split,
    pub draws: Split,
    pub loses: Split,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Split {
    pub home: Option<Scalar>,
    pub away: Option<Scalar>,
    pub total: Option<Scalar>,
}

impl Split {
    pub fn total_display(&self) -> &str {
        display_or(&self.total, "0")
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GoalTotals {
    #[serde(rename = "for")]
    pub scored: GoalSplit,
    pub against: GoalSplit,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GoalSplit {
    pub total: Split,
}

/// One item of the squads response
///
/// Football nests players under their team; other sports list players directly.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SquadEntry {
    Team {
        #[serde(default)]
        team: Option<TeamRef>,
        players: Vec<SquadPlayer>,
    },
    Player(SquadPlayer),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SquadPlayer {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub age: Option<Scalar>,
    pub number: Option<Scalar>,
    pub position: Option<String>,
    pub photo: Option<String>,
}

/// Flatten squad items into their players
pub fn squad_players(entries: Vec<SquadEntry>) -> Vec<SquadPlayer> {
    entries
        .into_iter()
        .flat_map(|entry| match entry {
            SquadEntry::Team { players, .. } => players,
            SquadEntry::Player(player) => vec![player],
        })
        .collect()
}

// Leagues

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LeagueEntry {
    pub league: LeagueRef,
    pub country: Option<Country>,
    pub seasons: Vec<SeasonInfo>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Country {
    pub name: Option<String>,
    pub code: Option<String>,
    pub flag: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SeasonInfo {
    pub year: Option<Scalar>,
    pub current: Option<bool>,
}

// Standings

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StandingsEntry {
    pub league: LeagueRef,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StandingRow {
    pub rank: Option<Scalar>,
    pub team: TeamRef,
    pub points: Option<Scalar>,
    #[serde(rename = "goalsDiff")]
    pub goals_diff: Option<i64>,
    pub group: Option<String>,
    pub form: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub all: RecordLine,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RecordLine {
    pub played: Option<Scalar>,
    pub win: Option<Scalar>,
    pub draw: Option<Scalar>,
    pub lose: Option<Scalar>,
    pub goals: RecordGoals,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RecordGoals {
    #[serde(rename = "for")]
    pub scored: Option<Scalar>,
    pub against: Option<Scalar>,
}

impl RecordLine {
    pub fn cell(value: &Option<Scalar>) -> &str {
        display_or(value, "0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_response_is_empty() {
        let envelope: Envelope<Fixture> = serde_json::from_str(r#"{"errors": []}"#).unwrap();
        assert!(envelope.response.is_empty());
    }

    #[test]
    fn test_scalar_accepts_numbers_and_strings() {
        let values: Vec<Scalar> = serde_json::from_str(r#"[33, "33", null, 1.5]"#).unwrap();
        assert_eq!(values[0].as_str(), "33");
        assert_eq!(values[1].as_i64(), Some(33));
        assert!(values[2].is_empty());
        assert_eq!(values[3].as_str(), "1.5");
    }

    #[test]
    fn test_football_fixture_accessors() {
        let json = r#"{
            "fixture": {"id": 1035, "date": "2025-03-15T15:00:00+00:00",
                        "status": {"long": "Halftime", "short": "HT", "elapsed": 45}},
            "league": {"id": 39, "name": "Premier League", "round": "Regular Season - 28"},
            "teams": {"home": {"id": 33, "name": "Manchester United"},
                      "away": {"id": 34, "name": "Newcastle"}},
            "goals": {"home": 1, "away": null},
            "lineups": [{"formation": "4-2-3-1", "startXI": [{"player": {"name": "Onana", "number": 24, "pos": "G"}}]}]
        }"#;
        let fixture: Fixture = serde_json::from_str(json).unwrap();

        assert_eq!(fixture.id(), Some("1035"));
        assert_eq!(fixture.status_short(), "HT");
        assert_eq!(fixture.score().home_display(), "1");
        assert_eq!(fixture.score().away_display(), "-");
        assert_eq!(fixture.head_to_head_key(), Some("33-34".to_string()));
        assert_eq!(fixture.lineups[0].start_xi[0].player.pos.as_deref(), Some("G"));
    }

    #[test]
    fn test_top_level_fixture_fields() {
        let json = r#"{"id": "77", "date": "2025-03-15T19:00:00+00:00",
                       "status": {"short": "FT"}, "scores": {"home": 101, "away": 99}}"#;
        let fixture: Fixture = serde_json::from_str(json).unwrap();

        assert_eq!(fixture.id(), Some("77"));
        assert_eq!(fixture.status_short(), "FT");
        assert_eq!(fixture.score().home_display(), "101");
        assert_eq!(fixture.head_to_head_key(), None);
    }

    #[test]
    fn test_squad_entries_flatten() {
        let json = r#"[
            {"team": {"id": 33}, "players": [{"id": 1, "name": "A", "position": "Goalkeeper"},
                                               {"id": 2, "name": "B", "position": "Defender"}]},
            {"id": 3, "name": "C", "position": "Guard"}
        ]"#;
        let entries: Vec<SquadEntry> = serde_json::from_str(json).unwrap();
        let players = squad_players(entries);

        assert_eq!(players.len(), 3);
        assert_eq!(players[2].position.as_deref(), Some("Guard"));
    }

    #[test]
    fn test_standing_row_fields() {
        let json = r#"{"rank": 1, "team": {"id": 40, "name": "Liverpool"}, "points": 70,
                       "goalsDiff": -3, "form": "WWDLW", "description": "Promotion - Champions League",
                       "all": {"played": 29, "win": 21, "draw": 7, "lose": 1, "goals": {"for": 69, "against": 27}}}"#;
        let row: StandingRow = serde_json::from_str(json).unwrap();

        assert_eq!(row.goals_diff, Some(-3));
        assert_eq!(RecordLine::cell(&row.all.goals.scored), "69");
        assert_eq!(RecordLine::cell(&row.all.goals.against), "27");
    }

    #[test]
    fn test_team_statistics_totals() {
        let json = r#"{"fixtures": {"played": {"total": 28}, "wins": {"total": 10}},
                       "goals": {"for": {"total": {"total": 38}}, "against": {"total": {"total": 40}}}}"#;
        let stats: TeamStatistics = serde_json::from_str(json).unwrap();
        let fixtures = stats.fixtures.unwrap();

        assert_eq!(fixtures.played.total_display(), "28");
        assert_eq!(fixtures.draws.total_display(), "0");
        assert_eq!(stats.goals.unwrap().scored.total.total_display(), "38");
    }
}
