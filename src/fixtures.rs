/// Mock fixture data for testing and development
///
/// This module provides consistent, deterministic data that can be used for:
/// 1. Unit tests - ensuring tests have predictable data
/// 2. Development mock mode - rendering widgets without network access
/// 3. Benchmarks - providing consistent data for performance testing
use crate::models::{
    Country, Fixture, FixtureInfo, FixtureStatus, FixtureTotals, GoalSplit, GoalTotals,
    LeagueEntry, LeagueRef, Lineup, LineupPlayer, LineupSlot, MatchEvent, EventTime, PersonRef,
    RecordGoals, RecordLine, Scalar, Score, SeasonInfo, Split, SquadEntry, SquadPlayer,
    StandingRow, StandingsEntry, StatisticValue, TeamEntry, TeamInfo, TeamMatchStatistics,
    TeamRef, TeamStatistics, Teams, Venue,
};

/// Date used when a request carries none
pub const DEFAULT_FIXTURE_DATE: &str = "2025-03-15";

fn scalar(value: i64) -> Option<Scalar> {
    Some(Scalar::from(value))
}

fn team_ref(id: i64, name: &str) -> TeamRef {
    TeamRef {
        id: scalar(id),
        name: Some(name.to_string()),
        logo: Some(format!("https://media-api.anymal.xyz/teams/{}.png", id)),
        winner: None,
    }
}

fn league_ref(id: i64, name: &str, country: &str) -> LeagueRef {
    LeagueRef {
        id: scalar(id),
        name: Some(name.to_string()),
        country: Some(country.to_string()),
        logo: Some(format!("https://media-api.anymal.xyz/leagues/{}.png", id)),
        season: scalar(2024),
        round: Some("Regular Season - 28".to_string()),
        ..Default::default()
    }
}

fn status(short: &str, long: &str) -> Option<FixtureStatus> {
    Some(FixtureStatus {
        long: Some(long.to_string()),
        short: Some(short.to_string()),
        elapsed: None,
    })
}

/// Helper to create a mock fixture
pub fn create_mock_fixture(
    id: i64,
    date: &str,
    league: LeagueRef,
    home: TeamRef,
    away: TeamRef,
    short_status: &str,
    goals: Option<(i64, i64)>,
) -> Fixture {
    let long = match short_status {
        "FT" => "Match Finished",
        "1H" => "First Half",
        "HT" => "Halftime",
        "2H" => "Second Half",
        _ => "Not Started",
    };
    Fixture {
        fixture: Some(FixtureInfo {
            id: scalar(id),
            date: Some(format!("{}T15:00:00+00:00", date)),
            status: status(short_status, long),
            venue: Some(Venue {
                name: Some("Old Trafford".to_string()),
                city: Some("Manchester".to_string()),
                ..Default::default()
            }),
            referee: None,
        }),
        league: Some(league),
        teams: Teams {
            home: Some(home),
            away: Some(away),
        },
        goals: Score {
            home: goals.and_then(|(h, _)| scalar(h)),
            away: goals.and_then(|(_, a)| scalar(a)),
        },
        ..Default::default()
    }
}

/// Create mock fixtures for a date, in two leagues and various states
pub fn create_mock_fixtures(date: Option<&str>) -> Vec<Fixture> {
    let date = date.unwrap_or(DEFAULT_FIXTURE_DATE);
    let premier = league_ref(39, "Premier League", "England");
    let liga = league_ref(140, "La Liga", "Spain");

    vec![
        create_mock_fixture(
            1001,
            date,
            premier.clone(),
            team_ref(33, "Manchester United"),
            team_ref(34, "Newcastle"),
            "FT",
            Some((2, 1)),
        ),
        create_mock_fixture(
            1002,
            date,
            premier,
            team_ref(40, "Liverpool"),
            team_ref(50, "Manchester City"),
            "1H",
            Some((0, 0)),
        ),
        create_mock_fixture(
            1003,
            date,
            liga.clone(),
            team_ref(529, "Barcelona"),
            team_ref(541, "Real Madrid"),
            "NS",
            None,
        ),
        create_mock_fixture(
            1004,
            date,
            liga,
            team_ref(530, "Atletico Madrid"),
            team_ref(536, "Sevilla"),
            "HT",
            Some((1, 1)),
        ),
    ]
}

/// Create a detailed fixture with events, lineups and statistics
pub fn create_mock_game_detail(id: &str) -> Fixture {
    let home = team_ref(33, "Manchester United");
    let away = team_ref(34, "Newcastle");
    let mut fixture = create_mock_fixture(
        id.parse().unwrap_or(1001),
        DEFAULT_FIXTURE_DATE,
        league_ref(39, "Premier League", "England"),
        home.clone(),
        away.clone(),
        "FT",
        Some((2, 1)),
    );

    fixture.events = vec![
        MatchEvent {
            time: EventTime {
                elapsed: scalar(23),
                extra: None,
            },
            team: Some(home.clone()),
            player: Some(PersonRef {
                id: scalar(909),
                name: Some("B. Fernandes".to_string()),
            }),
            assist: Some(PersonRef {
                id: scalar(18),
                name: Some("M. Rashford".to_string()),
            }),
            kind: Some("Goal".to_string()),
            detail: Some("Normal Goal".to_string()),
        },
        MatchEvent {
            time: EventTime {
                elapsed: scalar(45),
                extra: scalar(2),
            },
            team: Some(away.clone()),
            player: Some(PersonRef {
                id: scalar(2864),
                name: Some("B. Guimaraes".to_string()),
            }),
            assist: None,
            kind: Some("Card".to_string()),
            detail: Some("Yellow Card".to_string()),
        },
    ];

    let slot = |number: i64, name: &str, pos: &str| LineupSlot {
        player: LineupPlayer {
            id: scalar(number * 100),
            name: Some(name.to_string()),
            number: scalar(number),
            pos: Some(pos.to_string()),
        },
    };
    fixture.lineups = vec![
        Lineup {
            team: Some(home.clone()),
            formation: Some("4-2-3-1".to_string()),
            start_xi: vec![slot(24, "A. Onana", "G"), slot(5, "H. Maguire", "D")],
            substitutes: vec![slot(1, "A. Bayindir", "G")],
        },
        Lineup {
            team: Some(away.clone()),
            formation: Some("4-3-3".to_string()),
            start_xi: vec![slot(22, "N. Pope", "G"), slot(33, "D. Burn", "D")],
            substitutes: Vec::new(),
        },
    ];

    let stat = |kind: &str, value: i64| StatisticValue {
        kind: kind.to_string(),
        value: scalar(value),
    };
    fixture.statistics = vec![
        TeamMatchStatistics {
            team: Some(home),
            statistics: vec![stat("Shots on Goal", 6), stat("Corner Kicks", 4)],
        },
        TeamMatchStatistics {
            team: Some(away),
            statistics: vec![stat("Shots on Goal", 3), stat("Corner Kicks", 7)],
        },
    ];

    fixture
}

/// Create previous meetings of two teams
pub fn create_mock_head_to_head() -> Vec<Fixture> {
    let premier = league_ref(39, "Premier League", "England");
    vec![
        create_mock_fixture(
            901,
            "2024-12-30",
            premier.clone(),
            team_ref(34, "Newcastle"),
            team_ref(33, "Manchester United"),
            "FT",
            Some((2, 0)),
        ),
        create_mock_fixture(
            902,
            "2024-05-15",
            premier,
            team_ref(33, "Manchester United"),
            team_ref(34, "Newcastle"),
            "FT",
            Some((3, 2)),
        ),
    ]
}

/// Create a team with its venue
pub fn create_mock_team(id: &str) -> TeamEntry {
    TeamEntry {
        team: TeamInfo {
            id: Some(Scalar::from(id)),
            name: Some("Manchester United".to_string()),
            code: Some("MUN".to_string()),
            country: Some("England".to_string()),
            founded: scalar(1878),
            national: Some(false),
            logo: Some(format!("https://media-api.anymal.xyz/teams/{}.png", id)),
            coach: None,
            stadium: None,
        },
        venue: Some(Venue {
            id: scalar(556),
            name: Some("Old Trafford".to_string()),
            address: Some("Sir Matt Busby Way".to_string()),
            city: Some("Manchester".to_string()),
            capacity: scalar(76212),
            surface: Some("grass".to_string()),
            image: Some("https://media-api.anymal.xyz/venues/556.png".to_string()),
        }),
    }
}

/// Create season statistics for a team
pub fn create_mock_team_statistics() -> TeamStatistics {
    let split = |home: i64, away: i64| Split {
        home: scalar(home),
        away: scalar(away),
        total: scalar(home + away),
    };
    TeamStatistics {
        league: Some(league_ref(39, "Premier League", "England")),
        team: Some(team_ref(33, "Manchester United")),
        form: Some("WDLWW".to_string()),
        fixtures: Some(FixtureTotals {
            played: split(14, 14),
            wins: split(6, 4),
            draws: split(3, 4),
            loses: split(5, 6),
        }),
        goals: Some(GoalTotals {
            scored: GoalSplit {
                total: split(20, 18),
            },
            against: GoalSplit {
                total: split(19, 21),
            },
        }),
    }
}

/// Create a football-style squad (players nested under their team)
pub fn create_mock_squad() -> Vec<SquadEntry> {
    let player = |id: i64, name: &str, number: i64, age: i64, position: &str| SquadPlayer {
        id: scalar(id),
        name: Some(name.to_string()),
        age: scalar(age),
        number: scalar(number),
        position: Some(position.to_string()),
        photo: None,
    };
    vec![SquadEntry::Team {
        team: Some(team_ref(33, "Manchester United")),
        players: vec![
            player(50132, "A. Onana", 24, 28, "Goalkeeper"),
            player(2935, "H. Maguire", 5, 31, "Defender"),
            player(909, "B. Fernandes", 8, 30, "Midfielder"),
            player(18, "M. Rashford", 10, 27, "Attacker"),
        ],
    }]
}

/// Create leagues of a few countries
pub fn create_mock_leagues() -> Vec<LeagueEntry> {
    let entry = |id: i64, name: &str, country: &str| LeagueEntry {
        league: league_ref(id, name, country),
        country: Some(Country {
            name: Some(country.to_string()),
            code: None,
            flag: None,
        }),
        seasons: vec![SeasonInfo {
            year: scalar(2024),
            current: Some(true),
        }],
    };
    vec![
        entry(39, "Premier League", "England"),
        entry(40, "Championship", "England"),
        entry(140, "La Liga", "Spain"),
        entry(71, "Serie A", "Brazil"),
    ]
}

/// Create a league table with zone descriptions
pub fn create_mock_standings(league: &str, season: Option<&str>) -> Vec<StandingsEntry> {
    let row = |rank: i64,
               team: TeamRef,
               points: i64,
               diff: i64,
               form: &str,
               description: Option<&str>| StandingRow {
        rank: scalar(rank),
        team,
        points: scalar(points),
        goals_diff: Some(diff),
        group: Some("Premier League".to_string()),
        form: Some(form.to_string()),
        status: Some("same".to_string()),
        description: description.map(str::to_string),
        all: RecordLine {
            played: scalar(29),
            win: scalar(points / 3),
            draw: scalar(points % 3),
            lose: scalar(29 - points / 3 - points % 3),
            goals: RecordGoals {
                scored: scalar(40 + diff.max(0)),
                against: scalar(40 - diff.min(0)),
            },
        },
    };

    let mut league_info = league_ref(league.parse().unwrap_or(39), "Premier League", "England");
    if let Some(season) = season {
        league_info.season = Some(Scalar::from(season));
    }
    league_info.standings = vec![vec![
        row(1, team_ref(40, "Liverpool"), 70, 42, "WWDWW", Some("Promotion - Champions League (League phase: )")),
        row(2, team_ref(42, "Arsenal"), 58, 29, "WDWLW", Some("Promotion - Champions League (League phase: )")),
        row(3, team_ref(65, "Nottingham Forest"), 54, 12, "LWWDW", Some("Promotion - Europa League (League phase: )")),
        row(18, team_ref(57, "Ipswich"), 17, -33, "LLDLL", Some("Relegation - Championship")),
        row(19, team_ref(33, "Manchester United"), 37, 0, "DLWDL", None),
    ]];

    vec![StandingsEntry {
        league: league_info,
    }]
}
