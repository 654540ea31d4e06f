/// Remote API endpoints and default per-sport base URLs
use crate::types::Sport;

/// Base URL for team, player and league images
pub const DEFAULT_LOGO_BASE_URL: &str = "https://media-api.anymal.xyz";

/// Default API base URL for a sport (always ends with `/`)
pub fn default_endpoint(sport: Sport) -> &'static str {
    match sport {
        Sport::Football => "https://api.anymal.xyz/",
        Sport::Basketball => "https://basketball.api.anymal.xyz/",
        Sport::Baseball => "https://baseball.api.anymal.xyz/",
        Sport::Handball => "https://handball.api.anymal.xyz/",
        Sport::Volleyball => "https://volleyball.api.anymal.xyz/",
        Sport::Hockey => "https://hockey.api.anymal.xyz/",
        Sport::Rugby => "https://rugby.api.anymal.xyz/",
        Sport::Afl => "https://afl.api.anymal.xyz/",
        Sport::Mma => "https://mma.api.anymal.xyz/",
        Sport::F1 => "https://formula-1.api.anymal.xyz/",
    }
}

/// Resolve the base URL for a sport, preferring a non-empty override
pub fn resolve_endpoint(sport: Sport, custom: Option<&str>) -> String {
    match custom.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) if url.ends_with('/') => url.to_string(),
        Some(url) => format!("{}/", url),
        None => default_endpoint(sport).to_string(),
    }
}

/// Paths of the sports-data API, relative to the sport's base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Teams,
    TeamStatistics,
    Squads,
    Leagues,
    Fixtures,
    HeadToHead,
    Standings,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Teams => "teams",
            Endpoint::TeamStatistics => "teams/statistics",
            Endpoint::Squads => "players/squads",
            Endpoint::Leagues => "leagues",
            Endpoint::Fixtures => "fixtures",
            Endpoint::HeadToHead => "fixtures/headtohead",
            Endpoint::Standings => "standings",
        }
    }
}
