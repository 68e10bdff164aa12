use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder for a missing round, date, team or score.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for a kickoff time that is absent or has no `HH:MM` shape.
pub const TIME_TBD: &str = "TBD";

/// A canonical fixture, as exported to the fixtures table and returned by queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(rename(deserialize = "Round"), alias = "round")]
    pub round: String,
    #[serde(rename(deserialize = "Date"), alias = "date")]
    pub date: String,
    #[serde(rename(deserialize = "Time"), alias = "time")]
    pub time: String,
    #[serde(rename(deserialize = "Team 1"), alias = "team1")]
    pub team1: String,
    #[serde(rename(deserialize = "Team 2"), alias = "team2")]
    pub team2: String,
    #[serde(rename(deserialize = "League"), alias = "league")]
    pub league: String,
    #[serde(
        rename(deserialize = "Score"),
        alias = "score",
        default = "not_available"
    )]
    pub score: String,
}

impl Fixture {
    pub fn is_tbd(&self) -> bool {
        self.time == TIME_TBD
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Fixtures of a single league, in the order the query produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueFixtures {
    pub league: String,
    pub fixtures: Vec<Fixture>,
}

/// Score as it appears in a feed record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RawScore {
    /// Structured result with a two-element full-time pair.
    FullTime { home: String, away: String },
    /// Free-form, non-empty score text.
    Text(String),
    #[default]
    Pending,
}

impl RawScore {
    pub fn is_completed(&self) -> bool {
        !matches!(self, RawScore::Pending)
    }
}

impl From<Value> for RawScore {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) if !s.is_empty() => RawScore::Text(s),
            Value::Object(map) => match map.get("ft") {
                Some(Value::Array(pair)) if pair.len() == 2 => RawScore::FullTime {
                    home: scalar_to_string(&pair[0]).unwrap_or_default(),
                    away: scalar_to_string(&pair[1]).unwrap_or_default(),
                },
                _ => RawScore::Pending,
            },
            _ => RawScore::Pending,
        }
    }
}

impl<'de> Deserialize<'de> for RawScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(RawScore::from)
    }
}

/// A match record exactly as the feed provides it. Fields with an unexpected
/// JSON type are treated as absent instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawMatch {
    #[serde(default, deserialize_with = "lenient_string")]
    pub round: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team1: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team2: Option<String>,
    #[serde(default)]
    pub score: RawScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRound {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default)]
    pub matches: Vec<RawMatch>,
}

/// The two layouts a league feed can take. Resolved once per file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FeedDocument {
    Rounds {
        #[serde(default, deserialize_with = "lenient_string")]
        name: Option<String>,
        rounds: Vec<RawRound>,
    },
    Flat {
        #[serde(default, deserialize_with = "lenient_string")]
        name: Option<String>,
        matches: Vec<RawMatch>,
    },
}

impl FeedDocument {
    pub fn name(&self) -> Option<&str> {
        match self {
            FeedDocument::Rounds { name, .. } | FeedDocument::Flat { name, .. } => name.as_deref(),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}
