//! Submission records from the judge API.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

/// A single submission as returned by the submissions endpoint.
///
/// The verdict is not part of the record; it lives on the jury detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    /// Submission identifier
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Problem identifier
    #[serde(deserialize_with = "string_or_number")]
    pub problem_id: String,

    /// Team identifier
    #[serde(deserialize_with = "string_or_number")]
    pub team_id: String,

    /// Submission time, e.g. `2025-02-18T16:36:10.674+01:00`
    pub time: String,

    /// Contest identifier, when the server reports one
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub contest_id: Option<String>,
}

impl Submission {
    /// Minute-granularity timestamp usable in a path.
    ///
    /// `2025-02-18T16:36:10.674+01:00` becomes `2025-02-18_16-36`.
    pub fn date_fragment(&self) -> String {
        self.time
            .chars()
            .take(16)
            .map(|c| match c {
                'T' => '_',
                ':' => '-',
                other => other,
            })
            .collect()
    }

    /// Name of the directory holding this submission's files.
    pub fn directory_name(&self, verdict: &str) -> String {
        format!(
            "{}_{}_{}_{}",
            self.id,
            self.date_fragment(),
            self.team_id,
            verdict
        )
    }
}

/// Problem identifiers selected by the caller, in the order given.
#[derive(Debug, Clone, Default)]
pub struct ProblemFilter {
    ids: Vec<String>,
    lookup: HashSet<String>,
}

impl ProblemFilter {
    /// Build a filter, dropping duplicate ids but keeping first-seen order.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::default();
        for id in ids {
            let id = id.into();
            if filter.lookup.insert(id.clone()) {
                filter.ids.push(id);
            }
        }
        filter
    }

    pub fn contains(&self, problem_id: &str) -> bool {
        self.lookup.contains(problem_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}
