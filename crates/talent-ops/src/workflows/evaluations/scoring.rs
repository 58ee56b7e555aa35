use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// The ten soft-skill traits rated on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKey {
    Accountability,
    Compliance,
    Learnability,
    Ambitious,
    AbstractThinking,
    Communication,
    Curiosity,
    English,
    SecondOrderThinking,
    FirstPrincipleThinking,
}

impl TraitKey {
    pub const ALL: [TraitKey; 10] = [
        TraitKey::Accountability,
        TraitKey::Compliance,
        TraitKey::Learnability,
        TraitKey::Ambitious,
        TraitKey::AbstractThinking,
        TraitKey::Communication,
        TraitKey::Curiosity,
        TraitKey::English,
        TraitKey::SecondOrderThinking,
        TraitKey::FirstPrincipleThinking,
    ];

    /// Column name in the evaluations table.
    pub const fn column(self) -> &'static str {
        match self {
            TraitKey::Accountability => "skill_accountability",
            TraitKey::Compliance => "skill_compliance",
            TraitKey::Learnability => "skill_learnability",
            TraitKey::Ambitious => "skill_ambitious",
            TraitKey::AbstractThinking => "skill_abstract_thinking",
            TraitKey::Communication => "skill_communication",
            TraitKey::Curiosity => "skill_curiosity",
            TraitKey::English => "skill_english",
            TraitKey::SecondOrderThinking => "skill_second_order_thinking",
            TraitKey::FirstPrincipleThinking => "skill_first_principle_thinking",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TraitKey::Accountability => "Accountability",
            TraitKey::Compliance => "Compliance",
            TraitKey::Learnability => "Learnability",
            TraitKey::Ambitious => "Ambitious",
            TraitKey::AbstractThinking => "Abstract Thinking",
            TraitKey::Communication => "Communication",
            TraitKey::Curiosity => "Curiosity",
            TraitKey::English => "English",
            TraitKey::SecondOrderThinking => "Second-Order Thinking",
            TraitKey::FirstPrincipleThinking => "First-Principle Thinking",
        }
    }

    /// Accepts the enum name (`abstract_thinking`), the column name
    /// (`skill_abstract_thinking`) or a few spoken forms.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let key = normalized.strip_prefix("skill_").unwrap_or(&normalized);
        let found = match key {
            "accountability" => TraitKey::Accountability,
            "compliance" => TraitKey::Compliance,
            "learnability" => TraitKey::Learnability,
            "ambitious" | "ambition" => TraitKey::Ambitious,
            "abstract_thinking" => TraitKey::AbstractThinking,
            "communication" => TraitKey::Communication,
            "curiosity" => TraitKey::Curiosity,
            "english" | "english_proficiency" => TraitKey::English,
            "second_order_thinking" => TraitKey::SecondOrderThinking,
            "first_principle_thinking" | "first_principles_thinking" => {
                TraitKey::FirstPrincipleThinking
            }
            _ => return None,
        };
        Some(found)
    }
}

/// Trait ratings for one evaluation. Unusable values are never stored, so
/// every rating held here is finite and inside `[0, 10]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RatingSet {
    ratings: BTreeMap<TraitKey, f64>,
}

impl RatingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: TraitKey, rating: f64) -> Self {
        self.set(key, Some(rating));
        self
    }

    /// Store `rating`; `None` and out-of-range values clear the trait.
    pub fn set(&mut self, key: TraitKey, rating: Option<f64>) {
        match rating.filter(|value| is_usable(*value)) {
            Some(value) => {
                self.ratings.insert(key, value);
            }
            None => {
                self.ratings.remove(&key);
            }
        }
    }

    /// Form input path: text that does not parse as a number clears the trait.
    pub fn set_input(&mut self, key: TraitKey, raw: &str) {
        self.set(key, raw.trim().parse::<f64>().ok());
    }

    pub fn get(&self, key: TraitKey) -> Option<f64> {
        self.ratings.get(&key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitKey, f64)> + '_ {
        self.ratings.iter().map(|(key, value)| (*key, *value))
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl FromIterator<(TraitKey, f64)> for RatingSet {
    fn from_iter<I: IntoIterator<Item = (TraitKey, f64)>>(iter: I) -> Self {
        let mut set = RatingSet::default();
        for (key, value) in iter {
            set.set(key, Some(value));
        }
        set
    }
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && (MIN_RATING..=MAX_RATING).contains(&value)
}

/// Unknown trait names and unusable values are dropped rather than rejected.
impl<'de> Deserialize<'de> for RatingSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<serde_json::Value>>::deserialize(deserializer)?;
        let mut set = RatingSet::default();
        for (name, value) in raw {
            let Some(key) = TraitKey::parse(&name) else {
                continue;
            };
            let number = match value {
                Some(serde_json::Value::Number(number)) => number.as_f64(),
                Some(serde_json::Value::String(text)) => text.trim().parse::<f64>().ok(),
                _ => None,
            };
            set.set(key, number);
        }
        Ok(set)
    }
}

/// Mean of the ratings strictly above zero. A zero rating counts as "not yet
/// rated". Returns `None` when nothing is rated.
pub fn aggregate(ratings: &RatingSet) -> Option<f64> {
    let rated: Vec<f64> = ratings
        .iter()
        .map(|(_, value)| value)
        .filter(|value| *value > 0.0)
        .collect();

    if rated.is_empty() {
        return None;
    }
    Some(rated.iter().sum::<f64>() / rated.len() as f64)
}

/// Display band for a 0-10 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    Danger,
    Caution,
    Warning,
    Good,
}

impl ColorBand {
    pub const fn label(self) -> &'static str {
        match self {
            ColorBand::Danger => "danger",
            ColorBand::Caution => "caution",
            ColorBand::Warning => "warning",
            ColorBand::Good => "good",
        }
    }
}

pub fn color_band(score: Option<f64>) -> ColorBand {
    match score {
        Some(value) if value >= 8.0 => ColorBand::Good,
        Some(value) if value >= 6.0 => ColorBand::Warning,
        Some(value) if value >= 4.0 => ColorBand::Caution,
        _ => ColorBand::Danger,
    }
}

/// One decimal place, or `-` when there is no value.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.1}"),
        None => "-".to_string(),
    }
}
