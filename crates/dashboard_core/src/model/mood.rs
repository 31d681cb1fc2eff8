//! Mood values and history entries.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    #[default]
    Neutral,
    Sad,
    Stressed,
    Productive,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::Stressed,
        Mood::Productive,
    ];

    /// Stable lowercase name, identical to the persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
            Self::Stressed => "stressed",
            Self::Productive => "productive",
        }
    }

    /// Display label shown next to the emoji.
    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Neutral => "Neutral",
            Self::Sad => "Sad",
            Self::Stressed => "Stressed",
            Self::Productive => "Productive",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "\u{1F60A}",
            Self::Neutral => "\u{1F610}",
            Self::Sad => "\u{1F614}",
            Self::Stressed => "\u{1F62B}",
            Self::Productive => "\u{1F680}",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownMood(value.to_string()))
    }
}

/// One logged mood. `time` is a label frozen at logging time, never re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub mood: Mood,
    pub time: String,
}

impl MoodEntry {
    pub fn new(mood: Mood, time: impl Into<String>) -> Self {
        Self {
            mood,
            time: time.into(),
        }
    }

    /// Seed history shown before anything has been logged.
    pub fn default_history() -> Vec<Self> {
        vec![
            Self::new(Mood::Happy, "10:30 AM"),
            Self::new(Mood::Productive, "Yesterday, 2:15 PM"),
            Self::new(Mood::Stressed, "Oct 12, 4:45 PM"),
            Self::new(Mood::Neutral, "Oct 11, 11:20 AM"),
        ]
    }
}
