//2
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub enum Mood {
    Happy,
    Stressed,
    Anxious,
    Sad,
    Neutral,
    Calm,
}

impl Mood {
    /// Fixed dashboard ordering for the mood tally.
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Stressed,
        Mood::Anxious,
        Mood::Sad,
        Mood::Neutral,
        Mood::Calm,
    ];

    pub fn to_str(&self) -> &str {
        match self {
            Mood::Happy => "Happy",
            Mood::Stressed => "Stressed",
            Mood::Anxious => "Anxious",
            Mood::Sad => "Sad",
            Mood::Neutral => "Neutral",
            Mood::Calm => "Calm",
        }
    }

    /// Moods that feed the leader alert feed.
    pub fn is_negative(&self) -> bool {
        matches!(self, Mood::Stressed | Mood::Sad | Mood::Anxious)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MoodRecord {
    pub id: String,

    #[serde(rename = "studentId")]
    pub student_id: String,

    pub timestamp: DateTime<Utc>,
    pub mood: Mood,
    pub input: String,
    pub rating: u8,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SongRecommendation {
    pub title: String,
    pub artist: String,

    #[serde(rename = "youtubeUrl", skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnalysisResult {
    pub mood: Mood,
    pub explanation: String,
    pub recommendations: Vec<SongRecommendation>,
}
