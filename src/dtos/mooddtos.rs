use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::moodmodel::{AnalysisResult, Mood, MoodRecord, SongRecommendation};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CheckInRequestDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,

    pub input: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayableSongDto {
    pub title: String,
    pub artist: String,

    #[serde(rename = "youtubeUrl", skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,

    #[serde(rename = "videoId", skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl PlayableSongDto {
    pub fn from_song(song: &SongRecommendation) -> Self {
        PlayableSongDto {
            title: song.title.to_owned(),
            artist: song.artist.to_owned(),
            youtube_url: song.youtube_url.clone(),
            video_id: song.youtube_url.as_deref().and_then(parse_video_id),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayableAnalysisDto {
    pub mood: Mood,
    pub explanation: String,
    pub recommendations: Vec<PlayableSongDto>,
}

impl PlayableAnalysisDto {
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        PlayableAnalysisDto {
            mood: analysis.mood,
            explanation: analysis.explanation.to_owned(),
            recommendations: analysis
                .recommendations
                .iter()
                .map(PlayableSongDto::from_song)
                .collect(),
        }
    }
}

/// Accepts both youtu.be short links and youtube.com watch URLs.
fn parse_video_id(url: &str) -> Option<String> {
    if let Some(rest) = url.split("youtu.be/").nth(1) {
        let id: String = rest
            .chars()
            .take_while(|c| *c != '?' && *c != '&' && *c != '/')
            .collect();
        if !id.is_empty() {
            return Some(id);
        }
    }

    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("v="))
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentDashboardData {
    #[serde(rename = "currentMood")]
    pub current_mood: Option<MoodRecord>,

    pub history: Vec<MoodRecord>,

    #[serde(rename = "lastAnalysis")]
    pub last_analysis: Option<PlayableAnalysisDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentDashboardResponseDto {
    pub status: String,
    pub data: StudentDashboardData,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MoodStatDto {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AlertDto {
    pub id: String,

    #[serde(rename = "studentId")]
    pub student_id: String,

    #[serde(rename = "studentName")]
    pub student_name: String,

    pub mood: Mood,
    pub timestamp: DateTime<Utc>,
    pub input: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderDashboardData {
    #[serde(rename = "studentCount")]
    pub student_count: usize,

    #[serde(rename = "checkInCount")]
    pub check_in_count: usize,

    #[serde(rename = "moodStats")]
    pub mood_stats: Vec<MoodStatDto>,

    #[serde(rename = "recentAlerts")]
    pub recent_alerts: Vec<AlertDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderDashboardResponseDto {
    pub status: String,
    pub data: LeaderDashboardData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_youtube_links() {
        assert_eq!(
            parse_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            parse_video_id("https://youtu.be/dQw4w9WgXcQ?t=10"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn parses_canonical_watch_urls() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=abc123&list=xyz"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn unrecognized_urls_yield_no_id() {
        assert_eq!(parse_video_id("https://example.com/song"), None);
        assert_eq!(parse_video_id("https://www.youtube.com/watch?list=xyz"), None);
    }

    #[test]
    fn song_without_url_gets_no_video_id() {
        let song = SongRecommendation {
            title: "Weightless".to_string(),
            artist: "Marconi Union".to_string(),
            youtube_url: None,
        };
        let dto = PlayableSongDto::from_song(&song);
        assert_eq!(dto.youtube_url, None);
        assert_eq!(dto.video_id, None);
    }
}
