//1
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Student,
    Leader,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Student => "STUDENT",
            UserRole::Leader => "LEADER",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub enum CheckInFrequency {
    Daily,
    Weekly,
    #[serde(rename = "Bi-weekly")]
    BiWeekly,
}

impl CheckInFrequency {
    pub fn to_str(&self) -> &str {
        match self {
            CheckInFrequency::Daily => "Daily",
            CheckInFrequency::Weekly => "Weekly",
            CheckInFrequency::BiWeekly => "Bi-weekly",
        }
    }

    /// Milliseconds between expected check-ins for this preference.
    pub fn interval_ms(&self) -> i64 {
        match self {
            CheckInFrequency::Daily => 24 * 60 * 60 * 1000,
            CheckInFrequency::Weekly => 7 * 24 * 60 * 60 * 1000,
            CheckInFrequency::BiWeekly => 14 * 24 * 60 * 60 * 1000,
        }
    }
}

impl Default for CheckInFrequency {
    fn default() -> Self {
        CheckInFrequency::Weekly
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UserSettings {
    #[serde(rename = "checkInFrequency")]
    pub check_in_frequency: CheckInFrequency,

    /// Preferred prompt time of day, "HH:mm".
    #[serde(rename = "preferredTime")]
    pub preferred_time: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            check_in_frequency: CheckInFrequency::Weekly,
            preferred_time: "09:00".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<UserSettings>,

    /// Leaders hand this code out; students present it as their vouch code.
    #[serde(rename = "referralCode", skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,

    /// The referral code of the leader who vouched for this student.
    #[serde(rename = "vouchedBy", skip_serializing_if = "Option::is_none")]
    pub vouched_by: Option<String>,
}

impl User {
    pub fn frequency(&self) -> CheckInFrequency {
        self.settings
            .as_ref()
            .map(|s| s.check_in_frequency)
            .unwrap_or_default()
    }
}
