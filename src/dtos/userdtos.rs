//3
use core::str;
use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::usermodel::{CheckInFrequency, User, UserRole, UserSettings};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    pub role: UserRole,

    pub branch: Option<String>,

    #[serde(rename = "vouchCode")]
    pub vouch_code: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    // Never verified against anything; the handler only rejects empty ones.
    pub password: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SettingsUpdateDto {
    #[serde(rename = "checkInFrequency")]
    pub check_in_frequency: CheckInFrequency,

    #[validate(custom = "validate_preferred_time")]
    #[serde(rename = "preferredTime")]
    pub preferred_time: String,
}

fn validate_preferred_time(value: &str) -> Result<(), ValidationError> {
    let time_regex = regex::Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$")
        .map_err(|_| ValidationError::new("Invalid time regex"))?;

    if !time_regex.is_match(value) {
        let mut error = ValidationError::new("invalid_time");
        error.message = Some(Cow::from("Preferred time must be HH:mm (24-hour)"));
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub branch: Option<String>,
    pub settings: Option<UserSettings>,
    #[serde(rename = "referralCode")]
    pub referral_code: Option<String>,
    #[serde(rename = "vouchedBy")]
    pub vouched_by: Option<String>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_owned(),
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            role: user.role.to_str().to_string(),
            branch: user.branch.clone(),
            settings: user.settings.clone(),
            referral_code: user.referral_code.clone(),
            vouched_by: user.vouched_by.clone(),
        }
    }

    pub fn filter_users(user: &[User]) -> Vec<FilterUserDto> {
        user.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_time_accepts_24h_clock() {
        assert!(validate_preferred_time("09:00").is_ok());
        assert!(validate_preferred_time("23:59").is_ok());
        assert!(validate_preferred_time("00:00").is_ok());
    }

    #[test]
    fn preferred_time_rejects_noise() {
        assert!(validate_preferred_time("24:00").is_err());
        assert!(validate_preferred_time("9:00").is_err());
        assert!(validate_preferred_time("09:60").is_err());
        assert!(validate_preferred_time("soonish").is_err());
    }
}
