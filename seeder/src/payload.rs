//! Request bodies for the match service endpoints.
//!
//! Field names follow the service's camelCase JSON. Fields that only some
//! schema variants send are `Option`s that are left out of the body when `None`.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::envelope::ResourceId;

pub const MATCH_TYPE: &str = "리그";
pub const STADIUM: &str = "홈구장";
pub const MATCH_POSITION: &str = "FW";
/// Wall-clock time sent when marking the first half as started.
pub const KICK_OFF_TIME: &str = "14:30:00";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    StartPlayer,
    SubPlayer,
    /// Match recorder; registered without playing for either team.
    Archives,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Role::StartPlayer => write!(f, "START_PLAYER"),
            Role::SubPlayer => write!(f, "SUB_PLAYER"),
            Role::Archives => write!(f, "ARCHIVES"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchState {
    Scheduled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HalfType {
    FirstHalf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeType {
    StartTime,
}

/// Date and planned start/end times of a match, already formatted for the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSchedule {
    pub match_date: String,
    pub planned_start_time: String,
    pub planned_end_time: String,
}

impl MatchSchedule {
    /// A one hour match starting at `now`. The end time wraps past midnight
    /// without moving the date.
    pub fn one_hour_from(now: NaiveDateTime) -> Self {
        let end = now + Duration::hours(1);
        Self {
            match_date: now.format(DATE_FORMAT).to_string(),
            planned_start_time: now.format(TIME_FORMAT).to_string(),
            planned_end_time: end.format(TIME_FORMAT).to_string(),
        }
    }

    /// The hardcoded future slot older schemas were seeded with.
    pub fn fixed() -> Self {
        Self {
            match_date: "2025-12-25".to_string(),
            planned_start_time: "14:00:00".to_string(),
            planned_end_time: "16:00:00".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateUserRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest<'a> {
    pub name: &'a str,
    pub team_color: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stocking_color: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamRequest<'a> {
    pub team_id: &'a ResourceId,
    pub number: u32,
    pub default_position: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest<'a> {
    pub title: &'a str,
    pub home_team_id: &'a ResourceId,
    pub away_team_id: &'a ResourceId,
    pub match_type: &'a str,
    pub stadium: &'a str,
    pub match_date: &'a str,
    pub planned_start_time: &'a str,
    pub planned_end_time: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_half_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_half_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_state: Option<MatchState>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMatchUserRequest<'a> {
    pub user_id: &'a ResourceId,
    /// Outer `None` leaves the field out, `Some(None)` sends `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Option<&'a ResourceId>>,
    pub role: Role,
    pub match_position: &'a str,
    pub match_grid: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTimeRequest<'a> {
    pub half_type: HalfType,
    pub time_type: TimeType,
    pub time: &'a str,
}

impl Default for MatchTimeRequest<'_> {
    fn default() -> Self {
        Self {
            half_type: HalfType::FirstHalf,
            time_type: TimeType::StartTime,
            time: KICK_OFF_TIME,
        }
    }
}
