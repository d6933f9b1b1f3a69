//! What each [`ApiVariant`] puts on the wire.
//!
//! The three schemas disagree on a handful of fields. The differences live
//! here so `ApiClient` builds every body from one place.

use chrono::NaiveDateTime;
use service::config::ApiVariant;

use crate::envelope::ResourceId;
use crate::payload::{MatchSchedule, MatchState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleSource {
    /// Date and start time taken from the clock, ending one hour later.
    Now,
    /// `MatchSchedule::fixed()`.
    Fixed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayloadProfile {
    pub variant: ApiVariant,
    /// Send `bottomColor`/`stockingColor` alongside `teamColor`.
    pub uniform_colors: bool,
    pub schedule: ScheduleSource,
    /// Length in minutes sent as both `firstHalfPeriod` and `secondHalfPeriod`.
    pub half_period_minutes: Option<u32>,
    pub match_state: Option<MatchState>,
    /// Use this id instead of the `data` of the create-match response.
    pub assumed_match_id: Option<i64>,
    /// Whether registrations carry a `teamId` field at all.
    pub registration_team_id: bool,
    pub match_grid: &'static str,
}

impl PayloadProfile {
    pub fn for_variant(variant: ApiVariant) -> Self {
        match variant {
            ApiVariant::Live => Self {
                variant,
                uniform_colors: true,
                schedule: ScheduleSource::Now,
                half_period_minutes: Some(45),
                match_state: None,
                assumed_match_id: None,
                registration_team_id: true,
                match_grid: "1",
            },
            ApiVariant::FixedSchedule => Self {
                variant,
                uniform_colors: false,
                schedule: ScheduleSource::Fixed,
                half_period_minutes: None,
                match_state: None,
                assumed_match_id: None,
                registration_team_id: true,
                match_grid: "A1",
            },
            ApiVariant::Scheduled => Self {
                variant,
                uniform_colors: false,
                schedule: ScheduleSource::Fixed,
                half_period_minutes: None,
                match_state: Some(MatchState::Scheduled),
                assumed_match_id: Some(1),
                registration_team_id: false,
                match_grid: "A1",
            },
        }
    }

    pub fn schedule(&self, now: NaiveDateTime) -> MatchSchedule {
        match self.schedule {
            ScheduleSource::Now => MatchSchedule::one_hour_from(now),
            ScheduleSource::Fixed => MatchSchedule::fixed(),
        }
    }

    /// `(bottomColor, stockingColor)` for a team whose kit is all `color`.
    pub fn kit_colors<'a>(&self, color: &'a str) -> (Option<&'a str>, Option<&'a str>) {
        if self.uniform_colors {
            (Some(color), Some(color))
        } else {
            (None, None)
        }
    }

    /// The `teamId` field of a registration body, see `RegisterMatchUserRequest`.
    pub fn registration_team<'a>(
        &self,
        team_id: Option<&'a ResourceId>,
    ) -> Option<Option<&'a ResourceId>> {
        self.registration_team_id.then_some(team_id)
    }
}
