use chrono::{Local, NaiveDateTime};
use log::*;
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::envelope::{ApiResponse, ResourceId};
use crate::error::{status_error, Error, ErrorKind};
use crate::output::{self, print_step};
use crate::payload::{
    CreateMatchRequest, CreateTeamRequest, CreateUserRequest, JoinTeamRequest, MatchTimeRequest,
    RegisterMatchUserRequest, Role, MATCH_POSITION, MATCH_TYPE, STADIUM,
};
use crate::profile::PayloadProfile;

/// Thin client over the match service. Every method is exactly one request,
/// prints one outcome line and hands back whatever later steps need from it.
pub struct ApiClient {
    client: Client,
    base_url: String,
    profile: PayloadProfile,
    clock: Option<NaiveDateTime>,
}

impl ApiClient {
    pub fn new(client: Client, base_url: String, profile: PayloadProfile) -> Self {
        Self {
            client,
            base_url,
            profile,
            clock: None,
        }
    }

    /// Pin "now" for schedules derived from the clock.
    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn profile(&self) -> &PayloadProfile {
        &self.profile
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.unwrap_or_else(|| Local::now().naive_local())
    }

    /// Appends `segments` to the base URL's path, percent-encoding each one.
    /// A trailing `/` on the base URL is dropped first.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| {
                Error::new(
                    ErrorKind::InvalidUrl,
                    Some(format!("{} cannot take a path", self.base_url).into()),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<ApiResponse, Error> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        debug!("{} {} {}", method, url, serde_json::to_string(body)?);

        let response = self
            .client
            .request(method.clone(), url)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!("{} {} -> {} {}", method, path, status, text);

        if !status.is_success() {
            error!("{} {} failed with {}: {}", method, path, status, text);
            return Err(status_error(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(ApiResponse::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn create_user(&self, name: &str) -> Result<ResourceId, Error> {
        let response = self
            .send(Method::POST, &["users"], &CreateUserRequest { name })
            .await?;
        print_step(&output::user_created(name, &response));

        response.resource_id()
    }

    pub async fn create_team(&self, name: &str, color: &str) -> Result<ResourceId, Error> {
        let (bottom_color, stocking_color) = self.profile.kit_colors(color);
        let request = CreateTeamRequest {
            name,
            team_color: color,
            bottom_color,
            stocking_color,
        };

        let response = self.send(Method::POST, &["teams"], &request).await?;
        print_step(&output::team_created(name, color, &response));

        response.resource_id()
    }

    /// Returns the membership record the service created, or `None` when it
    /// answered with `"data": null`. Only a missing `data` key is an error.
    pub async fn join_team(
        &self,
        user_id: &ResourceId,
        team_id: &ResourceId,
        number: u32,
        position: &str,
    ) -> Result<Option<Value>, Error> {
        let request = JoinTeamRequest {
            team_id,
            number,
            default_position: position,
        };

        let user_id_segment = user_id.to_string();
        let response = self
            .send(Method::POST, &["users", &user_id_segment, "teams"], &request)
            .await?;
        print_step(&output::team_joined(
            user_id, team_id, number, position, &response,
        ));

        let data = response.data()?;
        Ok((!data.is_null()).then(|| data.clone()))
    }

    pub async fn create_match(
        &self,
        title: &str,
        home_team_id: &ResourceId,
        away_team_id: &ResourceId,
    ) -> Result<ResourceId, Error> {
        let schedule = self.profile.schedule(self.now());
        let half_period = self.profile.half_period_minutes;
        let request = CreateMatchRequest {
            title,
            home_team_id,
            away_team_id,
            match_type: MATCH_TYPE,
            stadium: STADIUM,
            match_date: &schedule.match_date,
            planned_start_time: &schedule.planned_start_time,
            planned_end_time: &schedule.planned_end_time,
            first_half_period: half_period,
            second_half_period: half_period,
            match_state: self.profile.match_state,
        };

        let response = self.send(Method::POST, &["matches"], &request).await?;
        print_step(&output::match_created(
            title,
            home_team_id,
            away_team_id,
            &response,
        ));

        match self.profile.assumed_match_id {
            Some(id) => {
                warn!("Ignoring create-match response, assuming match id {id}");
                Ok(ResourceId::Number(id))
            }
            None => response.resource_id(),
        }
    }

    /// `team_id` is `None` for participants that don't play for either side.
    pub async fn register_match_user(
        &self,
        match_id: &ResourceId,
        user_id: &ResourceId,
        team_id: Option<&ResourceId>,
        role: Role,
    ) -> Result<(), Error> {
        let request = RegisterMatchUserRequest {
            user_id,
            team_id: self.profile.registration_team(team_id),
            role,
            match_position: MATCH_POSITION,
            match_grid: self.profile.match_grid,
        };

        let match_id_segment = match_id.to_string();
        let response = self
            .send(
                Method::POST,
                &["matches", &match_id_segment, "users"],
                &request,
            )
            .await?;
        print_step(&output::match_user_registered(
            match_id, user_id, team_id, role, &response,
        ));

        Ok(())
    }

    /// Marks the first half as started.
    pub async fn start_match(&self, match_id: &ResourceId) -> Result<(), Error> {
        let match_id_segment = match_id.to_string();
        let response = self
            .send(
                Method::PATCH,
                &["matches", &match_id_segment, "time"],
                &MatchTimeRequest::default(),
            )
            .await?;
        print_step(&output::match_started(match_id, &response));

        Ok(())
    }
}
