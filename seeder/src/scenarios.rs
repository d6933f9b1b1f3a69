//! Seed plans and the runner that plays them against the service.
//!
//! A plan only names records by their position in the plan (`user: 0`,
//! `team: 1`). The runner swaps each position for the id the service handed
//! back, so later requests can only ever use ids an earlier response produced.

use colored::*;
use log::*;
use service::config::ApiVariant;
use uuid::Uuid;

use crate::api_client::ApiClient;
use crate::envelope::ResourceId;
use crate::error::{plan_error, Error};
use crate::output::{print_banner, print_section, print_seed_summary};
use crate::payload::Role;

const HOME_COLOR: &str = "#FFFFFF";
const AWAY_COLOR: &str = "#000000";
const SQUAD_NUMBER: u32 = 7;
const DEFAULT_POSITION: &str = "FW";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamSpec {
    pub name: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipSpec {
    pub user: usize,
    pub team: usize,
    pub number: u32,
    pub position: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationSpec {
    pub user: usize,
    pub team: Option<usize>,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedPlan {
    pub users: Vec<String>,
    pub teams: Vec<TeamSpec>,
    pub memberships: Vec<MembershipSpec>,
    pub home_team: usize,
    pub away_team: usize,
    pub registrations: Vec<RegistrationSpec>,
    pub start_match: bool,
}

/// Every id a run obtained, in plan order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedReport {
    pub user_ids: Vec<ResourceId>,
    pub team_ids: Vec<ResourceId>,
    pub match_id: ResourceId,
    pub registrations: Vec<(ResourceId, Role)>,
}

impl SeedReport {
    /// Users registered as starting players, in registration order.
    pub fn starter_ids(&self) -> Vec<ResourceId> {
        self.registrations
            .iter()
            .filter(|(_, role)| *role == Role::StartPlayer)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn recorder_ids(&self) -> Vec<ResourceId> {
        self.registrations
            .iter()
            .filter(|(_, role)| *role == Role::Archives)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// First three characters of a fresh UUID, enough to tell runs apart.
pub fn short_name() -> String {
    Uuid::new_v4().to_string()[..3].to_string()
}

fn team(name: impl Into<String>, color: &str) -> TeamSpec {
    TeamSpec {
        name: name.into(),
        color: color.to_string(),
    }
}

fn member(user: usize, team: usize) -> MembershipSpec {
    MembershipSpec {
        user,
        team,
        number: SQUAD_NUMBER,
        position: DEFAULT_POSITION.to_string(),
    }
}

fn registration(user: usize, team: Option<usize>, role: Role) -> RegistrationSpec {
    RegistrationSpec { user, team, role }
}

impl SeedPlan {
    pub fn for_variant(variant: ApiVariant) -> Self {
        match variant {
            ApiVariant::Live => Self::live(),
            ApiVariant::FixedSchedule => Self::fixed_schedule(),
            ApiVariant::Scheduled => Self::scheduled(),
        }
    }

    /// Four throwaway users, two UUID-named teams, a full squad registration
    /// plus a recorder, and the match kicked off at the end.
    pub fn live() -> Self {
        Self {
            users: (0..4).map(|_| short_name()).collect(),
            teams: vec![
                team(Uuid::new_v4().to_string(), HOME_COLOR),
                team(Uuid::new_v4().to_string(), AWAY_COLOR),
            ],
            memberships: vec![member(0, 0), member(1, 0), member(2, 1)],
            home_team: 0,
            away_team: 1,
            registrations: vec![
                registration(0, Some(0), Role::StartPlayer),
                registration(1, Some(0), Role::SubPlayer),
                registration(2, Some(1), Role::StartPlayer),
                registration(3, None, Role::Archives),
            ],
            start_match: true,
        }
    }

    pub fn fixed_schedule() -> Self {
        Self {
            users: vec!["홍길동".to_string(), "이순신".to_string()],
            teams: vec![team("FC 서울", HOME_COLOR), team("FC 부산", AWAY_COLOR)],
            memberships: vec![member(0, 0), member(1, 1)],
            home_team: 0,
            away_team: 1,
            registrations: vec![
                registration(0, Some(0), Role::StartPlayer),
                registration(1, Some(1), Role::StartPlayer),
            ],
            start_match: false,
        }
    }

    pub fn scheduled() -> Self {
        Self {
            users: vec![
                "홍길동".to_string(),
                "이순신".to_string(),
                "강감찬".to_string(),
            ],
            teams: vec![team("FC 서울", HOME_COLOR), team("FC 부산", AWAY_COLOR)],
            memberships: vec![member(0, 0), member(1, 1)],
            home_team: 0,
            away_team: 1,
            registrations: vec![
                registration(0, Some(0), Role::StartPlayer),
                registration(1, Some(1), Role::StartPlayer),
                registration(2, None, Role::Archives),
            ],
            start_match: false,
        }
    }

    /// `"{home} vs {away}"`.
    pub fn match_title(&self) -> Result<String, Error> {
        let home = self.team_spec(self.home_team, "home team")?;
        let away = self.team_spec(self.away_team, "away team")?;
        Ok(format!("{} vs {}", home.name, away.name))
    }

    fn team_spec(&self, index: usize, used_by: &str) -> Result<&TeamSpec, Error> {
        self.teams.get(index).ok_or_else(|| {
            plan_error(format!(
                "{used_by} refers to team #{index}, plan has {}",
                self.teams.len()
            ))
        })
    }

    fn check_user(&self, index: usize, used_by: &str) -> Result<(), Error> {
        if index < self.users.len() {
            Ok(())
        } else {
            Err(plan_error(format!(
                "{used_by} refers to user #{index}, plan has {}",
                self.users.len()
            )))
        }
    }

    /// Rejects plans that point at users or teams they never create.
    pub fn validate(&self) -> Result<(), Error> {
        self.match_title()?;
        for (n, membership) in self.memberships.iter().enumerate() {
            let used_by = format!("membership #{n}");
            self.check_user(membership.user, &used_by)?;
            self.team_spec(membership.team, &used_by)?;
        }
        for (n, registration) in self.registrations.iter().enumerate() {
            let used_by = format!("registration #{n}");
            self.check_user(registration.user, &used_by)?;
            if let Some(team) = registration.team {
                self.team_spec(team, &used_by)?;
            }
        }
        Ok(())
    }
}

/// Creates everything in `plan`, strictly in order, stopping at the first
/// failed request. Records created before the failure stay on the server.
pub async fn run(client: &ApiClient, plan: &SeedPlan) -> Result<SeedReport, Error> {
    plan.validate()?;
    let title = plan.match_title()?;

    info!(
        "Seeding {} users, {} teams and one match using the {} schema",
        plan.users.len(),
        plan.teams.len(),
        client.profile().variant
    );
    print_banner("테스트 설정 시작");

    print_section("유저 생성");
    let mut user_ids = Vec::with_capacity(plan.users.len());
    for name in &plan.users {
        let user_id = client
            .create_user(name)
            .await
            .map_err(|e| e.during(format!("creating user {name}")))?;
        user_ids.push(user_id);
    }

    print_section("팀 생성");
    let mut team_ids = Vec::with_capacity(plan.teams.len());
    for team in &plan.teams {
        let team_id = client
            .create_team(&team.name, &team.color)
            .await
            .map_err(|e| e.during(format!("creating team {}", team.name)))?;
        team_ids.push(team_id);
    }

    print_section("팀 가입");
    for membership in &plan.memberships {
        let user_id = &user_ids[membership.user];
        let team_id = &team_ids[membership.team];
        client
            .join_team(user_id, team_id, membership.number, &membership.position)
            .await
            .map_err(|e| e.during(format!("joining user {user_id} to team {team_id}")))?;
    }

    print_section("경기 생성");
    let match_id = client
        .create_match(
            &title,
            &team_ids[plan.home_team],
            &team_ids[plan.away_team],
        )
        .await
        .map_err(|e| e.during(format!("creating match {title}")))?;

    print_section("경기 참여 등록");
    let mut registrations = Vec::with_capacity(plan.registrations.len());
    for registration in &plan.registrations {
        let user_id = &user_ids[registration.user];
        let team_id = registration.team.map(|team| &team_ids[team]);
        client
            .register_match_user(&match_id, user_id, team_id, registration.role)
            .await
            .map_err(|e| {
                e.during(format!("registering user {user_id} for match {match_id}"))
            })?;
        registrations.push((user_id.clone(), registration.role));
    }

    if plan.start_match {
        print_section("경기 시작");
        client
            .start_match(&match_id)
            .await
            .map_err(|e| e.during(format!("starting match {match_id}")))?;
    } else {
        debug!("Plan leaves match {match_id} unstarted");
    }

    print_banner("테스트 설정 완료");
    let report = SeedReport {
        user_ids,
        team_ids,
        match_id,
        registrations,
    };
    print_seed_summary(&report);
    println!("{}", "Fixtures ready ✓".bright_green().bold());

    Ok(report)
}
