//! Plays whole seed plans against a stub of the match service and checks the
//! exact requests that went out.

use chrono::{NaiveDate, NaiveDateTime};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use seeder::api_client::ApiClient;
use seeder::envelope::ResourceId;
use seeder::error::ErrorKind;
use seeder::payload::Role;
use seeder::profile::PayloadProfile;
use seeder::scenarios::{self, MembershipSpec, RegistrationSpec, SeedPlan, TeamSpec};
use service::config::ApiVariant;

#[derive(Debug, Clone, PartialEq)]
struct Recorded {
    method: String,
    path: String,
    body: Value,
}

fn recorded(method: &str, path: &str, body: Value) -> Recorded {
    Recorded {
        method: method.to_string(),
        path: path.to_string(),
        body,
    }
}

/// Stub that answers every request on `path` with a fresh numeric id (1, 2, 3,
/// ...) and remembers what it was sent.
struct StubService {
    server: ServerGuard,
    requests: Arc<Mutex<Vec<Recorded>>>,
    _mocks: Vec<Mock>,
}

impl StubService {
    async fn start() -> Self {
        Self {
            server: Server::new_async().await,
            requests: Arc::new(Mutex::new(Vec::new())),
            _mocks: Vec::new(),
        }
    }

    async fn record(mut self, path: Matcher, with_data: bool) -> Self {
        for method in ["POST", "PATCH"] {
            let log = Arc::clone(&self.requests);
            let mock = self
                .server
                .mock(method, path.clone())
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body_from_request(move |request| {
                    let body = request
                        .body()
                        .ok()
                        .and_then(|bytes| serde_json::from_slice(bytes).ok())
                        .unwrap_or(Value::Null);
                    let mut log = log.lock().unwrap();
                    log.push(recorded(request.method(), request.path(), body));
                    let envelope = if with_data {
                        json!({"data": log.len(), "status": "OK", "message": "stub"})
                    } else {
                        json!({"status": "OK", "message": "stub"})
                    };
                    serde_json::to_vec(&envelope).unwrap()
                })
                .create_async()
                .await;
            self._mocks.push(mock);
        }
        self
    }

    fn client(&self, variant: ApiVariant) -> ApiClient {
        ApiClient::new(
            reqwest::Client::new(),
            format!("{}/api/v1", self.server.url()),
            PayloadProfile::for_variant(variant),
        )
        .with_clock(kick_off())
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn kick_off() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 2)
        .unwrap()
        .and_hms_opt(15, 0, 0)
        .unwrap()
}

fn two_player_plan() -> SeedPlan {
    SeedPlan {
        users: vec!["kim".to_string(), "park".to_string()],
        teams: vec![
            TeamSpec {
                name: "home".to_string(),
                color: "#FFFFFF".to_string(),
            },
            TeamSpec {
                name: "away".to_string(),
                color: "#000000".to_string(),
            },
        ],
        memberships: vec![
            MembershipSpec {
                user: 0,
                team: 0,
                number: 7,
                position: "FW".to_string(),
            },
            MembershipSpec {
                user: 1,
                team: 1,
                number: 7,
                position: "FW".to_string(),
            },
        ],
        home_team: 0,
        away_team: 1,
        registrations: vec![
            RegistrationSpec {
                user: 0,
                team: Some(0),
                role: Role::StartPlayer,
            },
            RegistrationSpec {
                user: 1,
                team: Some(1),
                role: Role::StartPlayer,
            },
        ],
        start_match: true,
    }
}

#[tokio::test]
async fn test_two_player_match_is_seeded_in_script_order() {
    let stub = StubService::start()
        .await
        .record(Matcher::Any, true)
        .await;
    let client = stub.client(ApiVariant::Live);

    let report = scenarios::run(&client, &two_player_plan()).await.unwrap();

    let kit = |color: &str| {
        json!({"teamColor": color, "bottomColor": color, "stockingColor": color})
    };
    let mut home = kit("#FFFFFF");
    home["name"] = json!("home");
    let mut away = kit("#000000");
    away["name"] = json!("away");

    assert_eq!(
        stub.requests(),
        vec![
            recorded("POST", "/api/v1/users", json!({"name": "kim"})),
            recorded("POST", "/api/v1/users", json!({"name": "park"})),
            recorded("POST", "/api/v1/teams", home),
            recorded("POST", "/api/v1/teams", away),
            recorded(
                "POST",
                "/api/v1/users/1/teams",
                json!({"teamId": 3, "number": 7, "defaultPosition": "FW"})
            ),
            recorded(
                "POST",
                "/api/v1/users/2/teams",
                json!({"teamId": 4, "number": 7, "defaultPosition": "FW"})
            ),
            recorded(
                "POST",
                "/api/v1/matches",
                json!({
                    "title": "home vs away",
                    "homeTeamId": 3,
                    "awayTeamId": 4,
                    "matchType": "리그",
                    "stadium": "홈구장",
                    "matchDate": "2024-11-02",
                    "plannedStartTime": "15:00:00",
                    "plannedEndTime": "16:00:00",
                    "firstHalfPeriod": 45,
                    "secondHalfPeriod": 45
                })
            ),
            recorded(
                "POST",
                "/api/v1/matches/7/users",
                json!({"userId": 1, "teamId": 3, "role": "START_PLAYER", "matchPosition": "FW", "matchGrid": "1"})
            ),
            recorded(
                "POST",
                "/api/v1/matches/7/users",
                json!({"userId": 2, "teamId": 4, "role": "START_PLAYER", "matchPosition": "FW", "matchGrid": "1"})
            ),
            recorded(
                "PATCH",
                "/api/v1/matches/7/time",
                json!({"halfType": "FIRST_HALF", "timeType": "START_TIME", "time": "14:30:00"})
            ),
        ]
    );

    assert_eq!(report.user_ids, vec![ResourceId::from(1), ResourceId::from(2)]);
    assert_eq!(report.team_ids, vec![ResourceId::from(3), ResourceId::from(4)]);
    assert_eq!(report.match_id, ResourceId::from(7));
    assert!(report.recorder_ids().is_empty());
}

#[tokio::test]
async fn test_live_plan_registers_recorder_without_team() {
    let stub = StubService::start()
        .await
        .record(Matcher::Any, true)
        .await;
    let client = stub.client(ApiVariant::Live);

    let report = scenarios::run(&client, &SeedPlan::live()).await.unwrap();
    let requests = stub.requests();

    // 4 users, 2 teams, 3 joins, 1 match, 4 registrations, 1 start
    assert_eq!(requests.len(), 15);
    let match_id = report.match_id.to_string();
    assert_eq!(match_id, "10");

    let recorder = &requests[13];
    assert_eq!(recorder.path, "/api/v1/matches/10/users");
    assert_eq!(recorder.body["teamId"], Value::Null);
    assert_eq!(recorder.body["role"], json!("ARCHIVES"));
    assert_eq!(report.recorder_ids(), vec![ResourceId::from(4)]);

    let last = requests.last().unwrap();
    assert_eq!(last.method, "PATCH");
    assert_eq!(last.path, "/api/v1/matches/10/time");
}

#[tokio::test]
async fn test_scheduled_plan_uses_assumed_match_id_and_omits_team() {
    let stub = StubService::start()
        .await
        .record(Matcher::Any, true)
        .await;
    let client = stub.client(ApiVariant::Scheduled);

    let report = scenarios::run(&client, &SeedPlan::scheduled()).await.unwrap();
    let requests = stub.requests();

    assert_eq!(report.match_id, ResourceId::from(1));

    let create_match = requests
        .iter()
        .find(|r| r.path == "/api/v1/matches")
        .unwrap();
    assert_eq!(create_match.body["matchState"], json!("SCHEDULED"));
    assert_eq!(create_match.body["matchDate"], json!("2025-12-25"));
    assert!(create_match.body.get("firstHalfPeriod").is_none());

    let registrations: Vec<&Recorded> = requests
        .iter()
        .filter(|r| r.path == "/api/v1/matches/1/users")
        .collect();
    assert_eq!(registrations.len(), 3);
    for registration in registrations {
        assert!(registration.body.get("teamId").is_none());
        assert_eq!(registration.body["matchGrid"], json!("A1"));
    }

    assert!(requests.iter().all(|r| r.method == "POST"));
}

#[tokio::test]
async fn test_missing_data_aborts_the_run() {
    let stub = StubService::start()
        .await
        .record(Matcher::Any, false)
        .await;
    let client = stub.client(ApiVariant::FixedSchedule);

    let err = scenarios::run(&client, &SeedPlan::fixed_schedule())
        .await
        .unwrap_err();

    assert_eq!(err.error_kind, ErrorKind::MissingData);
    assert_eq!(err.step.as_deref(), Some("creating user 홍길동"));
    assert!(err.to_string().starts_with("creating user 홍길동 failed"));
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn test_failed_team_creation_stops_later_steps() {
    let mut stub = StubService::start()
        .await
        .record(Matcher::Regex(r"^/api/v1/users".to_string()), true)
        .await;
    let teams = stub
        .server
        .mock("POST", "/api/v1/teams")
        .with_status(500)
        .with_body(r#"{"status": "INTERNAL_SERVER_ERROR", "message": "db down"}"#)
        .expect(1)
        .create_async()
        .await;
    let client = stub.client(ApiVariant::FixedSchedule);

    let err = scenarios::run(&client, &SeedPlan::fixed_schedule())
        .await
        .unwrap_err();

    assert_eq!(err.error_kind, ErrorKind::Status(500));
    assert!(err.to_string().contains("creating team FC 서울 failed"));
    assert!(err.to_string().contains("db down"));
    teams.assert_async().await;
    let paths: Vec<String> = stub.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/api/v1/users", "/api/v1/users"]);
}

#[tokio::test]
async fn test_invalid_plan_sends_nothing() {
    let stub = StubService::start()
        .await
        .record(Matcher::Any, true)
        .await;
    let client = stub.client(ApiVariant::Live);

    let mut plan = two_player_plan();
    plan.registrations[1].user = 9;
    let err = scenarios::run(&client, &plan).await.unwrap_err();

    assert!(matches!(err.error_kind, ErrorKind::Plan(_)));
    assert!(stub.requests().is_empty());
}
