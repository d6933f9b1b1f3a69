// Match fixture seeder
//
// Creates users, teams, a match and its participants on a running
// match-tracking service so it can be poked at by hand:
// - api_client: one method per endpoint
// - scenarios: seed plans and the runner that plays them in order

pub mod api_client;
pub mod envelope;
pub mod error;
pub mod output;
pub mod payload;
pub mod profile;
pub mod scenarios;
