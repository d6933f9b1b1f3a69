use colored::*;

use crate::envelope::{display_value, ApiResponse, ResourceId};
use crate::payload::Role;
use crate::scenarios::SeedReport;

/// `ID: .. | 상태: .. | 메시지: ..` summary of a response envelope.
pub fn format_response(response: &ApiResponse) -> String {
    format!(
        "ID: {} | 상태: {} | 메시지: {}",
        display_value(response.data.as_ref()),
        response.status(),
        response.message()
    )
}

pub fn user_created(name: &str, response: &ApiResponse) -> String {
    format!("[유저 생성] 이름: {} | {}", name, format_response(response))
}

pub fn team_created(name: &str, color: &str, response: &ApiResponse) -> String {
    format!(
        "[팀 생성] 이름: {} | 색상: {} | {}",
        name,
        color,
        format_response(response)
    )
}

pub fn team_joined(
    user_id: &ResourceId,
    team_id: &ResourceId,
    number: u32,
    position: &str,
    response: &ApiResponse,
) -> String {
    format!(
        "[팀 가입] 유저ID: {} | 팀ID: {} | 번호: {} | 포지션: {} | {}",
        user_id,
        team_id,
        number,
        position,
        format_response(response)
    )
}

pub fn match_created(
    title: &str,
    home_team_id: &ResourceId,
    away_team_id: &ResourceId,
    response: &ApiResponse,
) -> String {
    format!(
        "[경기 생성] 제목: {} | 홈팀: {} | 원정팀: {} | {}",
        title,
        home_team_id,
        away_team_id,
        format_response(response)
    )
}

pub fn match_user_registered(
    match_id: &ResourceId,
    user_id: &ResourceId,
    team_id: Option<&ResourceId>,
    role: Role,
    response: &ApiResponse,
) -> String {
    let team_info = match team_id {
        Some(id) => format!("팀ID: {id}"),
        None => "팀ID: 없음".to_string(),
    };
    format!(
        "[경기 참여] 매치ID: {} | 유저ID: {} | {} | 역할: {} | {}",
        match_id,
        user_id,
        team_info,
        role,
        format_response(response)
    )
}

pub fn match_started(match_id: &ResourceId, response: &ApiResponse) -> String {
    format!("[경기 시작] 매치ID: {} | {}", match_id, format_response(response))
}

pub fn print_step(line: &str) {
    println!("{} {}", "✓".green(), line);
}

pub fn print_section(title: &str) {
    println!("\n{}", format!("----- {title} -----").bright_cyan().bold());
}

pub fn print_banner(title: &str) {
    println!(
        "\n{}\n",
        format!("========== {title} ==========").bright_white().bold()
    );
}

/// `팀1 ID: 3 | 팀2 ID: 4`, or `팀 ID: 없음` when there are none.
fn numbered_ids(label: &str, ids: &[ResourceId]) -> String {
    if ids.is_empty() {
        return format!("{label} ID: 없음");
    }
    ids.iter()
        .enumerate()
        .map(|(n, id)| format!("{label}{} ID: {id}", n + 1))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn summary_lines(report: &SeedReport) -> Vec<String> {
    let recorders = report.recorder_ids();
    let recorders = if recorders.is_empty() {
        "없음".to_string()
    } else {
        recorders
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        format!("생성된 매치 ID: {}", report.match_id),
        numbered_ids("팀", &report.team_ids),
        numbered_ids("선수", &report.starter_ids()),
        format!("기록담당자 ID: {recorders}"),
    ]
}

pub fn print_seed_summary(report: &SeedReport) {
    for line in summary_lines(report) {
        println!("{}", line.bold());
    }
}
