//! API endpoint URL builders
//!
//! The base URL may or may not end with a slash; paths are joined with one.

fn join(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

pub fn accounts_url(base_url: &str) -> String {
    join(base_url, "accounts")
}

/// Build a vacancy list URL for one page
pub fn vacancies_url(base_url: &str, account_id: i64, count: u32, page: u32) -> String {
    join(
        base_url,
        &format!("account/{}/vacancies?count={}&page={}", account_id, count, page),
    )
}

pub fn statuses_url(base_url: &str, account_id: i64) -> String {
    join(base_url, &format!("account/{}/vacancy/statuses", account_id))
}

pub fn upload_url(base_url: &str, account_id: i64) -> String {
    join(base_url, &format!("account/{}/upload", account_id))
}

pub fn applicants_url(base_url: &str, account_id: i64) -> String {
    join(base_url, &format!("account/{}/applicants", account_id))
}

pub fn applicant_vacancy_url(base_url: &str, account_id: i64, applicant_id: i64) -> String {
    join(
        base_url,
        &format!("account/{}/applicants/{}/vacancy", account_id, applicant_id),
    )
}
