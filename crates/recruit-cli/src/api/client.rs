//! HTTP API client for the applicant-tracking service
//!
//! Blocking: the ingestion loop handles one row at a time and waits for each
//! call to finish before moving on.

use crate::api::{endpoints, types::*};
use crate::error::{CliError, Result};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

// ============================================================================
// API Client Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Can be overridden with `--timeout-secs` or RECRUIT_API_TIMEOUT_SECS.
/// Generous because résumé uploads are parsed server-side before responding.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

/// Default tracking service URL when not specified via environment variable.
pub const DEFAULT_API_URL: &str = "https://dev-100-api.huntflow.dev/";

pub const USER_AGENT: &str = "TestTask/1.0 (test@huntflow.ru)";

/// Page size used when listing vacancies
pub const VACANCY_PAGE_SIZE: u32 = 100;

/// API client for the tracking service
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: String, token: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Authorize, send and decode. Non-2xx answers become [`CliError::Api`].
    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.bearer_auth(&self.token).send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CliError::api(status.as_u16(), body));
        }

        Ok(response.json()?)
    }

    /// Accounts visible to the token
    pub fn accounts(&self) -> Result<Vec<Account>> {
        let url = endpoints::accounts_url(&self.base_url);
        let list: ItemList<Account> = self.send(self.client.get(&url))?;
        Ok(list.items)
    }

    /// All vacancies of an account, every page
    pub fn vacancies(&self, account_id: i64) -> Result<Vec<Vacancy>> {
        let mut vacancies = Vec::new();
        let mut page = 1;

        loop {
            let url = endpoints::vacancies_url(&self.base_url, account_id, VACANCY_PAGE_SIZE, page);
            let response: VacancyPage = self.send(self.client.get(&url))?;
            debug!(page, pages = response.pages, count = response.items.len(), "Fetched vacancies");

            let last = response.items.is_empty() || page >= response.pages;
            vacancies.extend(response.items);
            if last {
                break;
            }
            page += 1;
        }

        Ok(vacancies)
    }

    pub fn statuses(&self, account_id: i64) -> Result<Vec<VacancyStatus>> {
        let url = endpoints::statuses_url(&self.base_url, account_id);
        let list: ItemList<VacancyStatus> = self.send(self.client.get(&url))?;
        Ok(list.items)
    }

    /// Upload a file and ask the service to recognize candidate fields in it
    pub fn upload(&self, account_id: i64, path: &Path) -> Result<UploadedFile> {
        let url = endpoints::upload_url(&self.base_url, account_id);
        let form = multipart::Form::new().file("file", path)?;

        debug!(path = %path.display(), "Uploading file");
        self.send(
            self.client
                .post(&url)
                .header("X-File-Parse", "true")
                .multipart(form),
        )
    }

    pub fn create_applicant(&self, account_id: i64, applicant: &ApplicantRequest) -> Result<Created> {
        let url = endpoints::applicants_url(&self.base_url, account_id);
        self.send(self.client.post(&url).json(applicant))
    }

    pub fn attach_to_vacancy(
        &self,
        account_id: i64,
        applicant_id: i64,
        link: &VacancyLinkRequest,
    ) -> Result<Created> {
        let url = endpoints::applicant_vacancy_url(&self.base_url, account_id, applicant_id);
        self.send(self.client.post(&url).json(link))
    }
}
