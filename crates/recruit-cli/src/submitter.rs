//! Submits extracted records to the tracking service

use crate::api::{ApiClient, ApplicantRequest, FileRef, VacancyLinkRequest};
use crate::error::{CliError, Result};
use crate::resume::{apply_resume, find_resume};
use recruit_common::normalize::normalize;
use recruit_common::Record;
use recruit_ingest::{keys, RowWarning, SubmitOutcome, Submitter};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Creates one applicant per record and attaches it to its vacancy.
///
/// Vacancy and status names are resolved through dictionaries fetched once
/// when connecting.
pub struct ApiSubmitter {
    client: ApiClient,
    account_id: i64,
    vacancies: HashMap<String, i64>,
    statuses: HashMap<String, i64>,
    resume_dir: PathBuf,
}

impl ApiSubmitter {
    /// Select the account at `account_index` and load its dictionaries
    pub fn connect(client: ApiClient, account_index: usize, resume_dir: PathBuf) -> Result<Self> {
        let accounts = client.accounts()?;
        let account = accounts
            .get(account_index)
            .ok_or(CliError::AccountNotFound {
                index: account_index,
                available: accounts.len(),
            })?;
        let account_id = account.id;

        let vacancies = client
            .vacancies(account_id)?
            .into_iter()
            .map(|v| (normalize(v.position.trim()), v.id))
            .collect::<HashMap<_, _>>();
        let statuses = client
            .statuses(account_id)?
            .into_iter()
            .map(|s| (normalize(s.name.trim()), s.id))
            .collect::<HashMap<_, _>>();

        info!(
            account = %account.name,
            account_id,
            vacancies = vacancies.len(),
            statuses = statuses.len(),
            "Connected to tracking service"
        );

        Ok(Self {
            client,
            account_id,
            vacancies,
            statuses,
            resume_dir,
        })
    }

    fn lookup(dictionary: &HashMap<String, i64>, name: Option<&str>) -> Option<i64> {
        name.and_then(|name| dictionary.get(name).copied())
    }

    /// Vacancy and status cells keep their whitespace; lookups ignore it
    fn trimmed<'r>(record: &'r Record, key: &str) -> Option<&'r str> {
        record
            .get_str(key)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn submit_record(&self, row: usize, record: &Record) -> Result<SubmitOutcome> {
        let (Some(last_name), Some(first_name)) = (
            record.get_str(keys::LAST_NAME),
            record.get_str(keys::FIRST_NAME),
        ) else {
            return Ok(SubmitOutcome::skipped(RowWarning::MissingName));
        };

        let mut warnings = Vec::new();
        let vacancy_name = Self::trimmed(record, keys::VACANCY);
        let status_name = Self::trimmed(record, keys::STATUS);

        let vacancy = Self::lookup(&self.vacancies, vacancy_name);
        if vacancy.is_none() {
            warnings.push(RowWarning::VacancyNotFound(
                vacancy_name.unwrap_or_default().to_string(),
            ));
        }
        let status = Self::lookup(&self.statuses, status_name);
        if status.is_none() {
            warnings.push(RowWarning::StatusNotFound(
                status_name.unwrap_or_default().to_string(),
            ));
        }

        let mut applicant = ApplicantRequest::new(last_name, first_name);
        applicant.middle_name = record.get_str(keys::MIDDLE_NAME).map(str::to_string);
        applicant.money = record.get_str(keys::MONEY).map(str::to_string);

        let resume_path = find_resume(
            &self.resume_dir,
            vacancy_name,
            last_name,
            first_name,
            applicant.middle_name.as_deref(),
        );
        let resume = match resume_path {
            Some(path) => {
                let uploaded = self.client.upload(self.account_id, &path)?;
                apply_resume(&mut applicant, &uploaded);
                Some(FileRef { id: uploaded.id })
            }
            None => {
                warnings.push(RowWarning::ResumeNotFound);
                None
            }
        };

        let created = self.client.create_applicant(self.account_id, &applicant)?;
        debug!(row, applicant_id = created.id, "Applicant created");

        if let (Some(vacancy), Some(status)) = (vacancy, status) {
            let link = VacancyLinkRequest {
                vacancy,
                status,
                comment: record.get_str(keys::COMMENT).map(str::to_string),
                files: resume.into_iter().collect(),
            };
            self.client
                .attach_to_vacancy(self.account_id, created.id, &link)?;
            debug!(row, applicant_id = created.id, vacancy, status, "Attached to vacancy");
        }

        Ok(SubmitOutcome {
            applicant_id: Some(created.id),
            warnings,
        })
    }
}

impl Submitter for ApiSubmitter {
    fn submit(&mut self, row: usize, record: &Record) -> anyhow::Result<SubmitOutcome> {
        Ok(self.submit_record(row, record)?)
    }
}
