//! Résumé discovery and merge
//!
//! Résumés live next to the database, optionally grouped in one directory per
//! vacancy, and are named after the candidate: `Dev/Ivanov Ivan.pdf`,
//! `Ivanov_Ivan_Ivanovich.docx`.

use crate::api::{ApplicantRequest, External, FileRef, UploadedFile};
use recruit_common::normalize::normalize;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File extensions considered résumés
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "rtf", "odt", "txt"];

/// Lowercased NFKC tokens, split on anything that is not a letter or digit
fn tokens(text: &str) -> Vec<String> {
    normalize(text)
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_resume(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RESUME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// `root/<vacancy>` when the vacancy is a plain directory name. Names that
/// are absolute, carry separators or `..` would leave `root`.
fn vacancy_dir(root: &Path, vacancy: &str) -> Option<PathBuf> {
    let mut components = Path::new(vacancy).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Some(root.join(name)),
        _ => {
            debug!(vacancy, "Vacancy is not a plain directory name, skipping its directory");
            None
        }
    }
}

/// Résumé candidates in `dir`, sorted by name
fn resume_files(dir: &Path, max_depth: usize) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_resume(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

/// Find the résumé of one candidate.
///
/// Looks in `root/<vacancy>/` first, then directly in `root`. A file matches
/// when its name starts with the candidate's last and first name. Preference:
/// a name that also carries the middle name, then a name that is exactly
/// last and first, then any other match.
pub fn find_resume(
    root: &Path,
    vacancy: Option<&str>,
    last_name: &str,
    first_name: &str,
    middle_name: Option<&str>,
) -> Option<PathBuf> {
    let mut wanted = tokens(last_name);
    wanted.extend(tokens(first_name));
    if wanted.len() < 2 {
        return None;
    }
    let mut full = wanted.clone();
    full.extend(middle_name.map(tokens).unwrap_or_default());

    let mut dirs = Vec::new();
    if let Some(dir) = vacancy.and_then(|v| vacancy_dir(root, v)) {
        if dir.is_dir() {
            dirs.push((dir, 2));
        }
    }
    dirs.push((root.to_path_buf(), 1));

    for (dir, depth) in dirs {
        let files = resume_files(&dir, depth);
        let stems: Vec<(PathBuf, Vec<String>)> = files
            .into_iter()
            .map(|path| {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (path, tokens(&stem))
            })
            .collect();

        let found = stems
            .iter()
            .find(|(_, stem)| stem.starts_with(&full))
            .or_else(|| stems.iter().find(|(_, stem)| *stem == wanted))
            .or_else(|| stems.iter().find(|(_, stem)| stem.starts_with(&wanted)));

        if let Some((path, _)) = found {
            debug!(path = %path.display(), "Found resume");
            return Some(path.clone());
        }
    }

    None
}

/// Fill applicant fields the spreadsheet left empty with what the service
/// recognized in the uploaded résumé, and attach the résumé text.
pub fn apply_resume(applicant: &mut ApplicantRequest, resume: &UploadedFile) {
    let file = FileRef { id: resume.id };

    if let Some(fields) = &resume.fields {
        if applicant.middle_name.is_none() {
            applicant.middle_name = fields.name.as_ref().and_then(|n| n.middle.clone());
        }
        if applicant.phone.is_none() {
            applicant.phone = fields.phones.first().cloned();
        }
        if applicant.email.is_none() {
            applicant.email = fields.email.clone();
        }
        if applicant.position.is_none() {
            applicant.position = fields
                .position
                .clone()
                .or_else(|| fields.experience.first().and_then(|e| e.position.clone()));
        }
        if applicant.company.is_none() {
            applicant.company = fields.experience.first().and_then(|e| e.company.clone());
        }
        if let Some(date) = fields.birthdate {
            applicant.birthday_day = applicant.birthday_day.or(date.day);
            applicant.birthday_month = applicant.birthday_month.or(date.month);
            applicant.birthday_year = applicant.birthday_year.or(date.year);
        }
    }

    if applicant.photo.is_none() {
        applicant.photo = resume.photo.map(|p| p.id);
    }

    applicant
        .externals
        .push(External::native(resume.text.clone().unwrap_or_default(), file));
}
