//! Screening a directory of resumes against one job description

use crate::analyzer::{ScreeningReport, Screener};
use crate::error::Result;
use crate::input::{list_documents, load_document};
use indicatif::ProgressBar;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Reports sorted by resume path
    pub reports: Vec<ScreeningReport>,
    /// Resumes that could not be read, with the reason
    pub failures: Vec<(PathBuf, String)>,
}

/// Load and screen every supported document in `dir` concurrently.
///
/// Each resume is independent; one unreadable file is recorded in
/// `failures` and does not stop the rest.
pub async fn screen_directory(
    screener: Arc<Screener>,
    dir: &Path,
    job_path: &Path,
    jd_text: Arc<str>,
    progress: ProgressBar,
) -> Result<BatchOutcome> {
    let documents = list_documents(dir)?;
    info!("Screening {} resume(s) from {}", documents.len(), dir.display());
    progress.set_length(documents.len() as u64);

    let job_label = job_path.display().to_string();
    let mut tasks = JoinSet::new();
    for path in documents {
        let screener = Arc::clone(&screener);
        let jd_text = Arc::clone(&jd_text);
        let job_label = job_label.clone();

        tasks.spawn(async move {
            let outcome = match load_document(&path).await {
                Ok(resume_text) => Ok(screener
                    .screen(&resume_text, &jd_text)
                    .with_paths(path.display().to_string(), job_label)),
                Err(e) => Err(e.to_string()),
            };
            (path, outcome)
        });
    }

    let mut outcome = BatchOutcome::default();
    while let Some(joined) = tasks.join_next().await {
        progress.inc(1);
        match joined {
            Ok((_, Ok(report))) => outcome.reports.push(report),
            Ok((path, Err(reason))) => {
                warn!("Skipping {}: {}", path.display(), reason);
                outcome.failures.push((path, reason));
            }
            Err(e) => warn!("Screening task failed: {}", e),
        }
    }
    progress.finish_and_clear();

    outcome.reports.sort_by(|a, b| a.resume_path.cmp(&b.resume_path));
    outcome.failures.sort();
    Ok(outcome)
}
