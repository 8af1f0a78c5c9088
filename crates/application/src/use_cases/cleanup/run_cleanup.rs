use super::{BatchOutcome, BatchStatus, CleanupReport, DeleteContentUseCase, FindEligibleContentUseCase};
use crate::ports::{ContentRepository, OperatorConsole};
use chrono::Utc;
use chrono_tz::Tz;
use signage_domain::{
    CommitMode, ContentKind, ContentRecord, DeletionThreshold, DomainError, RetentionPolicy,
    THRESHOLD_DATE_FORMAT,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

const SET_THRESHOLD_PROMPT: &str = "Set threshold for deletion?";
const THRESHOLD_DATE_PROMPT: &str = "Which date should be the threshold for deletion?";
const CONTINUE_PROMPT: &str = "This will delete data. Do you wish to continue?";

/// Candidates listed per content type before the operator is asked to confirm
const LISTED_CANDIDATES: usize = 10;

/// How the deletion threshold is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMode {
    /// Ask the operator whether to apply one, offering one year ago
    Ask,
    /// Orphaned content only
    None,
    Fixed(DeletionThreshold),
}

#[derive(Debug, Clone)]
pub struct CleanupOptions {
    pub dry_run: bool,
    pub threshold: ThresholdMode,
    /// Answer the final confirmation with yes without prompting
    pub assume_yes: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            threshold: ThresholdMode::Ask,
            assume_yes: false,
        }
    }
}

/// Drives threshold selection, discovery, confirmation and deletion for
/// media, slides and channels.
///
/// Read errors during discovery abort the run before anything is removed and
/// are returned as `Err`. Write errors during execution stop the remaining
/// batches and are recorded in the returned report instead.
pub struct RunCleanupUseCase {
    content_repo: Arc<dyn ContentRepository>,
    console: Arc<dyn OperatorConsole>,
    find_eligible: FindEligibleContentUseCase,
    delete_content: DeleteContentUseCase,
    timezone: Tz,
    max_threshold_attempts: u32,
    revalidate: bool,
    commit_mode: CommitMode,
}

impl RunCleanupUseCase {
    pub fn new(content_repo: Arc<dyn ContentRepository>, console: Arc<dyn OperatorConsole>) -> Self {
        Self {
            find_eligible: FindEligibleContentUseCase::new(content_repo.clone()),
            delete_content: DeleteContentUseCase::new(content_repo.clone()),
            content_repo,
            console,
            timezone: Tz::UTC,
            max_threshold_attempts: 3,
            revalidate: true,
            commit_mode: CommitMode::Batch,
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_max_threshold_attempts(mut self, attempts: u32) -> Self {
        self.max_threshold_attempts = attempts.max(1);
        self
    }

    pub fn with_revalidation(mut self, revalidate: bool) -> Self {
        self.revalidate = revalidate;
        self
    }

    pub fn with_commit_mode(mut self, commit_mode: CommitMode) -> Self {
        self.commit_mode = commit_mode;
        self
    }

    #[instrument(skip(self, options), fields(dry_run = options.dry_run))]
    pub async fn execute(&self, options: &CleanupOptions) -> Result<CleanupReport, DomainError> {
        let threshold = self.resolve_threshold(options.threshold).await?;
        match &threshold {
            Some(t) => self.console.say(&format!("Selected threshold: {}", t)),
            None => self
                .console
                .say("No threshold set: only orphaned content is eligible."),
        }

        let mut candidates = Vec::with_capacity(ContentKind::CLEANUP_ORDER.len());
        for kind in ContentKind::CLEANUP_ORDER {
            let stored = self.content_repo.count(kind).await?;
            let records = self.find_eligible.execute(kind, threshold).await?;
            self.present_candidates(kind, stored, &records);
            candidates.push((kind, stored, records));
        }

        let total: usize = candidates.iter().map(|(_, _, records)| records.len()).sum();
        let confirmed = if total == 0 {
            false
        } else if options.assume_yes {
            true
        } else {
            self.console.confirm(CONTINUE_PROMPT, false).await?
        };

        let answer = match (total, confirmed) {
            (0, _) => "not needed",
            (_, true) => "yes",
            (_, false) => "no",
        };
        self.console.say(&format!("Confirmation: {}", answer));
        if options.dry_run && confirmed {
            self.console.say("Dry run: skipping deletion.");
        }

        let execute = confirmed && !options.dry_run;
        let policy = RetentionPolicy::new(threshold);
        let mut batches = Vec::with_capacity(candidates.len());
        let mut aborted = false;

        for (kind, stored, records) in candidates {
            let found = records.len() as u64;
            let outcome = if !execute {
                BatchOutcome::discovered(kind, stored, found)
            } else if aborted {
                BatchOutcome {
                    kind,
                    stored,
                    found,
                    deleted: 0,
                    status: BatchStatus::NotExecuted,
                }
            } else {
                let outcome = self.execute_batch(kind, stored, records, &policy).await;
                aborted = outcome.failed();
                outcome
            };
            batches.push(outcome);
        }

        let report = CleanupReport {
            threshold,
            dry_run: options.dry_run,
            confirmed,
            batches,
        };

        info!(
            found = report.total_found(),
            deleted = report.total_deleted(),
            skipped = report.total_skipped(),
            confirmed,
            "Cleanup finished"
        );

        Ok(report)
    }

    async fn resolve_threshold(
        &self,
        mode: ThresholdMode,
    ) -> Result<Option<DeletionThreshold>, DomainError> {
        match mode {
            ThresholdMode::None => Ok(None),
            ThresholdMode::Fixed(threshold) => Ok(Some(threshold)),
            ThresholdMode::Ask => {
                if !self.console.confirm(SET_THRESHOLD_PROMPT, false).await? {
                    return Ok(None);
                }

                let default_date = DeletionThreshold::default_date(Utc::now(), self.timezone);
                let default_input = default_date.format(THRESHOLD_DATE_FORMAT).to_string();

                for attempt in 1..=self.max_threshold_attempts {
                    let answer = self
                        .console
                        .ask(THRESHOLD_DATE_PROMPT, &default_input)
                        .await?;
                    match DeletionThreshold::parse(&answer, self.timezone) {
                        Ok(threshold) => return Ok(Some(threshold)),
                        Err(e) => {
                            warn!(attempt, error = %e, "Rejected threshold input");
                            self.console.say(&e.to_string());
                        }
                    }
                }

                self.console.say(&format!(
                    "Falling back to the default threshold {}.",
                    default_input
                ));
                DeletionThreshold::from_date(default_date, self.timezone).map(Some)
            }
        }
    }

    fn present_candidates(&self, kind: ContentKind, stored: u64, records: &[ContentRecord]) {
        self.console.say(&format!(
            "Found {} {} eligible for deletion ({} stored).",
            records.len(),
            kind.plural(),
            stored
        ));
        for record in records.iter().take(LISTED_CANDIDATES) {
            let reason = if record.is_orphaned() {
                format!("no {}", kind.association_label())
            } else {
                format!("last modified {}", record.updated_at.format("%Y-%m-%d"))
            };
            self.console
                .say(&format!("  - {} ({})", record.display_name(), reason));
        }
        if records.len() > LISTED_CANDIDATES {
            self.console.say(&format!(
                "  ... and {} more",
                records.len() - LISTED_CANDIDATES
            ));
        }
    }

    async fn execute_batch(
        &self,
        kind: ContentKind,
        stored: u64,
        records: Vec<ContentRecord>,
        policy: &RetentionPolicy,
    ) -> BatchOutcome {
        let found = records.len() as u64;
        let mut deleted = 0;

        let result = match self.commit_mode {
            CommitMode::Batch => self
                .delete_as_batch(&records, policy)
                .await
                .map(|rows| deleted = rows),
            CommitMode::Record => self.delete_each(&records, policy, &mut deleted).await,
        };

        let status = match result {
            Ok(()) => {
                info!(kind = %kind, found, deleted, "Batch committed");
                BatchStatus::Committed
            }
            Err(e) => {
                error!(kind = %kind, found, deleted, error = %e, "Batch failed");
                BatchStatus::Failed(e)
            }
        };

        BatchOutcome {
            kind,
            stored,
            found,
            deleted,
            status,
        }
    }

    async fn delete_as_batch(
        &self,
        records: &[ContentRecord],
        policy: &RetentionPolicy,
    ) -> Result<u64, DomainError> {
        if let Err(e) = self.stage_removals(records, policy).await {
            self.content_repo.rollback().await;
            return Err(e);
        }
        self.content_repo.commit().await
    }

    async fn stage_removals(
        &self,
        records: &[ContentRecord],
        policy: &RetentionPolicy,
    ) -> Result<(), DomainError> {
        for record in records {
            if let Some(current) = self.still_eligible(record, policy).await? {
                self.content_repo.remove(&current).await?;
            }
        }
        Ok(())
    }

    async fn delete_each(
        &self,
        records: &[ContentRecord],
        policy: &RetentionPolicy,
        deleted: &mut u64,
    ) -> Result<(), DomainError> {
        for record in records {
            let Some(current) = self.still_eligible(record, policy).await? else {
                continue;
            };
            match self.delete_content.execute(&current).await {
                Ok(()) => *deleted += 1,
                Err(DomainError::ContentNotFound { kind, id }) => {
                    debug!(kind = %kind, id, "Record already gone, skipping");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Re-reads `record` and returns its current state if it may still go.
    async fn still_eligible(
        &self,
        record: &ContentRecord,
        policy: &RetentionPolicy,
    ) -> Result<Option<ContentRecord>, DomainError> {
        if !self.revalidate {
            return Ok(Some(record.clone()));
        }

        match self.content_repo.get_by_id(record.kind, record.id).await? {
            Some(current) if policy.is_eligible(&current) => Ok(Some(current)),
            Some(current) => {
                info!(
                    kind = %current.kind,
                    id = current.id,
                    associations = current.association_count,
                    "Skipping record no longer eligible"
                );
                Ok(None)
            }
            None => {
                debug!(kind = %record.kind, id = record.id, "Record vanished since discovery");
                Ok(None)
            }
        }
    }
}
