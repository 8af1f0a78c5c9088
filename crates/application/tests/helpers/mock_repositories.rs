#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use signage_application::ports::{ContentRepository, OperatorConsole};
use signage_domain::{ContentKind, ContentRecord, DomainError};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

pub fn at(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

pub fn make_record(kind: ContentKind, id: i64, associations: u64, updated: &str) -> ContentRecord {
    ContentRecord::new(id, kind, at(updated))
        .with_title(&format!("{} {}", kind, id))
        .with_associations(associations)
}

type Key = (ContentKind, i64);

#[derive(Clone)]
pub struct MockContentRepository {
    records: Arc<RwLock<BTreeMap<Key, ContentRecord>>>,
    staged: Arc<Mutex<Vec<Key>>>,
    fail_reads: Arc<AtomicBool>,
    fail_commit_for: Arc<Mutex<Option<ContentKind>>>,
    commit_count: Arc<AtomicU64>,
    remove_count: Arc<AtomicU64>,
}

impl MockContentRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            staged: Arc::new(Mutex::new(Vec::new())),
            fail_reads: Arc::new(AtomicBool::new(false)),
            fail_commit_for: Arc::new(Mutex::new(None)),
            commit_count: Arc::new(AtomicU64::new(0)),
            remove_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_records(records: Vec<ContentRecord>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.records.write().unwrap();
            for record in records {
                map.insert((record.kind, record.id), record);
            }
        }
        repo
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    pub fn fail_commit_for(&self, kind: ContentKind) {
        *self.fail_commit_for.lock().unwrap() = Some(kind);
    }

    /// Places a record into a layout, as the live system would
    pub fn attach(&self, kind: ContentKind, id: i64) {
        if let Some(record) = self.records.write().unwrap().get_mut(&(kind, id)) {
            record.association_count += 1;
            record.updated_at = Utc::now();
        }
    }

    pub fn delete_directly(&self, kind: ContentKind, id: i64) {
        self.records.write().unwrap().remove(&(kind, id));
    }

    pub fn count_of(&self, kind: ContentKind) -> usize {
        self.records
            .read()
            .unwrap()
            .keys()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn contains(&self, kind: ContentKind, id: i64) -> bool {
        self.records.read().unwrap().contains_key(&(kind, id))
    }

    pub fn commit_count(&self) -> u64 {
        self.commit_count.load(Ordering::Relaxed)
    }

    pub fn remove_count(&self) -> u64 {
        self.remove_count.load(Ordering::Relaxed)
    }

    pub fn staged_len(&self) -> usize {
        self.staged.lock().unwrap().len()
    }

    fn check_reads(&self) -> Result<(), DomainError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(DomainError::Persistence("database is locked".to_string()));
        }
        Ok(())
    }

    fn select(&self, kind: ContentKind, filter: impl Fn(&ContentRecord) -> bool) -> Vec<ContentRecord> {
        self.records
            .read()
            .unwrap()
            .values()
            .filter(|r| r.kind == kind && filter(r))
            .cloned()
            .collect()
    }
}

impl Default for MockContentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentRepository for MockContentRepository {
    async fn find_orphaned(&self, kind: ContentKind) -> Result<Vec<ContentRecord>, DomainError> {
        self.check_reads()?;
        Ok(self.select(kind, |r| r.association_count == 0))
    }

    async fn find_modified_before(
        &self,
        kind: ContentKind,
        before: DateTime<Utc>,
    ) -> Result<Vec<ContentRecord>, DomainError> {
        self.check_reads()?;
        Ok(self.select(kind, |r| r.updated_at < before))
    }

    async fn get_by_id(
        &self,
        kind: ContentKind,
        id: i64,
    ) -> Result<Option<ContentRecord>, DomainError> {
        self.check_reads()?;
        Ok(self.records.read().unwrap().get(&(kind, id)).cloned())
    }

    async fn count(&self, kind: ContentKind) -> Result<u64, DomainError> {
        self.check_reads()?;
        Ok(self.count_of(kind) as u64)
    }

    async fn remove(&self, record: &ContentRecord) -> Result<(), DomainError> {
        self.remove_count.fetch_add(1, Ordering::Relaxed);
        self.staged.lock().unwrap().push((record.kind, record.id));
        Ok(())
    }

    async fn commit(&self) -> Result<u64, DomainError> {
        let staged: Vec<Key> = std::mem::take(&mut *self.staged.lock().unwrap());
        let failing = *self.fail_commit_for.lock().unwrap();

        if let Some(kind) = failing {
            if staged.iter().any(|(k, _)| *k == kind) {
                return Err(DomainError::Persistence(format!(
                    "constraint violation while deleting {}",
                    kind.plural()
                )));
            }
        }

        let mut records = self.records.write().unwrap();
        let deleted = staged
            .iter()
            .filter(|key| records.remove(*key).is_some())
            .count() as u64;
        self.commit_count.fetch_add(1, Ordering::Relaxed);
        Ok(deleted)
    }

    async fn rollback(&self) {
        self.staged.lock().unwrap().clear();
    }
}

type Hook = Box<dyn FnOnce() + Send>;

/// Scripted operator: answers are consumed in order, falling back to the
/// prompt's default once the script runs out.
pub struct MockConsole {
    confirms: Mutex<VecDeque<bool>>,
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    defaults_offered: Mutex<Vec<String>>,
    lines: Mutex<Vec<String>>,
    before_final_answer: Mutex<Option<Hook>>,
}

impl MockConsole {
    pub fn new() -> Self {
        Self {
            confirms: Mutex::new(VecDeque::new()),
            answers: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            defaults_offered: Mutex::new(Vec::new()),
            lines: Mutex::new(Vec::new()),
            before_final_answer: Mutex::new(None),
        }
    }

    pub fn answering(confirms: Vec<bool>, answers: Vec<&str>) -> Self {
        let console = Self::new();
        *console.confirms.lock().unwrap() = confirms.into();
        *console.answers.lock().unwrap() = answers.into_iter().map(String::from).collect();
        console
    }

    /// Runs `hook` when the delete confirmation is asked, simulating the live
    /// system touching data while the operator decides.
    pub fn on_final_confirmation(self, hook: impl FnOnce() + Send + 'static) -> Self {
        *self.before_final_answer.lock().unwrap() = Some(Box::new(hook));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn defaults_offered(&self) -> Vec<String> {
        self.defaults_offered.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.lines.lock().unwrap().iter().any(|l| l.contains(needle))
    }

    pub fn was_asked(&self, needle: &str) -> bool {
        self.prompts.lock().unwrap().iter().any(|p| p.contains(needle))
    }
}

impl Default for MockConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OperatorConsole for MockConsole {
    async fn confirm(&self, prompt: &str, default: bool) -> Result<bool, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if prompt.contains("delete data") {
            if let Some(hook) = self.before_final_answer.lock().unwrap().take() {
                hook();
            }
        }
        Ok(self.confirms.lock().unwrap().pop_front().unwrap_or(default))
    }

    async fn ask(&self, prompt: &str, default: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.defaults_offered.lock().unwrap().push(default.to_string());
        Ok(self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| default.to_string()))
    }

    fn say(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}
