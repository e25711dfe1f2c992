use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{io::AsyncWriteExt, sync::RwLock};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Attempt, ExamCategory},
};

/// A change applied to one stored attempt. Returning an error discards it.
pub type AttemptMutator = Box<dyn FnOnce(&mut Attempt) -> AppResult<()> + Send>;

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>>;
    async fn update(&self, id: &str, mutator: AttemptMutator) -> AppResult<Attempt>;
    async fn list_submitted(
        &self,
        category: Option<ExamCategory>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)>;
}

/// Keeps every attempt in memory and rewrites the whole map to one JSON file
/// after each successful mutation.
pub struct JsonFileAttemptRepository {
    path: PathBuf,
    attempts: RwLock<HashMap<String, Attempt>>,
}

impl JsonFileAttemptRepository {
    /// Loads the snapshot at `path`. A missing or unreadable snapshot starts
    /// an empty store instead of failing.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let attempts = Self::load(&path).await;

        log::info!(
            "Attempt store opened at {} with {} attempt(s)",
            path.display(),
            attempts.len()
        );

        Self {
            path,
            attempts: RwLock::new(attempts),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(path: &Path) -> HashMap<String, Attempt> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(err) => {
                log::warn!(
                    "Could not read attempt snapshot {}, starting empty: {}",
                    path.display(),
                    err
                );
                return HashMap::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(attempts) => attempts,
            Err(err) => {
                log::warn!(
                    "Attempt snapshot {} is corrupt, starting empty: {}",
                    path.display(),
                    err
                );
                HashMap::new()
            }
        }
    }

    async fn persist(&self, attempts: &HashMap<String, Attempt>) -> AppResult<()> {
        let bytes = serde_json::to_vec(attempts)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        let mut file = tokio::fs::File::create(&tmp_path).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for JsonFileAttemptRepository {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt> {
        let mut attempts = self.attempts.write().await;
        if attempts.contains_key(&attempt.attempt_id) {
            return Err(AppError::AlreadyExists(format!(
                "Attempt with id '{}' already exists",
                attempt.attempt_id
            )));
        }

        attempts.insert(attempt.attempt_id.clone(), attempt.clone());
        if let Err(err) = self.persist(&attempts).await {
            attempts.remove(&attempt.attempt_id);
            return Err(err);
        }

        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.get(id).cloned())
    }

    async fn update(&self, id: &str, mutator: AttemptMutator) -> AppResult<Attempt> {
        let mut attempts = self.attempts.write().await;
        let current = attempts
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", id)))?;

        let mut updated = current.clone();
        mutator(&mut updated)?;

        // The attempt id is the key; a mutator must not move the record.
        if updated.attempt_id != current.attempt_id {
            return Err(AppError::InternalError(format!(
                "Attempt '{}' changed its id during update",
                id
            )));
        }

        attempts.insert(id.to_string(), updated.clone());
        if let Err(err) = self.persist(&attempts).await {
            attempts.insert(id.to_string(), current);
            return Err(err);
        }

        Ok(updated)
    }

    async fn list_submitted(
        &self,
        category: Option<ExamCategory>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)> {
        let attempts = self.attempts.read().await;
        let mut items: Vec<_> = attempts
            .values()
            .filter(|a| a.is_submitted() && category.map(|c| a.exam.category == c).unwrap_or(true))
            .cloned()
            .collect();

        items.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.attempt_id.cmp(&b.attempt_id))
        });

        let total = items.len() as i64;
        let start = offset.max(0) as usize;
        let end = (start + limit.max(0) as usize).min(items.len());

        let page = if start >= items.len() {
            vec![]
        } else {
            items[start..end].to_vec()
        };

        Ok((page, total))
    }
}
