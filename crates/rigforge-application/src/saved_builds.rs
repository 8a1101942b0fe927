//! Saved build history: save, list, delete and load.

use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use rigforge_core::RigForgeError;
use rigforge_core::build::{Build, SavedBuildRepository};
use rigforge_core::error::Result;
use rigforge_core::notice::Notice;

use crate::outcome::ActionOutcome;

/// The user's answer to "delete this build?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

type Clock = fn() -> DateTime<Local>;

/// Keeps the saved build list in the repository, newest first.
///
/// Every change rewrites the whole list. Read-modify-write cycles are
/// serialized so two saves cannot drop each other's entry.
pub struct SavedBuildService {
    repository: Arc<dyn SavedBuildRepository>,
    write_lock: Mutex<()>,
    clock: Clock,
}

impl SavedBuildService {
    pub fn new(repository: Arc<dyn SavedBuildRepository>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
            clock: Local::now,
        }
    }

    /// Replaces the clock used for ids and dates.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn list(&self) -> Result<Vec<Build>> {
        self.repository.load_all().await
    }

    /// Stores a snapshot of `build` at the top of the list.
    ///
    /// `name` of `None` keeps the build's current name; a blank name means the
    /// user cancelled the prompt and nothing is written.
    pub async fn save(&self, build: &Build, name: Option<&str>) -> Result<ActionOutcome<Build>> {
        if build.is_empty() {
            return Ok(ActionOutcome::Blocked(Notice::EmptyBuild { action: "save" }));
        }
        let name = match name.map(str::trim) {
            Some("") => return Ok(ActionOutcome::Blocked(Notice::SaveCancelled)),
            Some(name) => name.to_string(),
            None => build.name.clone(),
        };

        let _guard = self.write_lock.lock().await;
        let mut builds = self.repository.load_all().await?;

        let now = (self.clock)();
        let id = fresh_id(&builds, now.timestamp_millis());
        let saved = build.snapshot(id, name, Some(now.format("%Y-%m-%d").to_string()));

        builds.insert(0, saved.clone());
        self.repository.save_all(&builds).await?;

        info!(build_id = %saved.id, name = %saved.name, total = %saved.total_price(), "build saved");
        Ok(ActionOutcome::Applied(saved))
    }

    /// Removes the entry with `id` once the user has confirmed.
    pub async fn delete(&self, id: &str, confirmation: Confirmation) -> Result<ActionOutcome<Build>> {
        if confirmation == Confirmation::Declined {
            return Ok(ActionOutcome::Blocked(Notice::DeleteDeclined));
        }

        let _guard = self.write_lock.lock().await;
        let mut builds = self.repository.load_all().await?;
        let index = builds
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| RigForgeError::not_found("saved build", id))?;
        let removed = builds.remove(index);
        self.repository.save_all(&builds).await?;

        info!(build_id = %removed.id, "saved build deleted");
        Ok(ActionOutcome::Applied(removed))
    }

    /// Returns a copy of the saved entry with `id`.
    pub async fn load(&self, id: &str) -> Result<Build> {
        self.repository
            .load_all()
            .await?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| RigForgeError::not_found("saved build", id))
    }
}

/// Millisecond timestamp id, bumped past the newest numeric id on record.
fn fresh_id(existing: &[Build], now_millis: i64) -> String {
    let newest = existing
        .iter()
        .filter_map(|b| b.id.parse::<i64>().ok())
        .max();
    let id = match newest {
        Some(newest) if newest >= now_millis => newest + 1,
        _ => now_millis,
    };
    id.to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rigforge_core::catalog::Catalog;
    use rigforge_core::component::Price;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Repository double that counts writes.
    #[derive(Default)]
    pub(crate) struct MemoryRepository {
        builds: StdMutex<Vec<Build>>,
        pub(crate) writes: AtomicUsize,
    }

    #[async_trait]
    impl SavedBuildRepository for MemoryRepository {
        async fn load_all(&self) -> Result<Vec<Build>> {
            Ok(self.builds.lock().unwrap().clone())
        }

        async fn save_all(&self, builds: &[Build]) -> Result<()> {
            *self.builds.lock().unwrap() = builds.to_vec();
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn fixed_clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn current_build() -> Build {
        let catalog = Catalog::builtin();
        let mut build = Build::default();
        build.add_component(catalog.get("cpu1").unwrap().clone());
        build.add_component(catalog.get("gpu1").unwrap().clone());
        build
    }

    fn service() -> (Arc<MemoryRepository>, SavedBuildService) {
        let repo = Arc::new(MemoryRepository::default());
        let service = SavedBuildService::new(repo.clone()).with_clock(fixed_clock);
        (repo, service)
    }

    #[tokio::test]
    async fn test_save_prepends_snapshot() {
        let (_repo, service) = service();
        let build = current_build();

        let first = service.save(&build, Some("Desk")).await.unwrap();
        let second = service.save(&build, None).await.unwrap();

        let first = first.value().unwrap();
        let second = second.value().unwrap();
        assert_eq!(first.saved_date.as_deref(), Some("2026-10-16"));
        assert_eq!(first.total_price(), Price::from_dollars(2188));
        assert_eq!(second.name, build.name);
        assert_ne!(first.id, second.id);

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].name, "Desk");
    }

    #[tokio::test]
    async fn test_empty_build_is_not_saved() {
        let (repo, service) = service();
        let outcome = service.save(&Build::default(), Some("x")).await.unwrap();

        assert_eq!(
            outcome,
            ActionOutcome::Blocked(Notice::EmptyBuild { action: "save" })
        );
        assert_eq!(repo.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_name_cancels() {
        let (repo, service) = service();
        let outcome = service.save(&current_build(), Some("   ")).await.unwrap();

        assert_eq!(outcome, ActionOutcome::Blocked(Notice::SaveCancelled));
        assert_eq!(repo.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (repo, service) = service();
        let saved = service.save(&current_build(), Some("A")).await.unwrap();
        let id = saved.value().unwrap().id.clone();

        let declined = service.delete(&id, Confirmation::Declined).await.unwrap();
        assert_eq!(declined, ActionOutcome::Blocked(Notice::DeleteDeclined));
        assert_eq!(repo.writes.load(Ordering::SeqCst), 1);

        let deleted = service.delete(&id, Confirmation::Confirmed).await.unwrap();
        assert!(deleted.is_applied());
        assert!(service.list().await.unwrap().is_empty());
        assert_eq!(repo.writes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_one_entry_and_keeps_order() {
        let (_repo, service) = service();
        let mut ids = Vec::new();
        for name in ["A", "B", "C"] {
            let saved = service.save(&current_build(), Some(name)).await.unwrap();
            ids.push(saved.value().unwrap().id.clone());
        }
        // Newest first: C, B, A.
        let middle = ids[1].clone();

        let deleted = service.delete(&middle, Confirmation::Confirmed).await.unwrap();
        assert_eq!(deleted.value().unwrap().name, "B");

        let remaining: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(remaining, vec![ids[2].clone(), ids[0].clone()]);
    }

    #[tokio::test]
    async fn test_delete_and_load_unknown_id() {
        let (_repo, service) = service();
        assert!(
            service
                .delete("404", Confirmation::Confirmed)
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(service.load("404").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_load_returns_independent_copy() {
        let (_repo, service) = service();
        let saved = service.save(&current_build(), Some("A")).await.unwrap();
        let id = saved.value().unwrap().id.clone();

        let mut loaded = service.load(&id).await.unwrap();
        loaded.clear();

        assert_eq!(service.load(&id).await.unwrap().len(), 2);
    }

    #[test]
    fn test_fresh_id_moves_past_newest() {
        let existing = vec![Build::new("1000", "a"), Build::new("not-a-number", "b")];
        assert_eq!(fresh_id(&existing, 999), "1001");
        assert_eq!(fresh_id(&existing, 1000), "1001");
        assert_eq!(fresh_id(&existing, 5000), "5000");
        assert_eq!(fresh_id(&[], 42), "42");
    }
}
