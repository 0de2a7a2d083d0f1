// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Keeps the local mirror of the documentation repository fresh.
//!
//! The mirror is a read-only cache: refreshing it hard-resets to the remote
//! branch tip and discards anything changed locally.

mod git;

pub use git::{GitCli, VersionControl};

use crate::error::Result;
use crate::indicator::{ProgressConfig, ProgressIndicator};
use crate::models::RepoRef;
use log::{debug, info};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// What a sync should do to the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Clone,
    Pull,
    Skip,
}

/// What a sync did to the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Cloned,
    Pulled,
    UpToDate,
}

/// Decide how to bring the mirror up to date.
///
/// `last_fetched` is `None` when the fetch marker could not be read, which
/// counts as stale. A zero `interval` disables time-based refresh: an
/// existing mirror is then only pulled when `force` is set or its fetch
/// time is unknown.
pub fn plan_sync(
    mirror_exists: bool,
    force: bool,
    last_fetched: Option<SystemTime>,
    interval: Duration,
    now: SystemTime,
) -> SyncAction {
    if !mirror_exists {
        return SyncAction::Clone;
    }
    if force {
        return SyncAction::Pull;
    }
    let Some(last) = last_fetched else {
        return SyncAction::Pull;
    };
    if last == UNIX_EPOCH {
        return SyncAction::Pull;
    }
    // A deadline past the end of SystemTime is never reached
    if !interval.is_zero() && last.checked_add(interval).is_some_and(|due| now >= due) {
        return SyncAction::Pull;
    }
    SyncAction::Skip
}

pub struct Synchronizer {
    vcs: Box<dyn VersionControl>,
}

impl Synchronizer {
    pub fn new(vcs: Box<dyn VersionControl>) -> Self {
        Self { vcs }
    }

    /// Clone, pull or leave `mirror` alone according to [`plan_sync`].
    ///
    /// Version-control failures are returned as-is; nothing is retried.
    pub fn ensure_fresh(
        &self,
        mirror: &Path,
        repo: &RepoRef,
        force: bool,
        interval: Duration,
        progress: &mut dyn ProgressIndicator,
    ) -> Result<SyncOutcome> {
        let exists = mirror.exists();
        let last_fetched = if exists && !force {
            match self.vcs.last_fetched(mirror) {
                Ok(time) => Some(time),
                Err(e) => {
                    debug!("Unable to read last fetch time, treating mirror as stale: {e}");
                    None
                }
            }
        } else {
            None
        };

        let action = plan_sync(exists, force, last_fetched, interval, SystemTime::now());
        debug!("Sync action for {}: {action:?}", mirror.display());

        match action {
            SyncAction::Clone => {
                progress.start(ProgressConfig::new("Cloning", &repo.url));
                let result = self.clone_into(mirror, repo);
                finish(progress, &result, "Cloned");
                result.map(|_| SyncOutcome::Cloned)
            }
            SyncAction::Pull => {
                progress.start(ProgressConfig::new("Updating", &repo.url));
                let result = self.pull_into(mirror, repo);
                finish(progress, &result, "Updated");
                result.map(|_| SyncOutcome::Pulled)
            }
            SyncAction::Skip => {
                debug!("Mirror is within the update interval");
                Ok(SyncOutcome::UpToDate)
            }
        }
    }

    fn clone_into(&self, mirror: &Path, repo: &RepoRef) -> Result<()> {
        info!("Cloning {repo} into {}", mirror.display());
        self.vcs.clone_repo(repo, mirror)?;
        self.vcs.update_submodules(mirror)
    }

    fn pull_into(&self, mirror: &Path, repo: &RepoRef) -> Result<()> {
        info!("Updating {} from {repo}", mirror.display());
        self.vcs.pull(mirror, &repo.branch)?;
        self.vcs.checkout(mirror, &repo.branch)?;
        self.vcs.reset_hard(mirror, &repo.branch)?;
        self.vcs.update_submodules(mirror)
    }
}

fn finish(progress: &mut dyn ProgressIndicator, result: &Result<()>, done: &str) {
    match result {
        Ok(()) => progress.complete(Some(done.to_string())),
        Err(e) => progress.error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GmanError;
    use crate::indicator::SilentProgress;
    use mockall::{Sequence, mock, predicate::*};
    use std::path::PathBuf;
    use tempfile::TempDir;

    mock! {
        Vcs {}

        impl VersionControl for Vcs {
            fn clone_repo(&self, repo: &RepoRef, dest: &Path) -> Result<()>;
            fn pull(&self, dir: &Path, branch: &str) -> Result<()>;
            fn checkout(&self, dir: &Path, branch: &str) -> Result<()>;
            fn reset_hard(&self, dir: &Path, branch: &str) -> Result<()>;
            fn update_submodules(&self, dir: &Path) -> Result<()>;
            fn last_fetched(&self, dir: &Path) -> Result<SystemTime>;
        }
    }

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn repo() -> RepoRef {
        RepoRef::new("https://git.example.com/org/docs.git", "main")
    }

    fn expect_pull(vcs: &mut MockVcs, seq: &mut Sequence) {
        vcs.expect_pull()
            .with(always(), eq("main"))
            .times(1)
            .in_sequence(seq)
            .returning(|_, _| Ok(()));
        vcs.expect_checkout()
            .with(always(), eq("main"))
            .times(1)
            .in_sequence(seq)
            .returning(|_, _| Ok(()));
        vcs.expect_reset_hard()
            .with(always(), eq("main"))
            .times(1)
            .in_sequence(seq)
            .returning(|_, _| Ok(()));
        vcs.expect_update_submodules()
            .times(1)
            .in_sequence(seq)
            .returning(|_| Ok(()));
    }

    #[test]
    fn test_plan_sync_policy() {
        let now = SystemTime::now();
        let hour_ago = now - Duration::from_secs(3600);
        let two_days_ago = now - 2 * DAY;

        assert_eq!(plan_sync(false, false, None, DAY, now), SyncAction::Clone);
        assert_eq!(plan_sync(false, true, None, DAY, now), SyncAction::Clone);
        assert_eq!(
            plan_sync(true, true, Some(hour_ago), DAY, now),
            SyncAction::Pull
        );
        assert_eq!(plan_sync(true, false, None, DAY, now), SyncAction::Pull);
        assert_eq!(
            plan_sync(true, false, Some(UNIX_EPOCH), DAY, now),
            SyncAction::Pull
        );
        assert_eq!(
            plan_sync(true, false, Some(two_days_ago), DAY, now),
            SyncAction::Pull
        );
        assert_eq!(
            plan_sync(true, false, Some(hour_ago), DAY, now),
            SyncAction::Skip
        );
        assert_eq!(
            plan_sync(true, false, Some(now - DAY), DAY, now),
            SyncAction::Pull
        );
        assert_eq!(
            plan_sync(true, false, Some(hour_ago), Duration::from_secs(u64::MAX), now),
            SyncAction::Skip
        );
        assert_eq!(
            plan_sync(true, false, Some(hour_ago), Duration::MAX, now),
            SyncAction::Skip
        );
    }

    #[test]
    fn test_zero_interval_disables_refresh() {
        let now = SystemTime::now();
        let long_ago = now - 365 * DAY;

        assert_eq!(
            plan_sync(true, false, Some(long_ago), Duration::ZERO, now),
            SyncAction::Skip
        );
        assert_eq!(
            plan_sync(true, true, Some(long_ago), Duration::ZERO, now),
            SyncAction::Pull
        );
    }

    #[test]
    fn test_missing_mirror_is_cloned_with_submodules() {
        let home = TempDir::new().unwrap();
        let mirror = home.path().join("src/git.example.com/org/docs");
        let expected = mirror.clone();

        let mut vcs = MockVcs::new();
        let mut seq = Sequence::new();
        vcs.expect_last_fetched().times(0);
        vcs.expect_clone_repo()
            .withf(move |repo, dest| repo.branch == "main" && dest == expected.as_path())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        vcs.expect_update_submodules()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let outcome = Synchronizer::new(Box::new(vcs))
            .ensure_fresh(&mirror, &repo(), false, DAY, &mut SilentProgress)
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Cloned);
    }

    #[test]
    fn test_clone_failure_is_propagated() {
        let home = TempDir::new().unwrap();
        let mirror = home.path().join("docs");

        let mut vcs = MockVcs::new();
        vcs.expect_clone_repo().times(1).returning(|_, _| {
            Err(GmanError::ProcessFailed {
                command: "git clone".to_string(),
                message: "exit status: 128".to_string(),
            })
        });
        vcs.expect_update_submodules().times(0);

        let err = Synchronizer::new(Box::new(vcs))
            .ensure_fresh(&mirror, &repo(), false, DAY, &mut SilentProgress)
            .unwrap_err();
        assert!(matches!(err, GmanError::ProcessFailed { .. }));
    }

    #[test]
    fn test_force_pulls_without_reading_fetch_time() {
        let mirror = TempDir::new().unwrap();

        let mut vcs = MockVcs::new();
        let mut seq = Sequence::new();
        vcs.expect_last_fetched().times(0);
        expect_pull(&mut vcs, &mut seq);

        let outcome = Synchronizer::new(Box::new(vcs))
            .ensure_fresh(mirror.path(), &repo(), true, DAY, &mut SilentProgress)
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Pulled);
    }

    #[test]
    fn test_stale_mirror_is_pulled() {
        let mirror = TempDir::new().unwrap();

        let mut vcs = MockVcs::new();
        let mut seq = Sequence::new();
        vcs.expect_last_fetched()
            .times(1)
            .returning(|_| Ok(SystemTime::now() - 2 * DAY));
        expect_pull(&mut vcs, &mut seq);

        let outcome = Synchronizer::new(Box::new(vcs))
            .ensure_fresh(mirror.path(), &repo(), false, DAY, &mut SilentProgress)
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Pulled);
    }

    #[test]
    fn test_unreadable_fetch_time_is_pulled() {
        let mirror = TempDir::new().unwrap();

        let mut vcs = MockVcs::new();
        let mut seq = Sequence::new();
        vcs.expect_last_fetched().times(1).returning(|dir: &Path| {
            Err(GmanError::DirectoryNotFound(
                PathBuf::from(dir).join(".git").display().to_string(),
            ))
        });
        expect_pull(&mut vcs, &mut seq);

        let outcome = Synchronizer::new(Box::new(vcs))
            .ensure_fresh(mirror.path(), &repo(), false, DAY, &mut SilentProgress)
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Pulled);
    }

    #[test]
    fn test_fresh_mirror_is_left_alone() {
        let mirror = TempDir::new().unwrap();

        let mut vcs = MockVcs::new();
        vcs.expect_last_fetched()
            .times(1)
            .returning(|_| Ok(SystemTime::now() - Duration::from_secs(60)));
        vcs.expect_pull().times(0);
        vcs.expect_clone_repo().times(0);

        let outcome = Synchronizer::new(Box::new(vcs))
            .ensure_fresh(mirror.path(), &repo(), false, DAY, &mut SilentProgress)
            .unwrap();
        assert_eq!(outcome, SyncOutcome::UpToDate);
    }

    #[test]
    fn test_pull_stops_at_first_failure() {
        let mirror = TempDir::new().unwrap();

        let mut vcs = MockVcs::new();
        vcs.expect_pull().times(1).returning(|_, _| {
            Err(GmanError::ProcessFailed {
                command: "git pull origin main".to_string(),
                message: "exit status: 1".to_string(),
            })
        });
        vcs.expect_checkout().times(0);
        vcs.expect_reset_hard().times(0);
        vcs.expect_update_submodules().times(0);

        let result = Synchronizer::new(Box::new(vcs)).ensure_fresh(
            mirror.path(),
            &repo(),
            true,
            DAY,
            &mut SilentProgress,
        );
        assert!(result.is_err());
    }
}
