//! Per-user history of free ATS and LinkedIn checks.
//!
//! Every check a logged-in visitor runs is recorded against their identity
//! and read back by the user dashboard. Histories live in a `moka` cache and
//! are dropped after a week without a new check, like an idle session.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use easemyform_core::{Identity, Percent};
use moka::future::Cache;

/// Upper bound on users with a tracked history.
const MAX_TRACKED_USERS: u64 = 10_000;

/// Idle time after which a history is forgotten.
const HISTORY_IDLE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Checks kept per user; the oldest are dropped first.
pub const MAX_CHECKS_PER_USER: usize = 20;

/// Which free tool produced a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Ats,
    Linkedin,
}

impl CheckKind {
    /// Activity label on the dashboard.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ats => "ATS Score Check",
            Self::Linkedin => "LinkedIn Review",
        }
    }
}

/// One recorded check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCheck {
    pub kind: CheckKind,
    pub score: Percent,
    /// The file name or profile URL that was checked.
    pub subject: String,
    pub checked_at: DateTime<Utc>,
}

impl ScoreCheck {
    /// A check made just now.
    #[must_use]
    pub fn now(kind: CheckKind, score: Percent, subject: impl Into<String>) -> Self {
        Self {
            kind,
            score,
            subject: subject.into(),
            checked_at: Utc::now(),
        }
    }
}

/// Recorded checks, keyed by identity.
#[derive(Clone)]
pub struct ScoreHistory {
    checks: Cache<String, Arc<Vec<ScoreCheck>>>,
}

impl std::fmt::Debug for ScoreHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreHistory")
            .field("users", &self.checks.entry_count())
            .finish()
    }
}

impl Default for ScoreHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreHistory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            checks: Cache::builder()
                .max_capacity(MAX_TRACKED_USERS)
                .time_to_idle(HISTORY_IDLE)
                .build(),
        }
    }

    /// Record `check` as the most recent one for `user`.
    pub async fn record(&self, user: &Identity, check: ScoreCheck) {
        tracing::debug!(kind = ?check.kind, score = check.score.value(), "Recording check");
        self.checks
            .entry(history_key(user))
            .and_upsert_with(|existing| {
                let mut checks = existing
                    .map(|entry| Arc::unwrap_or_clone(entry.into_value()))
                    .unwrap_or_default();
                checks.insert(0, check);
                checks.truncate(MAX_CHECKS_PER_USER);
                std::future::ready(Arc::new(checks))
            })
            .await;
    }

    /// Checks for `user`, most recent first.
    pub async fn checks(&self, user: &Identity) -> Vec<ScoreCheck> {
        self.checks
            .get(&history_key(user))
            .await
            .map(|checks| checks.as_ref().clone())
            .unwrap_or_default()
    }
}

/// Verified phone numbers identify a user; identities without one fall back
/// to the display name.
fn history_key(user: &Identity) -> String {
    user.phone.as_ref().map_or_else(
        || format!("name:{}", user.name),
        |phone| phone.as_str().to_string(),
    )
}

/// Label such as "just now" or "3 days ago" for `at`, seen from `now`.
#[must_use]
pub fn relative_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds().max(0);
    match seconds {
        0..60 => "just now".to_string(),
        60..3_600 => format!("{} min ago", seconds / 60),
        3_600..86_400 => plural_ago(seconds / 3_600, "hour"),
        _ => plural_ago(seconds / 86_400, "day"),
    }
}

fn plural_ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeDelta;
    use easemyform_core::PhoneNumber;

    use super::*;

    fn asha() -> Identity {
        Identity::new("Asha").with_phone(PhoneNumber::parse("+919876543210").unwrap())
    }

    #[tokio::test]
    async fn test_checks_are_most_recent_first() {
        let history = ScoreHistory::new();
        history
            .record(&asha(), ScoreCheck::now(CheckKind::Ats, Percent::clamped(31), "a.pdf"))
            .await;
        history
            .record(&asha(), ScoreCheck::now(CheckKind::Linkedin, Percent::clamped(44), "url"))
            .await;

        let checks = history.checks(&asha()).await;
        let kinds: Vec<_> = checks.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, [CheckKind::Linkedin, CheckKind::Ats]);
        assert_eq!(checks[1].subject, "a.pdf");
    }

    #[tokio::test]
    async fn test_histories_are_per_user() {
        let history = ScoreHistory::new();
        history
            .record(&asha(), ScoreCheck::now(CheckKind::Ats, Percent::clamped(31), "a.pdf"))
            .await;

        let ravi = Identity::new("Ravi").with_phone(PhoneNumber::parse("+919999900000").unwrap());
        assert!(history.checks(&ravi).await.is_empty());
        assert!(history.checks(&Identity::new("Asha")).await.is_empty());
    }

    #[tokio::test]
    async fn test_history_is_capped() {
        let history = ScoreHistory::new();
        for i in 0..MAX_CHECKS_PER_USER + 5 {
            let check = ScoreCheck::now(CheckKind::Ats, Percent::clamped(30), format!("{i}.pdf"));
            history.record(&asha(), check).await;
        }

        let checks = history.checks(&asha()).await;
        assert_eq!(checks.len(), MAX_CHECKS_PER_USER);
        assert_eq!(checks[0].subject, format!("{}.pdf", MAX_CHECKS_PER_USER + 4));
    }

    #[test]
    fn test_relative_label() {
        let now = Utc::now();
        let ago = |delta: TimeDelta| relative_label(now - delta, now);
        assert_eq!(ago(TimeDelta::seconds(5)), "just now");
        assert_eq!(ago(TimeDelta::minutes(15)), "15 min ago");
        assert_eq!(ago(TimeDelta::hours(1)), "1 hour ago");
        assert_eq!(ago(TimeDelta::hours(5)), "5 hours ago");
        assert_eq!(ago(TimeDelta::days(1)), "1 day ago");
        assert_eq!(ago(TimeDelta::days(9)), "9 days ago");
        assert_eq!(relative_label(now + TimeDelta::seconds(30), now), "just now");
    }
}
