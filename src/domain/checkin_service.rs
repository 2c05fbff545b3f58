//! Check-in recording with point awards and achievement follow-up.

use std::sync::Arc;

use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::achievement::UserAchievement;
use crate::domain::achievement_service::AchievementEvaluator;
use crate::domain::checkin::{CheckIn, NewCheckIn, DEFAULT_CHECK_IN_POINTS};
use crate::domain::error::Error;
use crate::domain::ports::{CheckInPersistenceError, CheckInRepository};
use crate::domain::user::UserId;

/// Outcome of recording a check-in.
#[derive(Debug, Clone)]
pub struct CheckInOutcome {
    pub check_in: CheckIn,
    /// Achievements newly unlocked by this visit.
    pub unlocked: Vec<UserAchievement>,
}

/// Records check-ins, credits points, and triggers achievement evaluation.
///
/// The insert and the point credit commit atomically; achievement
/// evaluation runs afterwards, so a failed evaluation never rolls back the
/// visit. The next check-in re-evaluates from scratch and picks up anything
/// missed.
pub struct CheckInLedger {
    check_ins: Arc<dyn CheckInRepository>,
    evaluator: Arc<AchievementEvaluator>,
    points_per_check_in: i32,
}

impl CheckInLedger {
    pub fn new(check_ins: Arc<dyn CheckInRepository>, evaluator: Arc<AchievementEvaluator>) -> Self {
        Self {
            check_ins,
            evaluator,
            points_per_check_in: DEFAULT_CHECK_IN_POINTS,
        }
    }

    /// Override the per-visit point award.
    pub fn with_award(mut self, points: i32) -> Self {
        self.points_per_check_in = points;
        self
    }

    /// Record a visit. Repeat check-ins at the same bar are allowed and
    /// each earns the full award.
    pub async fn record(
        &self,
        bar_id: Uuid,
        user_id: UserId,
        note: Option<String>,
        photo_url: Option<String>,
    ) -> Result<CheckInOutcome, Error> {
        let new_check_in = NewCheckIn {
            bar_id,
            user_id,
            note: note.filter(|text| !text.trim().is_empty()),
            photo_url,
            points: self.points_per_check_in,
        };
        let check_in = self
            .check_ins
            .record(&new_check_in)
            .await
            .map_err(map_checkin_error)?;

        // Evaluation failures are logged, not surfaced; the check-in stands.
        let unlocked = match self.evaluator.evaluate(&user_id).await {
            Ok(unlocked) => unlocked,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "achievement evaluation failed");
                Vec::new()
            }
        };
        Ok(CheckInOutcome { check_in, unlocked })
    }

    /// Check-ins for a user, newest first.
    pub async fn for_user(&self, user_id: &UserId) -> Result<Vec<CheckIn>, Error> {
        self.check_ins
            .list_for_user(user_id)
            .await
            .map_err(map_checkin_error)
    }

    /// Check-ins at a bar, newest first.
    pub async fn for_bar(&self, bar_id: Uuid) -> Result<Vec<CheckIn>, Error> {
        self.check_ins
            .list_for_bar(bar_id)
            .await
            .map_err(map_checkin_error)
    }
}

fn map_checkin_error(err: CheckInPersistenceError) -> Error {
    match err {
        CheckInPersistenceError::BarNotFound => Error::not_found("Bar not found"),
        CheckInPersistenceError::Connection(cause) => {
            error!(error = %cause, "check-in store unavailable");
            Error::service_unavailable("Service temporarily unavailable")
        }
        CheckInPersistenceError::Query(cause) => {
            error!(error = %cause, "check-in query failed");
            Error::internal("Internal server error")
        }
    }
}
