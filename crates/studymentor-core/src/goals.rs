//! Today's goal list.
//!
//! Goals are addressed by position. Positions shift down after a removal, so
//! callers must not hold on to an index across a mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationError};
use crate::events::Celebration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub text: String,
    pub minutes_planned: u32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Ordered list of goals; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalLedger {
    goals: Vec<Goal>,
}

impl GoalLedger {
    pub fn from_goals(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, position: usize) -> Option<&Goal> {
        self.goals.get(position)
    }

    /// Append a goal. Text is trimmed; empty text and a zero plan are
    /// rejected without touching the ledger.
    pub fn add(&mut self, text: &str, minutes_planned: u32, now: DateTime<Utc>) -> Result<&Goal> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyGoalText.into());
        }
        if minutes_planned == 0 {
            return Err(ValidationError::NonPositive {
                field: "minutesPlanned".into(),
            }
            .into());
        }
        self.goals.push(Goal {
            text: text.to_string(),
            minutes_planned,
            completed: false,
            created_at: now,
        });
        Ok(&self.goals[self.goals.len() - 1])
    }

    /// Set a goal's completion flag.
    ///
    /// Returns [`Celebration::AllGoalsCompleted`] when this call completes the
    /// last incomplete goal.
    pub fn toggle(&mut self, position: usize, completed: bool) -> Result<Option<Celebration>> {
        let len = self.goals.len();
        let goal = self
            .goals
            .get_mut(position)
            .ok_or_else(|| out_of_range(position, len))?;
        let was_completed = goal.completed;
        goal.completed = completed;

        if completed && !was_completed && self.goals.iter().all(|g| g.completed) {
            return Ok(Some(Celebration::AllGoalsCompleted));
        }
        Ok(None)
    }

    /// Remove the goal at `position`; later goals move down by one.
    pub fn remove(&mut self, position: usize) -> Result<Goal> {
        if position >= self.goals.len() {
            return Err(out_of_range(position, self.goals.len()));
        }
        Ok(self.goals.remove(position))
    }

    pub fn completed_count(&self) -> usize {
        self.goals.iter().filter(|g| g.completed).count()
    }

    pub fn total(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// 0.0 ..= 1.0; 0 for an empty ledger.
    pub fn completion_ratio(&self) -> f64 {
        if self.goals.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.goals.len() as f64
    }
}

fn out_of_range(index: usize, len: usize) -> CoreError {
    CoreError::IndexOutOfRange {
        collection: "goals".into(),
        index,
        len,
    }
}
