//! Core data model for a grading run.
//!
//! All scores are computed fresh per invocation and clamped at construction
//! time, so a `TaskResult` or `GradeReport` can never carry an out-of-range
//! value no matter what the scorers hand it.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marks awarded for an on-time (or unverifiable) submission.
pub const SUBMISSION_MAX: u32 = 20;
/// Marks awarded for a late submission.
pub const LATE_SUBMISSION_SCORE: u32 = 10;
/// Combined maximum across all six implementation tasks.
pub const IMPLEMENTATION_MAX: u32 = 80;
/// Submission plus implementation.
pub const TOTAL_MAX: u32 = 100;
/// Minimum adjusted implementation score once at least one task is attempted.
pub const ATTEMPT_FLOOR: u32 = 50;
/// Number of graded tasks.
pub const TASK_COUNT: usize = 6;

/// Per-category score ceilings for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCaps {
    pub completeness: u32,
    pub correctness: u32,
    pub quality: u32,
}

impl CategoryCaps {
    /// The task maximum implied by the category ceilings.
    pub const fn total(&self) -> u32 {
        self.completeness + self.correctness + self.quality
    }
}

/// The graded outcome of a single implementation task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    /// Task identifier, 1 through 6.
    pub id: u8,
    /// Human-readable task label, as shown to the student.
    pub label: String,
    /// Maximum marks for this task.
    pub max: u32,
    /// Marks for the required construct being present at all.
    pub completeness: u32,
    /// Marks for the construct behaving as the assignment requires.
    pub correctness: u32,
    /// Marks for stylistic/robustness signals.
    pub quality: u32,
    /// Sum of the three categories, capped at `max`.
    pub score: u32,
    /// Ordered evidence strings explaining what was found or missing.
    pub details: Vec<String>,
}

impl TaskResult {
    /// Build a result from raw category points, clamping each category to
    /// its ceiling and the total to the task maximum.
    pub fn from_parts(
        id: u8,
        label: &str,
        caps: CategoryCaps,
        completeness: u32,
        correctness: u32,
        quality: u32,
        details: Vec<String>,
    ) -> Self {
        let completeness = completeness.min(caps.completeness);
        let correctness = correctness.min(caps.correctness);
        let quality = quality.min(caps.quality);
        let max = caps.total();
        Self {
            id,
            label: label.to_string(),
            max,
            completeness,
            correctness,
            quality,
            score: (completeness + correctness + quality).min(max),
            details,
        }
    }

    /// A task counts as attempted once it earns any marks.
    pub fn is_attempted(&self) -> bool {
        self.score > 0
    }

    /// A task is fully correct when it reaches its maximum.
    pub fn is_fully_correct(&self) -> bool {
        self.score >= self.max
    }
}

/// Result of the submission-timing check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Either [`SUBMISSION_MAX`] or [`LATE_SUBMISSION_SCORE`].
    pub score: u32,
    /// Always [`SUBMISSION_MAX`].
    pub max: u32,
    /// Whether the submission was (or is assumed) on time.
    pub on_time: bool,
    /// Explanation of how the score was decided.
    pub reason: String,
}

/// A complete grading run, ready to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique run identifier (only surfaced in the JSON document).
    pub id: Uuid,
    /// When the report was created (only surfaced in the JSON document).
    pub created_at: DateTime<Utc>,
    /// Outcome of the submission-timing check.
    pub submission: SubmissionResult,
    /// The six task results, in task order.
    pub tasks: Vec<TaskResult>,
    /// Plain sum of the six task scores.
    pub implementation_raw: u32,
    /// Raw sum after the flexible-rounding policy.
    pub implementation_adjusted: u32,
    /// Always [`IMPLEMENTATION_MAX`].
    pub implementation_max: u32,
    /// Tasks with a nonzero score.
    pub attempted_tasks: usize,
    /// Tasks at their maximum.
    pub fully_correct_tasks: usize,
    /// Submission score plus adjusted implementation score.
    pub total: u32,
    /// Always [`TOTAL_MAX`].
    pub total_max: u32,
}

impl GradeReport {
    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPS: CategoryCaps = CategoryCaps {
        completeness: 5,
        correctness: 5,
        quality: 4,
    };

    #[test]
    fn from_parts_clamps_each_category() {
        let task = TaskResult::from_parts(1, "Task", CAPS, 9, 9, 9, vec![]);
        assert_eq!(task.completeness, 5);
        assert_eq!(task.correctness, 5);
        assert_eq!(task.quality, 4);
        assert_eq!(task.score, 14);
        assert_eq!(task.max, 14);
    }

    #[test]
    fn from_parts_keeps_in_range_values() {
        let task = TaskResult::from_parts(3, "Task", CAPS, 3, 0, 2, vec!["found".into()]);
        assert_eq!(task.score, 5);
        assert!(task.is_attempted());
        assert!(!task.is_fully_correct());
        assert_eq!(task.details, vec!["found".to_string()]);
    }

    #[test]
    fn zero_score_is_not_attempted() {
        let task = TaskResult::from_parts(2, "Task", CAPS, 0, 0, 0, vec![]);
        assert!(!task.is_attempted());
        assert!(!task.is_fully_correct());
    }

    #[test]
    fn category_caps_total() {
        assert_eq!(CAPS.total(), 14);
        let six = CategoryCaps {
            completeness: 4,
            correctness: 3,
            quality: 3,
        };
        assert_eq!(six.total(), 10);
    }

    #[test]
    fn report_json_roundtrip() {
        let report = GradeReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            submission: SubmissionResult {
                score: SUBMISSION_MAX,
                max: SUBMISSION_MAX,
                on_time: true,
                reason: "on time".into(),
            },
            tasks: vec![TaskResult::from_parts(1, "Task", CAPS, 5, 5, 4, vec![])],
            implementation_raw: 14,
            implementation_adjusted: 50,
            implementation_max: IMPLEMENTATION_MAX,
            attempted_tasks: 1,
            fully_correct_tasks: 1,
            total: 70,
            total_max: TOTAL_MAX,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.save_json(&path).unwrap();
        let loaded = GradeReport::load_json(&path).unwrap();
        assert_eq!(loaded.total, 70);
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].score, 14);
    }
}
