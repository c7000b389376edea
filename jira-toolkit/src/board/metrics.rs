//! Board metrics.

use crate::client::Issue;

/// Simple counts over a list of board issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardMetrics {
    /// Number of issues.
    pub issue_count: usize,

    /// Issues per status, in first-seen order. Issues without a status are
    /// counted under `"Unknown"`.
    pub by_status: Vec<(String, usize)>,

    /// Sum of story points over estimated issues.
    pub story_points: f64,

    /// Number of issues that carry story points.
    pub estimated_issues: usize,
}

impl BoardMetrics {
    /// Collects metrics, reading story points from `story_points_field`.
    #[must_use]
    pub fn collect(issues: &[Issue], story_points_field: &str) -> Self {
        let mut metrics = Self {
            issue_count: issues.len(),
            ..Self::default()
        };

        for issue in issues {
            let status = issue.status_name().unwrap_or("Unknown");
            match metrics.by_status.iter_mut().find(|(name, _)| name == status) {
                Some((_, count)) => *count += 1,
                None => metrics.by_status.push((status.to_string(), 1)),
            }

            if let Some(points) = issue.story_points(story_points_field) {
                metrics.story_points += points;
                metrics.estimated_issues += 1;
            }
        }

        metrics
    }
}
