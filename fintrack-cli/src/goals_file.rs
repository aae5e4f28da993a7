//! Load savings goals and their contributions from a JSON file.

use anyhow::{Context, Result};
use fintrack_core::{GoalContribution, SavingsGoal};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GoalsFile {
    pub goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub contributions: Vec<GoalContribution>,
}

impl GoalsFile {
    /// Contributions belonging to one goal, in file order.
    pub fn contributions_for(&self, goal_id: &str) -> Vec<GoalContribution> {
        self.contributions
            .iter()
            .filter(|c| c.goal_id == goal_id)
            .cloned()
            .collect()
    }
}

pub fn load_goals_file(path: impl AsRef<Path>) -> Result<GoalsFile> {
    let s = fs::read_to_string(path.as_ref())
        .with_context(|| format!("read {}", path.as_ref().display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.as_ref().display()))
}
