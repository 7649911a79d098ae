//! Suggested automations shown beside the dashboard.
//!
//! These are descriptions only. Nothing here evaluates a rule against call
//! data or triggers an action.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub action: String,
}

impl PlaybookRule {
    fn when(condition: &str, action: &str) -> Self {
        Self {
            condition: Some(condition.to_string()),
            action: action.to_string(),
        }
    }

    fn always(action: &str) -> Self {
        Self {
            condition: None,
            action: action.to_string(),
        }
    }

    pub fn describe(&self) -> String {
        match &self.condition {
            Some(condition) => format!("If {condition} -> {}", self.action),
            None => self.action.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookSection {
    pub title: String,
    pub rules: Vec<PlaybookRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationPlaybook {
    pub sections: Vec<PlaybookSection>,
}

#[derive(Debug, thiserror::Error)]
pub enum PlaybookError {
    #[error("failed to read automation playbook: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid automation playbook JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("automation playbook section '{0}' has no rules")]
    EmptySection(String),
    #[error("automation playbook has no sections")]
    Empty,
}

impl AutomationPlaybook {
    pub fn standard() -> Self {
        Self {
            sections: vec![
                PlaybookSection {
                    title: "Follow-Up Triggers".to_string(),
                    rules: vec![
                        PlaybookRule::when(
                            "Correct Initial Call but no Offer Made",
                            "schedule auto follow-up in 24h",
                        ),
                        PlaybookRule::when(
                            "Follow Up 1 completed",
                            "auto-schedule Follow Up 2 in 3 days",
                        ),
                    ],
                },
                PlaybookSection {
                    title: "Alerts".to_string(),
                    rules: vec![
                        PlaybookRule::when("Connection Rate drops below 10%", "notify manager"),
                        PlaybookRule::when("Wrong Number Rate > 30%", "flag list for review"),
                    ],
                },
                PlaybookSection {
                    title: "CRM Reminders".to_string(),
                    rules: vec![
                        PlaybookRule::always(
                            "Push daily summaries to Slack or Email with key stats",
                        ),
                        PlaybookRule::always("Track performance trends weekly"),
                    ],
                },
            ],
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, PlaybookError> {
        let playbook: Self = serde_json::from_str(raw)?;
        playbook.validate()?;
        Ok(playbook)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PlaybookError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    fn validate(&self) -> Result<(), PlaybookError> {
        if self.sections.is_empty() {
            return Err(PlaybookError::Empty);
        }
        match self.sections.iter().find(|section| section.rules.is_empty()) {
            Some(section) => Err(PlaybookError::EmptySection(section.title.clone())),
            None => Ok(()),
        }
    }

    /// Markdown bullet list, one nested list per section.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                output.push('\n');
            }
            let _ = writeln!(output, "- **{}**:", section.title);
            for rule in &section.rules {
                let _ = writeln!(output, "    - {}.", rule.describe());
            }
        }
        output
    }
}
