use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::model::issue::Issue;

/// A story as returned by Shortcut's list and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Story {
    pub id: u64,
    pub name: String,
    /// Some listings omit the description; treated as empty for comparison.
    #[serde(default)]
    pub description: String,
    /// Issue number of the mirrored issue, when the story was created by
    /// this tool. Stories made by hand may carry none.
    pub external_id: Option<String>,
}

/// Label reference attached to created stories.
#[derive(Debug, Clone, Serialize)]
pub struct StoryLabel {
    pub id: u64,
}

/// Creation payload; sent through the bulk endpoint in batches.
#[derive(Debug, Clone, Serialize)]
pub struct StoryDraft {
    pub name: String,
    pub description: String,
    pub external_id: String,
    pub external_links: Vec<String>,
    pub labels: Vec<StoryLabel>,
    pub workflow_state_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoryDraft {
    pub fn from_issue(config: &Config, issue: &Issue) -> Self {
        let StoryUpdate { name, description } = StoryUpdate::from_issue(config, issue);
        Self {
            name,
            description,
            external_id: issue.number.to_string(),
            external_links: vec![issue.url.clone()],
            labels: vec![StoryLabel {
                id: config.sync_label_id,
            }],
            workflow_state_id: config.workflow_state_new,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        }
    }
}

/// The two synced fields. Everything else on a story (labels, workflow
/// state, links) is owned by whoever manages it in Shortcut and is never
/// touched after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryUpdate {
    pub name: String,
    pub description: String,
}

impl StoryUpdate {
    pub fn from_issue(config: &Config, issue: &Issue) -> Self {
        Self {
            name: format!("{} {}", config.story_prefix, issue.title),
            description: issue.body.clone().unwrap_or_default(),
        }
    }

    /// True when the story already carries exactly the synced values.
    pub fn matches(&self, story: &Story) -> bool {
        story.name == self.name && story.description == self.description
    }
}
