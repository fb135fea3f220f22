pub mod github;
pub mod shortcut;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::issue::Issue;
use crate::model::story::{Story, StoryDraft, StoryUpdate};

/// Read side of the sync: the tracker issues come from.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Every currently open issue, in the tracker's listing order.
    async fn list_open_issues(&self) -> Result<Vec<Issue>>;
}

/// Write side of the sync: the tracker stories live in.
#[async_trait]
pub trait StoryTracker: Send + Sync {
    /// All stories carrying the given label.
    async fn list_label_stories(&self, label_id: u64) -> Result<Vec<Story>>;

    /// Stories whose external links include the given URL. The link index
    /// can return false positives; callers filter on external_id.
    async fn stories_for_link(&self, external_link: &str) -> Result<Vec<Story>>;

    /// Create a batch of stories in one request.
    async fn create_stories(&self, drafts: &[StoryDraft]) -> Result<()>;

    /// Update one story's name and description.
    async fn update_story(&self, story_id: u64, update: &StoryUpdate) -> Result<()>;

    /// Move a set of stories to the given workflow state in one request.
    async fn mark_done(&self, story_ids: &[u64], workflow_state_id: u64) -> Result<()>;
}
