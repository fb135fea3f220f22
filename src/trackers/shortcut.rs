use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use super::StoryTracker;
use crate::config::Config;
use crate::model::story::{Story, StoryDraft, StoryUpdate};

const API_BASE: &str = "https://api.shortcut.com/api/v3";

pub struct ShortcutClient {
    token: String,
    client: reqwest::Client,
}

impl ShortcutClient {
    pub fn new(config: &Config) -> Self {
        Self {
            token: config.shortcut_token.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct BulkCreate<'a> {
    stories: &'a [StoryDraft],
}

#[derive(Serialize)]
struct BulkStateUpdate<'a> {
    story_ids: &'a [u64],
    workflow_state_id: u64,
}

#[async_trait]
impl StoryTracker for ShortcutClient {
    async fn list_label_stories(&self, label_id: u64) -> Result<Vec<Story>> {
        let resp = self
            .client
            .get(format!("{API_BASE}/labels/{label_id}/stories"))
            .header("Shortcut-Token", &self.token)
            .send()
            .await
            .context("Shortcut label stories request failed")?;

        if !resp.status().is_success() {
            bail!("Shortcut label stories request returned {}", resp.status());
        }

        resp.json()
            .await
            .context("Failed to parse Shortcut label stories response")
    }

    async fn stories_for_link(&self, external_link: &str) -> Result<Vec<Story>> {
        let resp = self
            .client
            .get(format!("{API_BASE}/external-link/stories"))
            .header("Shortcut-Token", &self.token)
            .query(&[("external_link", external_link)])
            .send()
            .await
            .context("Shortcut external-link lookup failed")?;

        if !resp.status().is_success() {
            bail!("Shortcut external-link lookup returned {}", resp.status());
        }

        resp.json()
            .await
            .context("Failed to parse Shortcut external-link response")
    }

    async fn create_stories(&self, drafts: &[StoryDraft]) -> Result<()> {
        let resp = self
            .client
            .post(format!("{API_BASE}/stories/bulk"))
            .header("Shortcut-Token", &self.token)
            .json(&BulkCreate { stories: drafts })
            .send()
            .await
            .context("Shortcut bulk story creation failed")?;

        if !resp.status().is_success() {
            bail!("Shortcut bulk story creation returned {}", resp.status());
        }
        Ok(())
    }

    async fn update_story(&self, story_id: u64, update: &StoryUpdate) -> Result<()> {
        let resp = self
            .client
            .put(format!("{API_BASE}/stories/{story_id}"))
            .header("Shortcut-Token", &self.token)
            .json(update)
            .send()
            .await
            .with_context(|| format!("Shortcut update of story {story_id} failed"))?;

        if !resp.status().is_success() {
            bail!(
                "Shortcut update of story {story_id} returned {}",
                resp.status()
            );
        }
        Ok(())
    }

    async fn mark_done(&self, story_ids: &[u64], workflow_state_id: u64) -> Result<()> {
        let resp = self
            .client
            .put(format!("{API_BASE}/stories/bulk"))
            .header("Shortcut-Token", &self.token)
            .json(&BulkStateUpdate {
                story_ids,
                workflow_state_id,
            })
            .send()
            .await
            .context("Shortcut bulk workflow update failed")?;

        if !resp.status().is_success() {
            bail!("Shortcut bulk workflow update returned {}", resp.status());
        }
        Ok(())
    }
}
