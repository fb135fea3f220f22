use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::IssueSource;
use crate::config::Config;
use crate::model::issue::Issue;

const API_BASE: &str = "https://api.github.com";
const PAGE_SIZE: usize = 100;

pub struct GitHubClient {
    owner: String,
    repo: String,
    auth_header: String,
    client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Self {
        Self {
            owner: config.github_owner.clone(),
            repo: config.github_repo.clone(),
            auth_header: format!("token {}", config.github_token),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct GhIssue {
    id: u64,
    number: u64,
    title: String,
    body: Option<String>,
    html_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GhIssue> for Issue {
    fn from(raw: GhIssue) -> Self {
        Issue {
            id: raw.id,
            number: raw.number,
            title: raw.title,
            body: raw.body,
            url: raw.html_url,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    async fn list_open_issues(&self) -> Result<Vec<Issue>> {
        let url = format!("{API_BASE}/repos/{}/{}/issues", self.owner, self.repo);
        let mut issues = Vec::new();
        let mut page: u32 = 1;

        loop {
            let page_param = page.to_string();
            let resp = self
                .client
                .get(&url)
                .header("Authorization", &self.auth_header)
                .header("Accept", "application/vnd.github+json")
                .header("User-Agent", "shortcut-sync")
                .query(&[
                    ("state", "open"),
                    ("per_page", "100"),
                    ("page", page_param.as_str()),
                ])
                .send()
                .await
                .context("GitHub issues request failed")?;

            if !resp.status().is_success() {
                bail!("GitHub issues request returned {}", resp.status());
            }

            let batch: Vec<GhIssue> = resp
                .json()
                .await
                .context("Failed to parse GitHub issues response")?;

            let last_page = batch.len() < PAGE_SIZE;
            issues.extend(batch.into_iter().map(Issue::from));
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(issues)
    }
}
