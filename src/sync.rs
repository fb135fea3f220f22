//! The reconciliation run: one pass closing stories whose issue is gone,
//! one pass creating or updating stories for the issues that remain.

use std::collections::HashSet;

use anyhow::Result;

use crate::config::Config;
use crate::model::issue::Issue;
use crate::model::story::{StoryDraft, StoryUpdate};
use crate::trackers::{IssueSource, StoryTracker};

/// Creations are buffered and flushed through the bulk endpoint in groups
/// of this size to bound request volume.
const CREATE_BATCH_SIZE: usize = 10;

/// Counts reported after a run. A dry run counts would-be operations.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub created: usize,
    pub updated: usize,
    pub closed: usize,
}

pub async fn run(
    config: &Config,
    source: &dyn IssueSource,
    tracker: &dyn StoryTracker,
    dry_run: bool,
) -> Result<Outcome> {
    println!("Syncing issues from GitHub to Shortcut...");

    // GitHub's listing mixes pull requests in with issues; drop them before
    // either pass so they are never created and never count as seen.
    let issues: Vec<Issue> = source
        .list_open_issues()
        .await?
        .into_iter()
        .filter(|issue| !issue.is_pull_request())
        .collect();

    println!("Open GitHub issues: {}", issues.len());

    let mut outcome = Outcome::default();
    close_stale_stories(config, tracker, &issues, dry_run, &mut outcome).await?;
    create_or_update(config, tracker, &issues, dry_run, &mut outcome).await?;
    Ok(outcome)
}

/// Set-difference pass: every labeled story whose external id is not among
/// the open issue numbers goes to the done state in one bulk call. Moving
/// an already-done story is a no-op on the Shortcut side, so no tie-breaks
/// are needed.
async fn close_stale_stories(
    config: &Config,
    tracker: &dyn StoryTracker,
    issues: &[Issue],
    dry_run: bool,
    outcome: &mut Outcome,
) -> Result<()> {
    let seen: HashSet<String> = issues.iter().map(|i| i.number.to_string()).collect();

    let labeled = tracker.list_label_stories(config.sync_label_id).await?;
    let stale: Vec<u64> = labeled
        .iter()
        .filter(|story| {
            // A labeled story with no external id has no backing issue
            // either; it goes to done with the rest.
            story
                .external_id
                .as_ref()
                .map_or(true, |id| !seen.contains(id))
        })
        .map(|story| story.id)
        .collect();

    if stale.is_empty() {
        return Ok(());
    }

    if dry_run {
        println!("[dry run] Marking stories as done: {stale:?}");
    } else {
        tracker
            .mark_done(&stale, config.workflow_state_done)
            .await?;
    }
    outcome.closed = stale.len();
    Ok(())
}

/// Per-issue pass, in listing order: look the issue up by link, then either
/// queue a creation or update the matched stories' two synced fields.
async fn create_or_update(
    config: &Config,
    tracker: &dyn StoryTracker,
    issues: &[Issue],
    dry_run: bool,
    outcome: &mut Outcome,
) -> Result<()> {
    let mut pending: Vec<StoryDraft> = Vec::new();

    for issue in issues {
        let number = issue.number.to_string();
        // The link index can return stories from colliding or reused URLs;
        // only an exact external id ties a story to this issue.
        let matches: Vec<_> = tracker
            .stories_for_link(&issue.url)
            .await?
            .into_iter()
            .filter(|story| story.external_id.as_deref() == Some(number.as_str()))
            .collect();

        let fresh = StoryUpdate::from_issue(config, issue);

        if matches.is_empty() {
            outcome.created += 1;
            if dry_run {
                println!(
                    "[dry run] Creating story: {} ({})",
                    fresh.name,
                    preview(&fresh.description)
                );
                continue;
            }
            pending.push(StoryDraft::from_issue(config, issue));
            if pending.len() == CREATE_BATCH_SIZE {
                tracker.create_stories(&pending).await?;
                pending.clear();
            }
        } else {
            // Duplicate link matches are tolerated: each one gets the same
            // update rather than erroring out.
            for story in &matches {
                if fresh.matches(story) {
                    continue;
                }
                outcome.updated += 1;
                if dry_run {
                    println!(
                        "[dry run] Updating story {}: {} ({})",
                        story.id,
                        fresh.name,
                        preview(&fresh.description)
                    );
                } else {
                    tracker.update_story(story.id, &fresh).await?;
                }
            }
        }
    }

    if !pending.is_empty() {
        tracker.create_stories(&pending).await?;
    }
    Ok(())
}

/// Short description excerpt for log lines.
fn preview(description: &str) -> String {
    let head: String = description.chars().take(16).collect();
    if description.chars().count() > 16 {
        format!("{head}...")
    } else {
        head
    }
}
