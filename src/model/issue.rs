use chrono::{DateTime, Utc};

/// An issue in the source GitHub repository. Read-only: the sync never
/// writes anything back to GitHub.
#[derive(Debug, Clone)]
pub struct Issue {
    /// GitHub's stable numeric id. Correlation uses `number`; the id is
    /// carried along for completeness of the record.
    #[allow(dead_code)]
    pub id: u64,
    /// Human-facing issue number; mirrored into the story's external_id.
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    /// Canonical html URL; mirrored into the story's external links.
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// GitHub's issues listing also returns pull requests; they are only
    /// distinguishable by URL shape.
    pub fn is_pull_request(&self) -> bool {
        self.url.contains("/pull/")
    }
}

#[cfg(test)]
mod tests {
    use super::Issue;
    use chrono::{TimeZone, Utc};

    fn issue_with_url(url: &str) -> Issue {
        Issue {
            id: 1,
            number: 7,
            title: "A title".into(),
            body: None,
            url: url.into(),
            created_at: Utc.with_ymd_and_hms(2023, 4, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 4, 2, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn pull_request_detected_by_url() {
        let pr = issue_with_url("https://github.com/acme/widgets/pull/7");
        assert!(pr.is_pull_request());
    }

    #[test]
    fn plain_issue_is_not_a_pull_request() {
        let issue = issue_with_url("https://github.com/acme/widgets/issues/7");
        assert!(!issue.is_pull_request());
    }
}
