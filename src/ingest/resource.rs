//! The fixed set of snapshotted resources.

/// One logical resource collected by a snapshot run, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Repository commits.
    Commits,
    /// Pull requests in any state.
    Pulls,
    /// Review comments across all pull requests.
    PullComments,
    /// Issues in any state; GitHub includes pull requests in this listing.
    Issues,
    /// Reviews of a sample of the fetched pull requests.
    PullReviews,
}

impl Resource {
    /// Every resource in the order a run collects them.
    pub const ALL: [Self; 5] = [
        Self::Commits,
        Self::Pulls,
        Self::PullComments,
        Self::Issues,
        Self::PullReviews,
    ];

    /// Name used in the run summary.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Commits => "commits",
            Self::Pulls => "pulls",
            Self::PullComments => "pull_comments",
            Self::Issues => "issues",
            Self::PullReviews => "pull_reviews",
        }
    }

    /// Snapshot file name inside the output directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Commits => "commits.json",
            Self::Pulls => "pulls.json",
            Self::PullComments => "pull_comments.json",
            Self::Issues => "issues.json",
            Self::PullReviews => "pull_reviews.json",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}
