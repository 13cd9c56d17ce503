use std::sync::{Arc, Weak};

use posts::{FetchError, Post, PostSource};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, Instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Mounted, the fetch has not resolved yet.
    Pending,
    Loaded,
    /// The fetch failed. The collection is left as it was.
    Failed,
    Unmounted,
}

/// What a render of the home page sees.
#[derive(Debug, Clone)]
pub(crate) struct FeedSnapshot {
    pub phase: Phase,
    pub posts: Arc<Vec<Post>>,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Pending => "pending",
            Phase::Loaded => "loaded",
            Phase::Failed => "failed",
            Phase::Unmounted => "unmounted",
        }
    }
}

impl FeedSnapshot {
    fn pending() -> Self {
        Self {
            phase: Phase::Pending,
            posts: Arc::default(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }
}

/// The logged-in home feed.
///
/// Mounting spawns the one and only fetch for this feed. Renders read the
/// current [`FeedSnapshot`] and never fetch. The fetch task only holds a weak
/// reference, so once every handle is dropped (or [`HomeFeed::unmount`] is
/// called) a late response is discarded.
#[derive(Debug, Clone)]
pub(crate) struct HomeFeed {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: watch::Sender<FeedSnapshot>,
    cancel: CancellationToken,
}

impl HomeFeed {
    pub fn mount(source: Arc<dyn PostSource>) -> Self {
        let (state, _) = watch::channel(FeedSnapshot::pending());
        let inner = Arc::new(Inner {
            state,
            cancel: CancellationToken::new(),
        });

        tokio::spawn(
            fetch_into(Arc::downgrade(&inner), inner.cancel.clone(), source)
                .instrument(tracing::info_span!("HomeFeed::fetch")),
        );

        Self { inner }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Waits until the fetch has resolved (or the feed was unmounted).
    pub async fn resolved(&self) -> FeedSnapshot {
        let mut receiver = self.inner.state.subscribe();
        let resolved = receiver
            .wait_for(|snapshot| !snapshot.is_pending())
            .await
            .map(|snapshot| snapshot.clone());

        resolved.unwrap_or_else(|_| self.snapshot())
    }

    pub fn unmount(&self) {
        if self.inner.cancel.is_cancelled() {
            return;
        }

        self.inner.cancel.cancel();
        self.inner.state.send_modify(|snapshot| {
            snapshot.phase = Phase::Unmounted;
            snapshot.posts = Arc::default();
        });

        info!("Home feed unmounted");
    }
}

impl Inner {
    fn apply(&self, result: Result<Vec<Post>, FetchError>) {
        match result {
            Ok(posts) => {
                let count = posts.len();
                let applied = self.state.send_if_modified(|snapshot| {
                    if self.cancel.is_cancelled() || !snapshot.is_pending() {
                        return false;
                    }

                    *snapshot = FeedSnapshot {
                        phase: Phase::Loaded,
                        posts: Arc::new(posts),
                    };
                    true
                });

                if applied {
                    info!(count, "Home feed loaded");
                }
            }
            Err(error) => {
                let applied = self.state.send_if_modified(|snapshot| {
                    if self.cancel.is_cancelled() || !snapshot.is_pending() {
                        return false;
                    }

                    snapshot.phase = Phase::Failed;
                    true
                });

                if applied {
                    tracing::error!(error = ?error, "Failed to fetch posts for the home feed");
                }
            }
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn fetch_into(feed: Weak<Inner>, cancel: CancellationToken, source: Arc<dyn PostSource>) {
    let result = tokio::select! {
        biased;

        () = cancel.cancelled() => {
            tracing::debug!("Unmounted before posts resolved, dropping fetch");
            return;
        }
        result = source.fetch_posts() => result,
    };

    let Some(feed) = feed.upgrade() else {
        tracing::debug!("Unmounted before posts resolved, discarding response");
        return;
    };

    feed.apply(result);
}
