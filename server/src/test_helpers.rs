use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use posts::{FetchError, Post, PostSource};
use tokio::sync::oneshot;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer,
};
use url::Url;

use crate::AppConfig;

/// Counts `ERROR` events emitted by this crate.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        if *metadata.level() == Level::ERROR && metadata.target().starts_with("intronus") {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Installs an [`ErrorCounter`] as the subscriber for the current thread.
///
/// Only sees events from tasks polled on this thread, which is all of them
/// under the default current-thread `#[tokio::test]` runtime.
pub(crate) fn capture_errors() -> (ErrorCounter, tracing::subscriber::DefaultGuard) {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());

    (counter, tracing::subscriber::set_default(subscriber))
}

type GatedResult = Result<Vec<Post>, FetchError>;

/// A [`PostSource`] that resolves when the test says so.
pub(crate) struct GatedSource {
    gate: Mutex<Option<oneshot::Receiver<GatedResult>>>,
    pub calls: AtomicUsize,
}

impl GatedSource {
    pub fn new() -> (Arc<Self>, oneshot::Sender<GatedResult>) {
        let (sender, receiver) = oneshot::channel();
        let source = Self {
            gate: Mutex::new(Some(receiver)),
            calls: AtomicUsize::new(0),
        };

        (Arc::new(source), sender)
    }
}

#[async_trait]
impl PostSource for GatedSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = self
            .gate
            .lock()
            .unwrap()
            .take()
            .expect("GatedSource fetched more than once");

        match gate.await {
            Ok(result) => result,
            // Gate dropped without an answer: stay pending like a hung request.
            Err(_) => std::future::pending().await,
        }
    }
}

/// An endpoint on a port nothing is listening on.
pub(crate) fn closed_endpoint() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    Url::parse(&format!("http://{addr}/posts/getPosts")).unwrap()
}

pub(crate) fn test_config(posts_endpoint: Url) -> AppConfig {
    AppConfig {
        posts_endpoint,
        viewer_name: "Batman".to_string(),
        port: 0,
        posts_timeout: posts::DEFAULT_TIMEOUT,
    }
}
