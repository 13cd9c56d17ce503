use maud::{html, Markup, PreEscaped, Render};

/// Re-renders part of the page once the home feed has resolved.
///
/// Polls the current page every `interval_seconds` and, as soon as a response
/// no longer carries the pending marker, swaps `target_selector` for the fresh
/// copy and stops.
pub struct PendingRefresh {
    /// CSS selector for the element to swap
    pub target_selector: String,
    pub interval_seconds: u32,
}

impl PendingRefresh {
    pub fn new(target_selector: impl Into<String>) -> Self {
        Self {
            target_selector: target_selector.into(),
            interval_seconds: 2,
        }
    }

    pub fn with_interval(mut self, seconds: u32) -> Self {
        self.interval_seconds = seconds;
        self
    }
}

impl Render for PendingRefresh {
    fn render(&self) -> Markup {
        html! {
            div class="pending-refresh text-muted small"
                data-target=(self.target_selector)
                data-interval=(self.interval_seconds) {
                "Loading the latest events"
            }

            script {
                (PreEscaped(r"
                    document.querySelectorAll('.pending-refresh').forEach(indicator => {
                        const targetSelector = indicator.dataset.target;
                        const intervalMs = parseInt(indicator.dataset.interval) * 1000;

                        const timer = setInterval(async () => {
                            try {
                                const response = await fetch(window.location.href);
                                const html = await response.text();
                                const doc = new DOMParser().parseFromString(html, 'text/html');

                                if (doc.querySelector('.pending-refresh')) return;

                                const fresh = doc.querySelector(targetSelector);
                                const current = document.querySelector(targetSelector);
                                if (fresh && current) {
                                    current.replaceWith(fresh);
                                }

                                indicator.remove();
                                clearInterval(timer);
                            } catch (error) {
                                console.error('Failed to refresh posts:', error);
                            }
                        }, intervalMs);
                    });
                "))
            }
        }
    }
}
