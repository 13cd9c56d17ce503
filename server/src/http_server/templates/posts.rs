use maud::{html, Markup, Render};
use ::posts::{keyed, Post, PostKey};

/// A single post in the home grid.
pub(crate) struct PostCard<'a> {
    pub(crate) key: &'a PostKey,
    pub(crate) post: &'a Post,
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let title = post.title();
        let summary = post.summary();

        html! {
          div class="post-card col-md-6" data-key=(self.key.as_str()) {
            div class="card flex-md-row mb-4 box-shadow h-md-250" {
              div class="card-body d-flex flex-column align-items-start" {
                @if let Some(location) = post.location() {
                  strong class="d-inline-block mb-2 text-primary" { (location) }
                }

                h3 class="mb-0" {
                  @if let Some(title) = &title {
                    (title)
                  } @else {
                    "Untitled post"
                  }
                }

                @if let Some(date) = post.date() {
                  div class="mb-1 text-muted" { (date) }
                }

                @if let Some(summary) = &summary {
                  p class="card-text mb-auto" { (summary) }
                }

                @if title.is_none() && summary.is_none() {
                  pre class="post-raw" { (post.to_canonical_json()) }
                }
              }
            }
          }
        }
    }
}

/// Every post of the feed, in feed order.
pub(crate) struct PostGrid<'a>(pub(crate) &'a [Post]);

impl Render for PostGrid<'_> {
    fn render(&self) -> Markup {
        html! {
          div id="post-grid" class="row mb-2" {
            @for (key, post) in keyed(self.0) {
              (PostCard { key: &key, post })
            }
          }
        }
    }
}
