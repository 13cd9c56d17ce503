pub mod client;
pub mod key;
pub mod record;

pub use client::{FetchError, HttpPostSource, PostSource, DEFAULT_TIMEOUT};
pub use key::{keyed, PostKey};
pub use record::Post;
