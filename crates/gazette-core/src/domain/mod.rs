//! Domain entities - the core business objects.

mod author;
mod comment;
mod post;
mod tag;

pub mod slug;

pub use author::Author;
pub use comment::Comment;
pub use post::{Post, PostStatus};
pub use tag::{Tag, normalize_label};
