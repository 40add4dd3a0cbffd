pub mod slug;

pub use slug::{SlugMap, slugify};
