// Synthetic content and random row generation

mod content;
mod rows;

pub use content::{generate_message_pairs, generate_posts, generate_queries};
pub use rows::{generate_rows, random_alphanumeric};

/// Number of posts generated per run
pub const POST_TARGET: usize = 35;
/// Number of support queries generated per run
pub const QUERY_COUNT: usize = 12;
/// Number of two-message conversations generated per run
pub const MESSAGE_PAIR_COUNT: usize = 12;
/// Number of random rows inserted per run
pub const ROW_COUNT: usize = 20;
pub const ROW_TITLE_LEN: usize = 10;
pub const ROW_CONTENT_LEN: usize = 50;
