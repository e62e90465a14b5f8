mod extract;
mod score;
mod types;

pub use extract::extract_number;
pub use score::ScoreCategory;
pub use types::*;
