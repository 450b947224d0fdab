pub mod longest_idle;
pub mod tie_break;
pub mod types;

pub use longest_idle::select_longest_idle;
pub use tie_break::{FirstRegisteredTieBreaker, RandomTieBreaker, TieBreaker};
pub use types::Candidate;
