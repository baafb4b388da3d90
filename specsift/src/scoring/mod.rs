pub mod dissimilarity;
pub mod match_table;
pub mod screener;

pub use dissimilarity::{
    DirectionalScore,
    combined_score,
    score_direction,
};
pub use match_table::{
    MatchRow,
    MatchTableWriter,
};
pub use screener::Screener;
