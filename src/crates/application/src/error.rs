use domain::rank_history::RankHistoryError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Rank history error: {0}")]
    RankHistoryError(#[from] RankHistoryError),
}
