use domain::rank_history::RankHistoryError;
use thiserror::Error;

pub mod chart_report;
pub mod dto;
pub mod get_history_dates;
pub mod get_previous_rank;
pub mod get_snapshot;
pub mod movement;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Rank history error: {0}")]
    RankHistoryError(#[from] RankHistoryError),
}
