pub mod consolidation;
pub mod rank_history;
pub mod song_identity;
