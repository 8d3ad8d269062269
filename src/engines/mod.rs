pub mod competition;
pub mod objective;
