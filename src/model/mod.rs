pub mod dialogue_turn;
pub mod evaluation_results;
pub mod memory;
pub mod message;
pub mod turn_outcome;
