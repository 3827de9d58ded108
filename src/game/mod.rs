pub mod constants;
pub mod effects;
pub mod intent;
pub mod match_result;
pub mod state;
pub mod systems;
