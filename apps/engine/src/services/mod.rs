pub mod game_actor;
pub mod games;

pub use game_actor::GameHandle;
pub use games::GameRegistry;
