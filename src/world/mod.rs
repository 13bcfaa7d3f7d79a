pub mod repository;
pub mod sqlite;

pub use repository::TownRepository;
pub use sqlite::{TownDb, TownDbError};
