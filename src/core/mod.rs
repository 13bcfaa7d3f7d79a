pub mod clock;
pub mod ecs;
pub mod serialization;
pub mod world;
