mod clock;
mod generator;
mod repository;

pub use clock::Clock;
pub use generator::ContentGenerator;
pub use repository::RepositoryDriver;
