//! Infrastructure Layer
//!
//! Database implementations and profile picture storage.

pub mod media;
pub mod memory;
pub mod postgres;

pub use media::FsPictureStore;
pub use memory::MemoryAuthRepository;
pub use postgres::PgAuthRepository;
