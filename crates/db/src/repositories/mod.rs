//! Repository layer. Each repository is a zero-sized struct whose methods
//! take the pool explicitly.

pub mod dinosaur_repo;

pub use dinosaur_repo::DinosaurRepo;
