//! Concrete game implementations.

pub mod kittens;
