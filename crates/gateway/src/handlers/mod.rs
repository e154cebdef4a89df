//! Request handlers

pub mod health;
pub mod lookups;
pub mod orders;
pub mod production;
pub mod schedule;
