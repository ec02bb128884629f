//! Request handlers

pub mod fund;
pub mod health;
pub mod pages;
