//! This is the library of the circle-trigger bot.
pub mod bridge;
pub mod circleci;
pub mod config;
pub mod github;

#[cfg(test)]
mod tests;
