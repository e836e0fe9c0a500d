//! Marquee library exports for testing

pub mod catalog;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
