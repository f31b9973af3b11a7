/// State management module
///
/// This module handles all application state, including:
/// - The catalog record type and filter dimensions (data.rs)
/// - Predicate sets and the filter evaluator (filter.rs)
/// - Search input debouncing (debounce.rs)
/// - The browser controller that ties them together (browser.rs)
/// - The local SQLite catalog (library.rs)

pub mod browser;
pub mod data;
pub mod debounce;
pub mod filter;
pub mod library;
