//! Output for the news view.
//!
//! # Submodules
//!
//! - [`terminal`]: renders the page (header, ad slot, loading/empty/grid, detail)
//! - [`json`]: exports the visible articles for other tools

pub mod json;
pub mod terminal;
