//! Helper functions shared by the scanner, renderer and server
//!
//! URL building and encoding, HTML snippets, and ordering of display names.

mod html;
mod text;
mod url;

pub use html::*;
pub use text::*;
pub use url::*;
