//! Category catalog handling
//!
//! [`normalize`] flattens whatever shape the category source returns into
//! one canonical list; [`path`] resolves selection paths over it.

pub mod normalize;
pub mod path;

pub use normalize::{CategoryPayload, normalize};
pub use path::{CategoryPathResolver, PathSelection};
