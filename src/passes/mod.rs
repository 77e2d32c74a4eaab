//! The three tree-mutation passes, in their required order: sections and
//! TOC first, environments second (they read the stable indices sections
//! get), references last (they read both sets of labels).

pub mod environments;
pub mod refs;
pub mod toc;

pub use environments::EnvironmentLabeler;
pub use refs::ReferenceResolver;
pub use toc::{TocBuilder, TocEntry};
