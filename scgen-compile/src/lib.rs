//! # scgen-compile
//!
//! Renders [`ModelDescriptor`](scgen::descriptor::ModelDescriptor)s into
//! SproutCore record definitions.
//!
//! ```
//! use scgen::prelude::*;
//! use scgen_compile::record::render;
//!
//! let post = ModelDescriptor::new("Blog", "Post")
//!     .field(FieldDescriptor::new("title", "String"))
//!     .meta("lastFetchKey", "'updated'");
//! let js = render(&post, OutputVariant::Assign).unwrap();
//! assert!(js.contains("Blog.GeneratedPost.lastFetchKey = 'updated';"));
//! ```

pub mod error;
pub mod record;
pub mod util;

pub use record::{render, render_named, render_subclass};
