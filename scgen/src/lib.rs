//! # scgen
//!
//! Descriptors of server-side models, consumed by
//! [`scgen-compile`](../scgen_compile/index.html) to generate SproutCore
//! record definitions.
//!
//! A [`ModelDescriptor`](descriptor::ModelDescriptor) is already resolved:
//! field types, attributes and comments are plain script literals, and are
//! substituted into the output unchanged.

pub mod descriptor;
pub mod prelude;
pub mod variant;
