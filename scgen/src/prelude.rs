pub use crate::descriptor::{FieldDescriptor, MetaOption, ModelDescriptor};
pub use crate::variant::OutputVariant;
