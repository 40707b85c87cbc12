// Utility functions
// Class name composition, markup attribute coercion

pub mod class_names;
pub mod data_attributes;

pub use class_names::{cn, conditional_class, size_class, variant_class, when};
pub use data_attributes::{parse_data_attributes, ComponentKind};
