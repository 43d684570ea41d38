pub mod opaque;
pub mod value;

pub use opaque::{JsonObject, OpaqueValue};
pub use value::DynamicValue;
