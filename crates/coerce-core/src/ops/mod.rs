pub mod compare;
pub mod dispatch;
mod numeric;
pub mod scalar;
pub mod sequence;
