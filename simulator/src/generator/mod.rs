pub mod defaults;
pub mod source;
