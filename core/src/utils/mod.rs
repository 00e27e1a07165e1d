pub mod convert;
pub mod strings;
