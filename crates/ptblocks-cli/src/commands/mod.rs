pub mod convert;
pub mod seed;
