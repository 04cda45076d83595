pub mod errors;
pub mod wage;
