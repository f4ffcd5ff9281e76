pub mod address;
pub mod registration;
