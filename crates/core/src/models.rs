pub mod account;
pub mod page;
pub mod slot;
