pub mod accounts;
pub mod booking;
