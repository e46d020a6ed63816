pub mod accounts;
pub mod booking;
pub mod health;

/// Page locations used by redirects.
pub mod paths {
    pub const HOME: &str = "/";
    pub const SIGNUP: &str = "/signup/";
    pub const LOGIN: &str = "/login/";
    pub const LOGOUT: &str = "/logout/";
    pub const SLOT_BOOKING: &str = "/slot-booking/";
    pub const MY_SLOTS: &str = "/my_slots/";
}
