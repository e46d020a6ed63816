mod accounts_test;
mod booking_test;
