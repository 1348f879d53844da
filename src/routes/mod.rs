pub mod auth;
pub mod bookings;
pub mod reports;
pub mod visits;
