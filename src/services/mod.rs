pub mod email;
pub mod ferry;
pub mod notify;
pub mod schedule;
pub mod telegram;
