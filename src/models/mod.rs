pub mod alert;
pub mod trip;
