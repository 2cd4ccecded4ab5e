pub mod appointment;
pub mod birthday;
pub mod delivery;
pub mod messages;
pub mod reminder;
pub mod scheduler;
