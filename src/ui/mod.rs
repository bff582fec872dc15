// UI module exports
// Text console front-end over the calendar model

mod app;
pub mod messages;
pub mod views;

pub use app::ConsoleApp;
