// Service module exports

pub mod backup;
pub mod calendar;
pub mod cursor;
pub mod event;
pub mod notification;
pub mod settings;
