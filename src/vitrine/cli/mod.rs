mod commands;
mod kiosk;
mod render;
mod setup;

pub use commands::run;
