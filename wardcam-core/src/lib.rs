pub mod command;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod position;
pub mod precision;
pub mod presets;
pub mod stream;
pub mod transport;
