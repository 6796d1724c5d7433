pub mod history;
pub mod settings;
pub mod try_now;
