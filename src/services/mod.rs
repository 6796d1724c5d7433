pub mod history_service;
pub mod logging;
pub mod prediction;
pub mod settings_service;
pub mod upload_service;
