pub mod history_types;
pub mod prediction_types;
pub mod settings_types;
pub mod upload_types;
pub mod view_types;
