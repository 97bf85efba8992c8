pub mod models;
pub mod record;
pub mod settings;
