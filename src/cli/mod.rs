pub mod track;
pub mod views;
