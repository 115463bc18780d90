pub mod app;
pub mod app_model;
pub mod session;
