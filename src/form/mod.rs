pub mod form_model;
