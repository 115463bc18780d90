pub mod console;
pub mod result_view;
