pub mod analysis;
pub mod dashboard;
pub mod focus;
pub mod library;
pub mod progress_bar;
pub mod quote_panel;
pub mod test_view;
pub mod vocab;
