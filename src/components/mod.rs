pub mod header;
pub mod results_grid;
pub mod search_panel;
pub mod upload_form;
