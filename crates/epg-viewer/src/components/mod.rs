pub mod details_dialog;
pub mod filter_bar;
pub mod program_table;
