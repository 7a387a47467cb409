pub mod header;
pub mod role_slot;
pub mod compare_panel;
