pub mod agenda;
pub mod event_item;
pub mod header;
pub mod login;
