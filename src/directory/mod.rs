pub mod client;
pub mod groups;
