pub mod breathe;
pub mod chat;
pub mod init;
pub mod insights;
pub mod mood;
pub mod personas;
pub mod resources;
pub mod trial;
