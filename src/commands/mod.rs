pub mod build;
pub mod doctor;
pub mod init;
pub mod schema;
