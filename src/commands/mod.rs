pub mod deploy;
pub mod implode;
pub mod init;
pub mod version;
