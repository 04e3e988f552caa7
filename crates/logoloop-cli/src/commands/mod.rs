pub mod init_config;
pub mod layout;
pub mod run;
pub mod simulate;
