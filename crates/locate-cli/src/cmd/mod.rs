pub mod completions;
pub mod create;
pub mod delete;
pub mod export;
pub mod fields;
pub mod init;
pub mod list;
pub mod serve;
pub mod show;
pub mod summary;
pub mod update;
