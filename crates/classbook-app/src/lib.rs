pub mod cli;
pub mod command;
pub mod error;
pub mod request;
