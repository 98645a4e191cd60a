//! Command implementations for the planilla CLI

pub mod export;
pub mod formations;
pub mod init;
pub mod layout;
