//! Directory watching adapters

pub mod fs_scanner;

pub use fs_scanner::FsDirectoryScanner;
