//! Byte-level scanning for the markup parser

pub mod scanner;

pub use scanner::Scanner;
