//! Glue between the command line and the library

pub mod orchestration;
