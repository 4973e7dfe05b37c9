//! Core business logic services

pub mod contact_csv_parser;
pub mod contact_import;
