extern crate log;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod geofile;
pub mod names;
pub mod osm;
