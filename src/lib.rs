pub mod config;
pub mod limits;
pub mod model;
pub mod observability;
pub mod occupancy;
pub mod repository;
pub mod service;
