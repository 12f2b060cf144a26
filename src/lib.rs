pub mod config;
pub mod domain;
pub mod member_client;
pub mod member_service;
pub mod repository;
pub mod routes;
pub mod startup;
pub mod telemetry;
