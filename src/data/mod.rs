pub mod database;
pub mod entity;
pub mod migration;
pub mod user_repository;
