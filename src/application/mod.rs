// Application layer - State store, controller, and the repository port
pub mod battery_repository;
pub mod dashboard_controller;
pub mod dashboard_store;
