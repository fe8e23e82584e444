// Application layer - Use cases over the fleet
pub mod fleet_repository;
pub mod replay_service;
pub mod simulation_service;
