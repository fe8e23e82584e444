// Application state for HTTP handlers
use crate::application::replay_service::ReplayService;
use crate::application::simulation_service::SimulationService;

#[derive(Clone)]
pub struct AppState {
    pub simulation_service: SimulationService,
    pub replay_service: ReplayService,
}
