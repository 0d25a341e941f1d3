pub mod config;
pub mod dtos;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod utils;

use config::Config;
use service::checkin_service::CheckInService;
use service::scheduler::CheckInScheduler;
use store::StoreClient;

/// State shared by every request handler.
#[derive(Debug)]
pub struct AppState {
    pub env: Config,
    pub store: StoreClient,
    pub checkins: CheckInService,
    pub scheduler: CheckInScheduler,
}

impl AppState {
    pub fn new(env: Config, store: StoreClient) -> Self {
        let checkins = CheckInService::new(&env);
        AppState {
            env,
            store,
            checkins,
            scheduler: CheckInScheduler::new(),
        }
    }
}
