use crate::{
    config::AppConfig,
    services::{ferry::FerryClient, notify::AlertDispatcher},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub ferry: FerryClient,
    pub alerts: AlertDispatcher,
}

impl AppState {
    pub fn new(config: AppConfig, ferry: FerryClient, alerts: AlertDispatcher) -> Self {
        Self {
            config,
            ferry,
            alerts,
        }
    }
}
