// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    ai::GenerativeModel, bank::SharedBank, config::Config, models::user::AdminAccount,
    store::LocalStore,
};

#[derive(Clone)]
pub struct AppState {
    pub store: LocalStore,
    pub config: Config,
    pub bank: SharedBank,
    /// `None` when no AI provider is configured.
    pub ai: Option<Arc<dyn GenerativeModel>>,
    pub admin: Option<AdminAccount>,
}

impl FromRef<AppState> for LocalStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SharedBank {
    fn from_ref(state: &AppState) -> Self {
        state.bank.clone()
    }
}
