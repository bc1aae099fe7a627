use std::sync::Arc;

use crate::{
    config::Config,
    console::ConsoleStore,
    monitor::{AddressProvider, ConfirmationSource},
    session::SessionRegistry,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionRegistry>,
    pub confirmations: Arc<dyn ConfirmationSource>,
    pub addresses: Arc<dyn AddressProvider>,
    pub console: Arc<ConsoleStore>,
}
