use super::{DuplicateService, StoreService};

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    store_service: StoreService,
    duplicate_service: DuplicateService,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_service(&self) -> &StoreService {
        &self.store_service
    }

    pub fn duplicate_service(&self) -> &DuplicateService {
        &self.duplicate_service
    }
}
