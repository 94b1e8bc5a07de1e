use db::DBService;
use services::services::{generation::GenerationService, history::HistoryService};

pub mod error;
pub mod http;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    db: DBService,
    generation: GenerationService,
    history: HistoryService,
}

impl AppState {
    pub fn new(db: DBService, generation: GenerationService, history: HistoryService) -> Self {
        Self {
            db,
            generation,
            history,
        }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn generation(&self) -> &GenerationService {
        &self.generation
    }

    pub fn history(&self) -> &HistoryService {
        &self.history
    }
}
