use faitness::db::Database;
use faitness::error::ApiError;
use log::error;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Runs one request's database work on the blocking pool.
    ///
    /// The pooled connection is checked out and released inside `work`, so it
    /// never outlives the request.
    pub async fn unit_of_work<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Database) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || work(&db))
            .await
            .map_err(|e| {
                error!("Unit of work aborted: {}", e);
                ApiError::Internal
            })?
    }
}
