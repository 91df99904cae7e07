//! Request-scoped database session. The connection is taken from the store on first use, so a
//! request rejected during validation never touches the pool; it is released when the request
//! finishes (success or error).

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{PatientSession, PatientStore};
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use std::sync::Arc;

pub struct DbSession {
    store: Arc<dyn PatientStore>,
    session: Option<Box<dyn PatientSession>>,
}

impl DbSession {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        DbSession { store, session: None }
    }

    /// The request's session, opened on the first call and reused after that.
    pub async fn open(&mut self) -> Result<&mut dyn PatientSession, AppError> {
        let session = match self.session.take() {
            Some(session) => session,
            None => self.store.session().await?,
        };
        Ok(self.session.insert(session).as_mut())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for DbSession {
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(DbSession::new(Arc::clone(&state.store)))
    }
}
