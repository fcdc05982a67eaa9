use crate::{
    application::blogs::use_case::BlogUseCase, config::Config,
    domain::user::directory::UserDirectory,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub blogs: Arc<BlogUseCase>,
    pub users: Arc<dyn UserDirectory>,
}
