use async_trait::async_trait;
use reqwest::Method;

use crate::{
    domain::auth::{AuthToken, Credentials},
    repository::Authenticator,
    repository::errors::RepositoryResult,
    repository::http::HttpRepository,
};

#[async_trait]
impl Authenticator for HttpRepository {
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<AuthToken> {
        let token: AuthToken = Self::send_json(
            self.public(Method::POST, "/auth/login-json")
                .json(credentials),
        )
        .await?;

        self.store_token(Some(token.access_token.clone()));
        Ok(token)
    }

    fn has_token(&self) -> bool {
        self.current_token().is_some()
    }

    fn clear_token(&self) {
        self.store_token(None);
    }
}
