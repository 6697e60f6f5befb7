use async_trait::async_trait;
use reqwest::Method;

use crate::{
    domain::contact::{ContactMessage, ContactReceipt, NewContact},
    domain::types::ContactId,
    dto::envelope::ListEnvelope,
    pagination::TotalCount,
    repository::errors::RepositoryResult,
    repository::http::{HttpRepository, none_on_404, push_pagination, split_list},
    repository::{ContactListQuery, ContactReader, ContactWriter},
};

#[async_trait]
impl ContactReader for HttpRepository {
    async fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<ContactMessage>> {
        let result =
            Self::send_json(self.authed(Method::GET, &format!("/contact/{id}"))?).await;
        none_on_404(result)
    }

    async fn list_contacts(
        &self,
        query: ContactListQuery,
    ) -> RepositoryResult<(TotalCount, Vec<ContactMessage>)> {
        let mut params: Vec<(String, String)> = Vec::new();
        push_pagination(&mut params, &query.pagination);

        let envelope: ListEnvelope<ContactMessage> =
            Self::send_json(self.authed(Method::GET, "/contact/list")?.query(&params)).await?;
        Ok(split_list(envelope, &query.pagination))
    }
}

#[async_trait]
impl ContactWriter for HttpRepository {
    async fn submit_contact(&self, new_contact: &NewContact) -> RepositoryResult<ContactReceipt> {
        Self::send_json(
            self.public(Method::POST, "/contact/submit")
                .json(new_contact),
        )
        .await
    }

    async fn delete_contact(&self, id: ContactId) -> RepositoryResult<()> {
        Self::send_empty(self.authed(Method::DELETE, &format!("/contact/{id}"))?).await
    }
}
