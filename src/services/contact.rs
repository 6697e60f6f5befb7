//! The public contact form and the admin inbox built on top of it.

use crate::domain::contact::{ContactMessage, ContactReceipt, NewContact};
use crate::domain::types::ContactId;
use crate::dto::notice::NoticeQueue;
use crate::forms::Draft;
use crate::forms::contact::ContactForm;
use crate::list::{ListState, RowFilter};
use crate::repository::errors::RepositoryError;
use crate::repository::{Authenticator, ContactListQuery, ContactReader, ContactWriter};
use crate::services::{ServiceError, ServiceResult};

/// Rows per page in the admin inbox.
pub const CONTACTS_PER_PAGE: usize = 10;

pub type ContactListState = ListState<ContactMessage, ContactFilters>;

/// Local search across the fetched page of the inbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactFilters;

impl RowFilter<ContactMessage> for ContactFilters {
    fn matches(&self, contact: &ContactMessage, search: &str) -> bool {
        let term = search.to_lowercase();
        term.is_empty()
            || contact.name.to_lowercase().contains(&term)
            || contact.email.to_lowercase().contains(&term)
            || contact.phone.contains(search)
            || contact.subject.to_lowercase().contains(&term)
    }
}

/// Validates and sends the public contact form. The form reports only its
/// first problem, checked top to bottom like the page lays them out.
pub async fn submit_contact<R>(
    repo: &R,
    notices: &mut NoticeQueue,
    draft: &mut Draft<ContactForm>,
) -> ServiceResult<ContactReceipt>
where
    R: ContactWriter + ?Sized,
{
    if !draft.validate() {
        let message = ["name", "email", "phone", "subject", "message"]
            .into_iter()
            .find_map(|field| draft.error(field))
            .unwrap_or("Vui lòng kiểm tra lại thông tin")
            .to_string();
        notices.push_error("Lỗi", message.clone());
        return Err(ServiceError::Form(message));
    }

    let payload = NewContact::from(&draft.form);
    match repo.submit_contact(&payload).await {
        Ok(receipt) => {
            let message = if receipt.message.is_empty() {
                "Cảm ơn bạn đã liên hệ. Chúng tôi sẽ phản hồi sớm nhất có thể."
            } else {
                receipt.message.as_str()
            };
            notices.push_success("Thành công", message);
            Ok(receipt)
        }
        Err(err) => {
            log::error!("Failed to submit the contact form: {err}");
            let message = err
                .server_detail()
                .unwrap_or("Không thể gửi liên hệ. Vui lòng thử lại sau.");
            notices.push_error("Lỗi", message);
            Err(err.into())
        }
    }
}

/// Reloads the current page of the admin inbox. Without a stored token the
/// call is a no-op; the page only renders behind the login gate.
pub async fn refresh<R>(repo: &R, state: &mut ContactListState) -> ServiceResult<()>
where
    R: ContactReader + Authenticator + ?Sized,
{
    if !repo.has_token() {
        return Ok(());
    }

    let seq = state.begin_fetch();
    let query = ContactListQuery::new().paginate(state.page(), state.per_page());
    match repo.list_contacts(query).await {
        Ok((total, contacts)) => {
            state.apply_fetch(seq, total, contacts);
            Ok(())
        }
        Err(RepositoryError::AuthMissing) => {
            state.fetch_failed(seq);
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to fetch contacts: {err}");
            if state.fetch_failed(seq) {
                push_failure(&mut state.notices, &err, "Không thể tải danh sách liên hệ");
            }
            Err(err.into())
        }
    }
}

fn push_failure(notices: &mut NoticeQueue, err: &RepositoryError, fallback: &str) {
    if err.is_connectivity() {
        notices.push_error("Lỗi", "Không thể kết nối đến server");
    } else {
        let message = err.server_detail().unwrap_or(fallback);
        notices.push_error("Lỗi", message);
    }
}

/// Deletes the message staged by [`ListState::request_delete`] once the
/// user confirmed, then refetches the inbox.
pub async fn delete_contact<R>(repo: &R, state: &mut ContactListState) -> ServiceResult<()>
where
    R: ContactReader + ContactWriter + Authenticator + ?Sized,
{
    let Some(contact) = state.take_confirmed_delete() else {
        return Ok(());
    };

    let id = ContactId::try_from(contact.id)?;
    match repo.delete_contact(id).await {
        Ok(()) => {
            state
                .notices
                .push_success("Thành công", "Xóa liên hệ thành công");
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to delete contact {id}: {err}");
            push_failure(&mut state.notices, &err, "Không thể xóa liên hệ");
            Err(err.into())
        }
    }
}

/// One message for the inbox's detail dialog.
pub async fn get_contact<R>(repo: &R, id: i32) -> ServiceResult<ContactMessage>
where
    R: ContactReader + ?Sized,
{
    let id = ContactId::try_from(id)?;
    match repo.get_contact_by_id(id).await {
        Ok(Some(contact)) => Ok(contact),
        Ok(None) => Err(ServiceError::NotFound),
        Err(err) => {
            log::error!("Failed to fetch contact {id}: {err}");
            Err(err.into())
        }
    }
}
