//! Order workflows: the admin table with its CSV export and the public
//! order form.

use chrono::Utc;

use crate::domain::order::{DesignFile, NewOrder, Order, OrderStats, OrderStatus};
use crate::domain::types::{OrderId, ServiceId};
use crate::dto::notice::NoticeQueue;
use crate::forms::Draft;
use crate::forms::order::OrderForm;
use crate::list::{ListState, RowFilter};
use crate::repository::errors::RepositoryError;
use crate::repository::{Authenticator, OrderListQuery, OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult};

/// Rows per page in the admin table.
pub const ORDERS_PER_PAGE: usize = 12;

pub type OrderListState = ListState<Order, OrderFilters>;

/// Filters of the admin table. Status and service narrow the fetch and are
/// re-applied locally; the search term travels to the server as the
/// customer-name filter instead of narrowing rows here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub service_id: Option<ServiceId>,
}

impl RowFilter<Order> for OrderFilters {
    fn matches(&self, order: &Order, _search: &str) -> bool {
        let matches_status = self
            .status
            .as_ref()
            .is_none_or(|status| order.status == *status);
        let matches_service = self
            .service_id
            .is_none_or(|id| order.service_id == id.get());
        matches_status && matches_service
    }
}

fn admin_query(state: &OrderListState) -> OrderListQuery {
    let mut query = OrderListQuery::new().paginate(state.page(), state.per_page());
    let term = state.search_term();
    if !term.is_empty() {
        query = query.customer_name(term);
    }
    if let Some(status) = &state.filters().status {
        query = query.status(status.clone());
    }
    if let Some(service_id) = state.filters().service_id {
        query = query.service_id(service_id);
    }
    query
}

/// The admin orders page reports every connectivity problem with the same
/// short text and falls back to the server's detail otherwise.
fn push_failure(notices: &mut NoticeQueue, err: &RepositoryError, fallback: &str) {
    if err.is_connectivity() {
        notices.push_error("Lỗi", "Không thể kết nối đến server");
    } else {
        let message = err.server_detail().unwrap_or(fallback);
        notices.push_error("Lỗi", message);
    }
}

/// Reloads the current page of the admin table. Without a stored token the
/// call is a no-op; the page only renders behind the login gate.
pub async fn refresh<R>(repo: &R, state: &mut OrderListState) -> ServiceResult<()>
where
    R: OrderReader + Authenticator + ?Sized,
{
    if !repo.has_token() {
        return Ok(());
    }

    let seq = state.begin_fetch();
    match repo.list_orders(admin_query(state)).await {
        Ok((total, orders)) => {
            state.apply_fetch(seq, total, orders);
            Ok(())
        }
        Err(RepositoryError::AuthMissing) => {
            state.fetch_failed(seq);
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to fetch orders: {err}");
            if state.fetch_failed(seq) {
                push_failure(&mut state.notices, &err, "Không thể tải danh sách đơn hàng");
            }
            Err(err.into())
        }
    }
}

/// Moves an order to a new lifecycle stage, then refetches the table.
pub async fn update_order_status<R>(
    repo: &R,
    state: &mut OrderListState,
    id: i32,
    status: OrderStatus,
) -> ServiceResult<()>
where
    R: OrderReader + OrderWriter + Authenticator + ?Sized,
{
    let id = OrderId::try_from(id)?;
    match repo.update_order_status(id, status).await {
        Ok(_) => {
            state
                .notices
                .push_success("Thành công", "Cập nhật trạng thái đơn hàng thành công");
            refresh(repo, state).await
        }
        Err(err) => {
            log::error!("Failed to update the status of order {id}: {err}");
            push_failure(
                &mut state.notices,
                &err,
                "Không thể cập nhật trạng thái đơn hàng",
            );
            Err(err.into())
        }
    }
}

/// Downloads the server's CSV rendition of the filtered table, returning
/// the dated filename a save dialog should suggest together with the bytes.
pub async fn export_orders_csv<R>(
    repo: &R,
    state: &mut OrderListState,
) -> ServiceResult<(String, Vec<u8>)>
where
    R: OrderReader + Authenticator + ?Sized,
{
    // The export always covers the whole filtered set, not one page.
    let mut query = admin_query(state);
    query.pagination = None;

    match repo.export_orders_csv(query).await {
        Ok(bytes) => {
            state
                .notices
                .push_success("Thành công", "Xuất file CSV thành công");
            let filename = format!("orders-export-{}.csv", Utc::now().format("%Y-%m-%d"));
            Ok((filename, bytes))
        }
        Err(err) => {
            log::error!("Failed to export orders: {err}");
            push_failure(&mut state.notices, &err, "Không thể xuất file CSV");
            Err(err.into())
        }
    }
}

/// Renders rows into the same CSV layout the server export produces,
/// BOM-prefixed so spreadsheet apps pick the encoding up.
pub fn write_orders_csv(rows: &[Order]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(vec![0xEF, 0xBB, 0xBF]);
    writer.write_record([
        "ID",
        "Tên khách hàng",
        "Email",
        "Số điện thoại",
        "Dịch vụ",
        "Số lượng",
        "Kích thước",
        "Chất liệu",
        "Ghi chú",
        "Trạng thái",
        "Ngày tạo",
    ])?;
    for order in rows {
        writer.write_record([
            order.id.to_string(),
            order.customer_name.clone(),
            order.customer_email.clone(),
            order.customer_phone.clone(),
            order.service_name().unwrap_or("Unknown").to_string(),
            order.quantity.to_string(),
            order.size.clone().unwrap_or_default(),
            order.material.clone().unwrap_or_default(),
            order.notes.clone().unwrap_or_default(),
            order.status.to_string(),
            order.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

/// Stat cards computed over the loaded page.
#[must_use]
pub fn order_stats(state: &OrderListState) -> OrderStats {
    OrderStats::from_rows(state.rows())
}

/// Validates the public order form and submits it as multipart form data.
pub async fn submit_order<R>(
    repo: &R,
    notices: &mut NoticeQueue,
    draft: &mut Draft<OrderForm>,
) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    if !draft.validate() {
        notices.push_error("Lỗi", "Vui lòng kiểm tra lại thông tin");
        return Err(ServiceError::Form(
            "Vui lòng kiểm tra lại thông tin".to_string(),
        ));
    }

    let new_order =
        NewOrder::try_from(&draft.form).map_err(|err| ServiceError::Form(err.to_string()))?;
    match repo.submit_order(&new_order).await {
        Ok(order) => {
            notices.push_success("Thành công", "Đơn hàng đã được gửi thành công!");
            Ok(order)
        }
        Err(err) => {
            log::error!("Failed to submit the order: {err}");
            if err.is_connectivity() {
                notices.push_error("Lỗi", "Không thể gửi đơn hàng. Vui lòng thử lại.");
            } else {
                let message = err
                    .server_detail()
                    .unwrap_or("Có lỗi xảy ra khi gửi đơn hàng");
                notices.push_error("Lỗi", message);
            }
            Err(err.into())
        }
    }
}

/// Applies the size cap before accepting a picked file into the form.
/// Returns whether the file was attached.
pub fn attach_design_file(
    notices: &mut NoticeQueue,
    draft: &mut Draft<OrderForm>,
    filename: impl Into<String>,
    bytes: Vec<u8>,
) -> bool {
    if bytes.len() > DesignFile::MAX_BYTES {
        notices.push_error("Lỗi", "File không được vượt quá 10MB");
        return false;
    }
    let filename = filename.into();
    notices.push_success("Thành công", format!("Đã tải file {filename}"));
    draft.form.design_file = Some(DesignFile { filename, bytes });
    true
}
