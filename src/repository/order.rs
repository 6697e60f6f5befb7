use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::{
    domain::order::{NewOrder, Order, OrderStatus, UpdateOrderStatus},
    domain::types::OrderId,
    dto::envelope::ListEnvelope,
    pagination::TotalCount,
    repository::errors::RepositoryResult,
    repository::http::{HttpRepository, none_on_404, push_pagination, split_list},
    repository::{OrderListQuery, OrderReader, OrderWriter},
};

fn filter_params(query: &OrderListQuery) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();
    if let Some(customer_name) = &query.customer_name {
        params.push(("customer_name".to_string(), customer_name.clone()));
    }
    if let Some(service_id) = query.service_id {
        params.push(("service_id".to_string(), service_id.to_string()));
    }
    if let Some(status) = &query.status {
        params.push(("status".to_string(), status.to_string()));
    }
    if let Some(start_date) = query.start_date {
        params.push(("start_date".to_string(), start_date.format("%Y-%m-%d").to_string()));
    }
    if let Some(end_date) = query.end_date {
        params.push(("end_date".to_string(), end_date.format("%Y-%m-%d").to_string()));
    }
    params
}

fn order_form(new_order: &NewOrder) -> Form {
    let mut form = Form::new()
        .text("customer_name", new_order.customer_name.clone())
        .text("customer_email", new_order.customer_email.clone())
        .text("customer_phone", new_order.customer_phone.clone())
        .text("service_id", new_order.service_id.to_string())
        .text("quantity", new_order.quantity.to_string());
    if let Some(size) = &new_order.size {
        form = form.text("size", size.clone());
    }
    if let Some(material) = &new_order.material {
        form = form.text("material", material.clone());
    }
    if let Some(notes) = &new_order.notes {
        form = form.text("notes", notes.clone());
    }
    if let Some(file) = &new_order.design_file {
        let part = Part::bytes(file.bytes.clone()).file_name(file.filename.clone());
        form = form.part("design_file", part);
    }
    form
}

#[async_trait]
impl OrderReader for HttpRepository {
    async fn get_order_by_id(&self, id: OrderId) -> RepositoryResult<Option<Order>> {
        let result =
            Self::send_json(self.authed(Method::GET, &format!("/orders/{id}"))?).await;
        none_on_404(result)
    }

    async fn list_orders(
        &self,
        query: OrderListQuery,
    ) -> RepositoryResult<(TotalCount, Vec<Order>)> {
        let mut params = filter_params(&query);
        push_pagination(&mut params, &query.pagination);

        let envelope: ListEnvelope<Order> =
            Self::send_json(self.authed(Method::GET, "/orders/")?.query(&params)).await?;
        Ok(split_list(envelope, &query.pagination))
    }

    async fn export_orders_csv(&self, query: OrderListQuery) -> RepositoryResult<Vec<u8>> {
        // The download also wants the token as a query parameter, so the
        // file can be fetched by a plain link without headers.
        let mut params = filter_params(&query);
        params.push(("token".to_string(), self.bearer()?));

        Self::send_bytes(
            self.authed(Method::GET, "/orders/export/csv")?
                .query(&params),
        )
        .await
    }
}

#[async_trait]
impl OrderWriter for HttpRepository {
    async fn submit_order(&self, new_order: &NewOrder) -> RepositoryResult<Order> {
        Self::send_json(
            self.public(Method::POST, "/orders/")
                .multipart(order_form(new_order)),
        )
        .await
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> RepositoryResult<Order> {
        let body = UpdateOrderStatus { status };
        Self::send_json(
            self.authed(Method::PUT, &format!("/orders/{id}"))?
                .json(&body),
        )
        .await
    }
}
