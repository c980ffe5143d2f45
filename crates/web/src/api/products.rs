//! Product catalog endpoints.

use tracing::instrument;

use bizsphere_core::ProductId;

use super::{ApiClient, ApiError, ProductApi};
use crate::models::{BearerToken, BusinessStats, Product, ProductPayload, ProductStatusUpdate};

fn product_path(id: &ProductId) -> String {
    format!("products/{}", urlencoding::encode(id.as_str()))
}

impl ProductApi for ApiClient {
    #[instrument(skip_all)]
    async fn my_products(&self, token: &BearerToken) -> Result<Vec<Product>, ApiError> {
        self.get("products/my-products", Some(token)).await
    }

    #[instrument(skip_all, fields(name = %payload.name))]
    async fn create_product(
        &self,
        token: &BearerToken,
        payload: &ProductPayload,
    ) -> Result<(), ApiError> {
        self.post_ack("products", payload, Some(token)).await
    }

    #[instrument(skip(self, token, payload), fields(product_id = %id))]
    async fn update_product(
        &self,
        token: &BearerToken,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<(), ApiError> {
        self.put(&product_path(id), payload, Some(token)).await
    }

    #[instrument(skip(self, token), fields(product_id = %id))]
    async fn set_product_active(
        &self,
        token: &BearerToken,
        id: &ProductId,
        is_active: bool,
    ) -> Result<(), ApiError> {
        self.put(&product_path(id), &ProductStatusUpdate { is_active }, Some(token))
            .await
    }

    #[instrument(skip(self, token), fields(product_id = %id))]
    async fn delete_product(&self, token: &BearerToken, id: &ProductId) -> Result<(), ApiError> {
        self.delete(&product_path(id), Some(token)).await
    }

    #[instrument(skip_all)]
    async fn business_stats(&self, token: &BearerToken) -> Result<BusinessStats, ApiError> {
        self.get("products/stats/business", Some(token)).await
    }
}
