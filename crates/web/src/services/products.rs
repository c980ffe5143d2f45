//! Product form coercion and catalog mutations.
//!
//! Numeric inputs are coerced the forgiving way: the longest leading number
//! is used and anything unparsable becomes zero. No other validation happens
//! here; the API decides what it accepts.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use bizsphere_core::{ProductCategory, ProductId};

use crate::api::{ApiError, ProductApi};
use crate::models::{BearerToken, Product, ProductPayload, User};

/// Shown when an unverified owner tries to change their catalog.
pub const UNVERIFIED_MESSAGE: &str = "Your business must be verified to manage products";

/// Raw product form fields as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    /// Image URLs, one per line.
    pub images: String,
}

impl ProductForm {
    /// Prefill the edit form from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            category: product.category.as_str().to_string(),
            images: product.images.join("\n"),
        }
    }

    /// Category as submitted, or `other`.
    #[must_use]
    pub fn category(&self) -> ProductCategory {
        self.category.trim().parse().unwrap_or_default()
    }
}

impl ProductPayload {
    /// Coerce a submitted form into a request body.
    #[must_use]
    pub fn from_form(form: &ProductForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            description: form.description.trim().to_string(),
            price: parse_leading_decimal(&form.price),
            stock: parse_leading_integer(&form.stock),
            category: form.category(),
            images: form
                .images
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

/// Longest leading decimal number in `input`, or zero.
///
/// `"12.50"` is 12.5, `"12abc"` is 12, `".5"` is 0.5, `"1e2"` is 100.
fn parse_leading_decimal(input: &str) -> Decimal {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return Decimal::ZERO;
    }

    let mantissa_end = end;
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let raw = s[..mantissa_end].trim_end_matches('.');
    let (sign, unsigned) = raw.split_at(int_start);
    let sign = if sign == "-" { "-" } else { "" };
    let zero = if unsigned.starts_with('.') { "0" } else { "" };
    let mantissa = format!("{sign}{zero}{unsigned}");
    let parsed = if end > mantissa_end {
        Decimal::from_scientific(&format!("{mantissa}{}", &s[mantissa_end..end]))
    } else {
        Decimal::from_str(&mantissa)
    };
    parsed.map(|d| d.normalize()).unwrap_or(Decimal::ZERO)
}

/// Longest leading integer in `input`, or zero. `"5.9"` is 5.
fn parse_leading_integer(input: &str) -> i64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    s[..end].parse().unwrap_or(0)
}

/// Whether `user` may change their catalog.
///
/// # Errors
///
/// Returns [`UNVERIFIED_MESSAGE`] for unverified owners.
pub fn ensure_verified(user: &User) -> Result<(), &'static str> {
    if user.is_business_verified() {
        Ok(())
    } else {
        Err(UNVERIFIED_MESSAGE)
    }
}

/// Product list after a mutation the API accepted.
///
/// A failed refetch does not undo the mutation, so it is carried alongside
/// the (empty) list instead of being returned as an error.
#[derive(Debug, Default)]
pub struct CatalogRefresh {
    pub products: Vec<Product>,
    pub failure: Option<ApiError>,
}

/// Catalog operations for the signed-in owner.
///
/// Every mutation is followed by a full list refetch. `Err` means the
/// mutation itself failed; a refetch failure is reported in
/// [`CatalogRefresh::failure`].
pub struct ProductManager<'a, A> {
    api: &'a A,
    token: &'a BearerToken,
}

impl<'a, A: ProductApi> ProductManager<'a, A> {
    #[must_use]
    pub const fn new(api: &'a A, token: &'a BearerToken) -> Self {
        Self { api, token }
    }

    /// # Errors
    ///
    /// Returns error if the list cannot be fetched.
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.api.my_products(self.token).await
    }

    /// Find one product in the owner's list.
    ///
    /// # Errors
    ///
    /// Returns error if the list cannot be fetched.
    pub async fn find(&self, id: &ProductId) -> Result<Option<Product>, ApiError> {
        Ok(self.list().await?.into_iter().find(|p| &p.id == id))
    }

    async fn refresh(&self) -> CatalogRefresh {
        match self.list().await {
            Ok(products) => CatalogRefresh {
                products,
                failure: None,
            },
            Err(error) => {
                tracing::warn!(%error, "Failed to reload products after a change");
                CatalogRefresh {
                    products: Vec::new(),
                    failure: Some(error),
                }
            }
        }
    }

    /// # Errors
    ///
    /// Returns error if the create request fails.
    pub async fn create(&self, payload: &ProductPayload) -> Result<CatalogRefresh, ApiError> {
        self.api.create_product(self.token, payload).await?;
        tracing::info!(name = %payload.name, "Product created");
        Ok(self.refresh().await)
    }

    /// # Errors
    ///
    /// Returns error if the update request fails.
    pub async fn update(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<CatalogRefresh, ApiError> {
        self.api.update_product(self.token, id, payload).await?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(self.refresh().await)
    }

    /// Flip the active flag. Sends only `isActive`.
    ///
    /// # Errors
    ///
    /// Returns error if the update request fails.
    pub async fn toggle_active(
        &self,
        id: &ProductId,
        currently_active: bool,
    ) -> Result<CatalogRefresh, ApiError> {
        self.api
            .set_product_active(self.token, id, !currently_active)
            .await?;
        Ok(self.refresh().await)
    }

    /// # Errors
    ///
    /// Returns error if the delete request fails.
    pub async fn delete(&self, id: &ProductId) -> Result<CatalogRefresh, ApiError> {
        self.api.delete_product(self.token, id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(self.refresh().await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::ApiClient;
    use crate::config::ApiConfig;

    fn form(price: &str, stock: &str) -> ProductForm {
        ProductForm {
            name: "Tea".to_string(),
            description: "Assam".to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
            category: "food".to_string(),
            images: String::new(),
        }
    }

    #[test]
    fn test_tea_payload() {
        let payload = ProductPayload::from_form(&form("12.50", "5"));
        assert_eq!(payload.price, Decimal::from_str("12.5").unwrap());
        assert_eq!(payload.stock, 5);
        assert_eq!(payload.category, ProductCategory::Food);

        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["price"], json!(12.5));
        assert_eq!(body["stock"], json!(5));
    }

    #[test]
    fn test_unparsable_stock_is_zero() {
        assert_eq!(ProductPayload::from_form(&form("1", "abc")).stock, 0);
    }

    #[test]
    fn test_leading_decimal_semantics() {
        let d = |s: &str| Decimal::from_str(s).unwrap();
        assert_eq!(parse_leading_decimal("12abc"), d("12"));
        assert_eq!(parse_leading_decimal(" 7.25 rupees"), d("7.25"));
        assert_eq!(parse_leading_decimal(".5"), d("0.5"));
        assert_eq!(parse_leading_decimal("5."), d("5"));
        assert_eq!(parse_leading_decimal("1e2"), d("100"));
        assert_eq!(parse_leading_decimal("3e"), d("3"));
        assert_eq!(parse_leading_decimal("-4"), d("-4"));
        assert_eq!(parse_leading_decimal("abc"), Decimal::ZERO);
        assert_eq!(parse_leading_decimal(""), Decimal::ZERO);
        assert_eq!(parse_leading_decimal("."), Decimal::ZERO);
    }

    #[test]
    fn test_leading_integer_semantics() {
        assert_eq!(parse_leading_integer("5.9"), 5);
        assert_eq!(parse_leading_integer("  42 units"), 42);
        assert_eq!(parse_leading_integer("-3"), -3);
        assert_eq!(parse_leading_integer("x1"), 0);
        assert_eq!(parse_leading_integer(""), 0);
    }

    #[test]
    fn test_unknown_category_falls_back_to_other() {
        let mut f = form("1", "1");
        f.category = "toys".to_string();
        assert_eq!(ProductPayload::from_form(&f).category, ProductCategory::Other);
    }

    #[test]
    fn test_images_one_per_line() {
        let mut f = form("1", "1");
        f.images = "https://a.example/1.jpg\r\n\n  https://a.example/2.jpg  \n".to_string();
        assert_eq!(
            ProductPayload::from_form(&f).images,
            vec!["https://a.example/1.jpg", "https://a.example/2.jpg"]
        );
    }

    #[test]
    fn test_form_prefill_round_trips_values() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1", "name": "Tea", "price": 12.5, "stock": 5,
            "category": "food", "images": ["a", "b"]
        }))
        .unwrap();
        let prefill = ProductForm::from_product(&product);
        assert_eq!(prefill.price, "12.5");
        assert_eq!(prefill.images, "a\nb");
        assert_eq!(ProductPayload::from_form(&prefill).price, Decimal::from_str("12.5").unwrap());
    }

    fn product_list() -> serde_json::Value {
        json!([{ "_id": "p1", "name": "Tea", "price": 12.5, "stock": 5,
                 "category": "food", "isActive": true }])
    }

    #[tokio::test]
    async fn test_toggle_sends_only_flag_and_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/products/p1"))
            .and(body_json(json!({ "isActive": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products/my-products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_list()))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            ApiClient::new(&ApiConfig::for_base_url(&format!("{}/api", server.uri())).unwrap())
                .unwrap();
        let token = BearerToken::new("owner");
        let refresh = ProductManager::new(&client, &token)
            .toggle_active(&ProductId::new("p1"), true)
            .await
            .unwrap();
        assert_eq!(refresh.products.len(), 1);
        assert!(refresh.failure.is_none());
    }

    #[tokio::test]
    async fn test_create_then_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .and(body_json(json!({
                "name": "Tea", "description": "Assam", "price": 12.5, "stock": 5,
                "category": "food", "images": []
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "_id": "p1" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products/my-products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_list()))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            ApiClient::new(&ApiConfig::for_base_url(&format!("{}/api", server.uri())).unwrap())
                .unwrap();
        let token = BearerToken::new("owner");
        let payload = ProductPayload::from_form(&form("12.50", "5"));
        let refresh = ProductManager::new(&client, &token).create(&payload).await.unwrap();
        assert_eq!(refresh.products[0].name, "Tea");
    }

    #[tokio::test]
    async fn test_create_succeeds_when_refetch_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "_id": "p1" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products/my-products"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            ApiClient::new(&ApiConfig::for_base_url(&format!("{}/api", server.uri())).unwrap())
                .unwrap();
        let token = BearerToken::new("owner");
        let payload = ProductPayload::from_form(&form("12.50", "5"));
        let refresh = ProductManager::new(&client, &token).create(&payload).await.unwrap();

        assert!(refresh.products.is_empty());
        assert!(matches!(
            refresh.failure,
            Some(ApiError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_rejected_create_is_an_error_without_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "Name required" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products/my-products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_list()))
            .expect(0)
            .mount(&server)
            .await;

        let client =
            ApiClient::new(&ApiConfig::for_base_url(&format!("{}/api", server.uri())).unwrap())
                .unwrap();
        let token = BearerToken::new("owner");
        let payload = ProductPayload::from_form(&form("12.50", "5"));
        let error = ProductManager::new(&client, &token).create(&payload).await.unwrap_err();
        assert_eq!(error.user_message(), "Name required");
    }

    #[test]
    fn test_ensure_verified() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1", "name": "A", "email": "a@b.co", "role": "owner",
            "verificationStatus": "pending"
        }))
        .unwrap();
        assert_eq!(ensure_verified(&user), Err(UNVERIFIED_MESSAGE));
    }
}
