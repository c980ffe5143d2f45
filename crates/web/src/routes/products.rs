//! Product management for business owners.
//!
//! Mutations render the products tab directly with the refetched list.
//! Unverified owners are turned away before any request is made.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use bizsphere_core::{ProductCategory, ProductId};

use super::business::BusinessTemplate;
use super::{Banner, redirect_with_error};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{AuthenticatedUser, RequireOwner};
use crate::models::{Product, ProductPayload, User};
use crate::services::{CatalogRefresh, ProductManager};
use crate::services::products::{ProductForm, ensure_verified};
use crate::state::AppState;

const PRODUCTS_TAB: &str = "products";

/// One `<option>` of the category select.
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn category_options(selected: ProductCategory) -> Vec<CategoryOption> {
    ProductCategory::ALL
        .into_iter()
        .map(|category| CategoryOption {
            value: category.as_str(),
            label: category.label(),
            selected: category == selected,
        })
        .collect()
}

/// Create and edit form page.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub user: User,
    pub title: &'static str,
    pub action: String,
    pub form: ProductForm,
    pub categories: Vec<CategoryOption>,
    pub banner: Option<Banner>,
}

impl ProductFormTemplate {
    fn create(user: User, form: ProductForm, banner: Option<Banner>) -> Self {
        Self {
            user,
            title: "Add New Product",
            action: "/products".to_string(),
            categories: category_options(form.category()),
            form,
            banner,
        }
    }

    fn edit(user: User, id: &ProductId, form: ProductForm, banner: Option<Banner>) -> Self {
        Self {
            user,
            title: "Edit Product",
            action: format!("/products/{}", urlencoding::encode(id.as_str())),
            categories: category_options(form.category()),
            form,
            banner,
        }
    }
}

/// Delete confirmation page.
#[derive(Template, WebTemplate)]
#[template(path = "products/delete.html")]
pub struct ConfirmDeleteTemplate {
    pub user: User,
    pub product: Product,
    pub banner: Option<Banner>,
}

/// Toggle form data: the product's state as the owner saw it.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub is_active: bool,
}

/// Delete form data.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub confirm: String,
}

fn refuse_unverified(user: &User) -> Option<Response> {
    ensure_verified(user)
        .err()
        .map(|message| redirect_with_error(PRODUCTS_TAB, message).into_response())
}

fn products_page(auth: AuthenticatedUser, refresh: CatalogRefresh, message: String) -> Response {
    BusinessTemplate::after_change(auth.user, refresh, message).into_response()
}

async fn find_product(
    state: &AppState,
    auth: &AuthenticatedUser,
    id: &ProductId,
) -> Result<Product> {
    ProductManager::new(state.api(), &auth.token)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// New product form.
#[instrument(skip(auth))]
pub async fn new_page(RequireOwner(auth): RequireOwner) -> Response {
    if let Some(refusal) = refuse_unverified(&auth.user) {
        return refusal;
    }
    ProductFormTemplate::create(auth.user, ProductForm::default(), None).into_response()
}

/// Create a product.
#[instrument(skip(state, auth, form), fields(name = %form.name))]
pub async fn create(
    State(state): State<AppState>,
    RequireOwner(auth): RequireOwner,
    Form(form): Form<ProductForm>,
) -> Response {
    if let Some(refusal) = refuse_unverified(&auth.user) {
        return refusal;
    }

    let payload = ProductPayload::from_form(&form);
    match ProductManager::new(state.api(), &auth.token)
        .create(&payload)
        .await
    {
        Ok(refresh) => products_page(auth, refresh, "Product created successfully!".to_string()),
        Err(error) => {
            tracing::warn!(%error, "Failed to save product");
            let banner = Banner::error(error.user_message());
            ProductFormTemplate::create(auth.user, form, Some(banner)).into_response()
        }
    }
}

/// Edit product form, prefilled from the owner's product list.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not in the owner's list.
#[instrument(skip(state, auth))]
pub async fn edit_page(
    State(state): State<AppState>,
    RequireOwner(auth): RequireOwner,
    Path(id): Path<String>,
) -> Result<Response> {
    if let Some(refusal) = refuse_unverified(&auth.user) {
        return Ok(refusal);
    }

    let id = ProductId::new(id);
    let product = find_product(&state, &auth, &id).await?;
    let form = ProductForm::from_product(&product);
    Ok(ProductFormTemplate::edit(auth.user, &id, form, None).into_response())
}

/// Update a product.
#[instrument(skip(state, auth, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireOwner(auth): RequireOwner,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    if let Some(refusal) = refuse_unverified(&auth.user) {
        return refusal;
    }

    let id = ProductId::new(id);
    let payload = ProductPayload::from_form(&form);
    match ProductManager::new(state.api(), &auth.token)
        .update(&id, &payload)
        .await
    {
        Ok(refresh) => products_page(auth, refresh, "Product updated successfully!".to_string()),
        Err(error) => {
            tracing::warn!(%error, "Failed to save product");
            let banner = Banner::error(error.user_message());
            ProductFormTemplate::edit(auth.user, &id, form, Some(banner)).into_response()
        }
    }
}

/// Activate or deactivate a product.
#[instrument(skip(state, auth, form))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireOwner(auth): RequireOwner,
    Path(id): Path<String>,
    Form(form): Form<ToggleForm>,
) -> Response {
    if let Some(refusal) = refuse_unverified(&auth.user) {
        return refusal;
    }

    let id = ProductId::new(id);
    match ProductManager::new(state.api(), &auth.token)
        .toggle_active(&id, form.is_active)
        .await
    {
        Ok(refresh) => {
            let verb = if form.is_active { "deactivated" } else { "activated" };
            products_page(auth, refresh, format!("Product {verb} successfully!"))
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to update product status");
            redirect_with_error(PRODUCTS_TAB, "Failed to update product status").into_response()
        }
    }
}

/// Ask the owner to confirm a deletion.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not in the owner's list.
#[instrument(skip(state, auth))]
pub async fn delete_page(
    State(state): State<AppState>,
    RequireOwner(auth): RequireOwner,
    Path(id): Path<String>,
) -> Result<Response> {
    if let Some(refusal) = refuse_unverified(&auth.user) {
        return Ok(refusal);
    }

    let product = find_product(&state, &auth, &ProductId::new(id)).await?;
    Ok(ConfirmDeleteTemplate {
        user: auth.user,
        product,
        banner: None,
    }
    .into_response())
}

/// Delete a product. Does nothing unless the form confirms.
#[instrument(skip(state, auth, form))]
pub async fn delete(
    State(state): State<AppState>,
    RequireOwner(auth): RequireOwner,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Response {
    if let Some(refusal) = refuse_unverified(&auth.user) {
        return refusal;
    }
    if form.confirm != "yes" {
        return axum::response::Redirect::to("/dashboard?tab=products").into_response();
    }

    let id = ProductId::new(id);
    match ProductManager::new(state.api(), &auth.token).delete(&id).await {
        Ok(refresh) => products_page(auth, refresh, "Product deleted successfully!".to_string()),
        Err(error) => {
            tracing::warn!(%error, "Failed to delete product");
            redirect_with_error(PRODUCTS_TAB, "Failed to delete product").into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn owner() -> User {
        serde_json::from_value(json!({
            "_id": "o1", "name": "Asha", "email": "asha@chai.in", "role": "owner",
            "businessVerified": true
        }))
        .unwrap()
    }

    #[test]
    fn test_category_options_mark_selection() {
        let options = category_options(ProductCategory::Books);
        assert_eq!(options.len(), 6);
        assert!(options.iter().any(|o| o.value == "books" && o.selected));
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    }

    #[test]
    fn test_edit_form_posts_to_product() {
        let form = ProductForm {
            name: "Tea".to_string(),
            category: "food".to_string(),
            ..ProductForm::default()
        };
        let html = ProductFormTemplate::edit(owner(), &ProductId::new("p1"), form, None)
            .render()
            .unwrap();
        assert!(html.contains(r#"action="/products/p1""#));
        assert!(html.contains("Edit Product"));
        assert!(html.contains(r#"value="food" selected"#));
    }

    #[test]
    fn test_delete_page_asks_for_confirmation() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1", "name": "Tea", "price": 12.5, "stock": 5
        }))
        .unwrap();
        let html = ConfirmDeleteTemplate {
            user: owner(),
            product,
            banner: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("Are you sure you want to delete this product?"));
        assert!(html.contains(r#"name="confirm" value="yes""#));
    }
}
