use serde::{Deserialize, Serialize};

use selldesk_catalog::ResolvedModifiers;
use selldesk_core::{DomainError, DomainResult, ModifierId, ProductId, StoreId};
use selldesk_pricing::{compute, PriceInput, PricePreviewResult};

/// Lowest sale price the console accepts on the form.
pub const MIN_PRICE: f64 = 0.0;

/// Form state for the product screens.
///
/// The UI layer has already parsed free-text fields: `price` is `None` when
/// the price field is empty or unparseable, and the pricing pipeline treats
/// that as `0` on creation (on edit it falls back to the persisted price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub store_id: StoreId,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub images: Vec<String>,
    pub stock: i64,
    pub price: Option<f64>,
}

impl ProductDraft {
    /// Form-level validation, deliberately outside the pricing engine: the
    /// engine never fails, the form does.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description is required"));
        }
        if !self.category.as_deref().is_some_and(|c| !c.trim().is_empty()) {
            return Err(DomainError::validation("category is required"));
        }
        if self.images.is_empty() {
            return Err(DomainError::validation("at least one image is required"));
        }
        if self.stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < MIN_PRICE {
                return Err(DomainError::validation(format!(
                    "price must be a number of at least {MIN_PRICE}"
                )));
            }
        }
        Ok(())
    }

    fn base_amount(&self) -> f64 {
        self.price.filter(|p| p.is_finite()).unwrap_or(0.0)
    }
}

/// Payload for the Product Persistence API's create endpoint.
///
/// There is intentionally no promotion field: the creation flow does not
/// offer promotion selection and the backend's creation payload has no slot
/// for one. See DESIGN.md before "fixing" this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub store_id: StoreId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub images: Vec<String>,
    pub stock: i64,
    pub price: f64,
    pub price_final: f64,
    pub discount_id: Option<ModifierId>,
    pub tax_ids: Vec<ModifierId>,
}

/// Payload for the Product Persistence API's update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_id: ProductId,
    pub store_id: StoreId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub images: Vec<String>,
    pub stock: i64,
    pub price: f64,
    pub price_final: f64,
    pub promotion_ids: Vec<ModifierId>,
    pub discount_id: Option<ModifierId>,
    pub tax_ids: Vec<ModifierId>,
}

/// Price preview for the creation screen.
///
/// Promotions in `modifiers` are ignored: creation composes
/// [`PriceInput::for_creation`], which takes none.
pub fn creation_preview(draft: &ProductDraft, modifiers: &ResolvedModifiers) -> PricePreviewResult {
    compute(&PriceInput::for_creation(
        draft.base_amount(),
        modifiers.discount.clone(),
        modifiers.taxes.clone(),
    ))
}

/// Price preview for the edit screen; an empty price field falls back to the
/// previously persisted price.
pub fn edit_preview(
    draft: &ProductDraft,
    persisted_price: f64,
    modifiers: &ResolvedModifiers,
) -> PricePreviewResult {
    compute(&PriceInput::for_edit(
        draft.price,
        persisted_price,
        modifiers.promotions.clone(),
        modifiers.discount.clone(),
        modifiers.taxes.clone(),
    ))
}

/// Validate the draft and assemble the creation payload.
///
/// `priceFinal` is the engine's final total; the ledger itself is discarded
/// here - it exists only for on-screen preview.
pub fn build_create_request(
    draft: &ProductDraft,
    modifiers: &ResolvedModifiers,
) -> DomainResult<CreateProductRequest> {
    draft.validate()?;
    let preview = creation_preview(draft, modifiers);

    Ok(CreateProductRequest {
        store_id: draft.store_id,
        name: draft.name.clone(),
        description: draft.description.clone(),
        category: draft.category.clone().unwrap_or_default(),
        images: draft.images.clone(),
        stock: draft.stock,
        price: draft.base_amount(),
        price_final: preview.final_total,
        discount_id: modifiers.discount.as_ref().map(|d| d.id),
        tax_ids: modifiers.taxes.iter().map(|t| t.id).collect(),
    })
}

/// Validate the draft and assemble the update payload.
pub fn build_update_request(
    product_id: ProductId,
    draft: &ProductDraft,
    persisted_price: f64,
    modifiers: &ResolvedModifiers,
) -> DomainResult<UpdateProductRequest> {
    draft.validate()?;
    let preview = edit_preview(draft, persisted_price, modifiers);

    Ok(UpdateProductRequest {
        product_id,
        store_id: draft.store_id,
        name: draft.name.clone(),
        description: draft.description.clone(),
        category: draft.category.clone().unwrap_or_default(),
        images: draft.images.clone(),
        stock: draft.stock,
        price: draft.price.filter(|p| p.is_finite()).unwrap_or(persisted_price),
        price_final: preview.final_total,
        promotion_ids: modifiers.promotions.iter().map(|p| p.id).collect(),
        discount_id: modifiers.discount.as_ref().map(|d| d.id),
        tax_ids: modifiers.taxes.iter().map(|t| t.id).collect(),
    })
}
