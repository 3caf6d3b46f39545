//! Products domain module.
//!
//! This crate owns what the product screens submit to the external Product
//! Persistence API: draft validation and create/update request assembly.
//! Both flows compose the same price-adjustment engine; the creation flow's
//! lack of promotions is an explicit constructor choice here, not a second
//! copy of the pipeline.

pub mod product;

pub use product::{
    build_create_request, build_update_request, creation_preview, edit_preview,
    CreateProductRequest, ProductDraft, UpdateProductRequest,
};
