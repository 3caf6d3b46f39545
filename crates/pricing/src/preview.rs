use serde::{Deserialize, Serialize};

use selldesk_catalog::{AdjustmentKind, Discount, Promotion, Tax};
use selldesk_core::ValueObject;

/// Stage of the pricing pipeline a ledger step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Base,
    Promotion,
    Discount,
    Tax,
    Total,
}

/// One entry in the ordered audit trail shown to the seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentStep {
    /// Stable row key: `"base"`/`"total"` for the boundary steps, the
    /// modifier's id for modifier steps.
    pub id: String,
    pub label: String,
    pub kind: StepKind,
    /// Signed change applied at this step; `0` for base and total.
    pub delta: f64,
    /// Value after applying `delta`, clamped to be non-negative.
    pub running_total: f64,
    pub detail: Option<String>,
}

impl ValueObject for AdjustmentStep {}

/// Result of one pipeline run: the full ledger plus the final sale price.
///
/// Only `final_total` is ever persisted (as the product's `priceFinal`); the
/// ledger exists for on-screen preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePreviewResult {
    pub steps: Vec<AdjustmentStep>,
    pub final_total: f64,
}

impl ValueObject for PricePreviewResult {}

/// Input to one pipeline run.
///
/// Modifier lists are applied exactly in the order supplied - the engine
/// never re-sorts by value, name or id. Order is the seller's selection
/// order and it affects intermediate (and, for mixed-kind sequences, final)
/// ledger values.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceInput {
    pub base_amount: f64,
    pub promotions: Vec<Promotion>,
    pub discount: Option<Discount>,
    pub taxes: Vec<Tax>,
}

impl PriceInput {
    /// Input for the product-creation flow.
    ///
    /// Creation has no promotion selection; the creation payload carries no
    /// promotion field either, so promotions are structurally absent here
    /// rather than merely empty by convention.
    pub fn for_creation(base_amount: f64, discount: Option<Discount>, taxes: Vec<Tax>) -> Self {
        Self {
            base_amount: finite_or_zero(base_amount),
            promotions: Vec::new(),
            discount,
            taxes,
        }
    }

    /// Input for the product-edit flow.
    ///
    /// An empty or unparseable price field falls back to the previously
    /// persisted price.
    pub fn for_edit(
        price_field: Option<f64>,
        persisted_price: f64,
        promotions: Vec<Promotion>,
        discount: Option<Discount>,
        taxes: Vec<Tax>,
    ) -> Self {
        let base = price_field
            .filter(|p| p.is_finite())
            .unwrap_or(persisted_price);
        Self {
            base_amount: finite_or_zero(base),
            promotions,
            discount,
            taxes,
        }
    }
}

/// Run the staged pipeline: `BASE → PROMOTION* → DISCOUNT? → TAX* → TOTAL`.
///
/// Percentages always compound on the running total at their stage, never on
/// the original base. Every stage clamps the running total at zero. The
/// function never fails: malformed numeric values contribute a zero-delta
/// step that still appears in the ledger for traceability.
pub fn compute(input: &PriceInput) -> PricePreviewResult {
    let mut steps = Vec::with_capacity(
        2 + input.promotions.len() + usize::from(input.discount.is_some()) + input.taxes.len(),
    );

    let mut running = input.base_amount.max(0.0);
    steps.push(AdjustmentStep {
        id: "base".to_string(),
        label: "Base price".to_string(),
        kind: StepKind::Base,
        delta: 0.0,
        running_total: running,
        detail: None,
    });

    for promotion in &input.promotions {
        let pct = promotion.effective_percent();
        let delta = -(running * pct / 100.0);
        running = (running + delta).max(0.0);
        steps.push(AdjustmentStep {
            id: promotion.id.to_string(),
            label: format!("Promotion: {}", promotion.name),
            kind: StepKind::Promotion,
            delta,
            running_total: running,
            detail: Some(format!("{pct}% off subtotal")),
        });
    }

    if let Some(discount) = &input.discount {
        let value = finite_or_zero(discount.value);
        let (delta, detail) = match discount.kind {
            AdjustmentKind::Percentage => {
                (-(running * value / 100.0), format!("{value}% off subtotal"))
            }
            AdjustmentKind::Fixed => (-value, format!("{value} off")),
        };
        running = (running + delta).max(0.0);
        steps.push(AdjustmentStep {
            id: discount.id.to_string(),
            label: format!("Discount: {}", discount.name),
            kind: StepKind::Discount,
            delta,
            running_total: running,
            detail: Some(detail),
        });
    }

    for tax in &input.taxes {
        let value = finite_or_zero(tax.value);
        let (delta, detail) = match tax.kind {
            AdjustmentKind::Percentage => {
                (running * value / 100.0, format!("{value}% added to subtotal"))
            }
            AdjustmentKind::Fixed => (value, format!("{value} added")),
        };
        // Clamp is defensive; taxes are expected non-negative but the
        // running total must never go below zero under any input.
        running = (running + delta).max(0.0);
        steps.push(AdjustmentStep {
            id: tax.id.to_string(),
            label: format!("Tax: {}", tax.name),
            kind: StepKind::Tax,
            delta,
            running_total: running,
            detail: Some(detail),
        });
    }

    steps.push(AdjustmentStep {
        id: "total".to_string(),
        label: "Total".to_string(),
        kind: StepKind::Total,
        delta: 0.0,
        running_total: running,
        detail: None,
    });

    PricePreviewResult {
        steps,
        final_total: running,
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
