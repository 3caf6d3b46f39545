use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use selldesk_core::ModifierId;

use crate::modifier::{Discount, Promotion, Tax};

/// Snapshot of the backend's modifier lists for one store.
///
/// The snapshot preserves backend order; the console relies on it when
/// rendering selection lists, and the pricing pipeline relies on selection
/// order downstream. The catalog never reorders anything.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierCatalog {
    #[serde(default)]
    pub promotions: Vec<Promotion>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    #[serde(default)]
    pub taxes: Vec<Tax>,
}

impl ModifierCatalog {
    /// Promotions selectable at `now`, in backend order.
    pub fn active_promotions(&self, now: DateTime<Utc>) -> Vec<&Promotion> {
        self.promotions.iter().filter(|p| p.is_active_at(now)).collect()
    }

    /// Discounts selectable at `now`, in backend order.
    pub fn active_discounts(&self, now: DateTime<Utc>) -> Vec<&Discount> {
        self.discounts.iter().filter(|d| d.is_active_at(now)).collect()
    }

    /// Taxes selectable at `now`, in backend order.
    pub fn active_taxes(&self, now: DateTime<Utc>) -> Vec<&Tax> {
        self.taxes.iter().filter(|t| t.is_active_at(now)).collect()
    }

    fn find_promotion(&self, id: ModifierId) -> Option<&Promotion> {
        self.promotions.iter().find(|p| p.id == id)
    }

    fn find_discount(&self, id: ModifierId) -> Option<&Discount> {
        self.discounts.iter().find(|d| d.id == id)
    }

    fn find_tax(&self, id: ModifierId) -> Option<&Tax> {
        self.taxes.iter().find(|t| t.id == id)
    }
}

/// The seller's picks on the product form, by id, in selection order.
///
/// At most one discount can be selected; promotions and taxes are ordered
/// lists because the pipeline applies them in selection order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierSelection {
    #[serde(default)]
    pub promotion_ids: Vec<ModifierId>,
    #[serde(default)]
    pub discount_id: Option<ModifierId>,
    #[serde(default)]
    pub tax_ids: Vec<ModifierId>,
}

/// Concrete modifiers resolved from a selection, ready for the pricing input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedModifiers {
    pub promotions: Vec<Promotion>,
    pub discount: Option<Discount>,
    pub taxes: Vec<Tax>,
}

impl ModifierSelection {
    /// Resolve ids against the catalog into concrete modifiers.
    ///
    /// Selection order is preserved. Ids that no longer resolve to an
    /// active entry are dropped silently (the backend list may have changed
    /// while the form was open); each drop is traced for diagnosis.
    pub fn resolve(&self, catalog: &ModifierCatalog, now: DateTime<Utc>) -> ResolvedModifiers {
        let mut resolved = ResolvedModifiers::default();

        for id in &self.promotion_ids {
            match catalog.find_promotion(*id).filter(|p| p.is_active_at(now)) {
                Some(promotion) => resolved.promotions.push(promotion.clone()),
                None => tracing::debug!(modifier_id = %id, "selected promotion no longer active, dropped"),
            }
        }

        if let Some(id) = self.discount_id {
            match catalog.find_discount(id).filter(|d| d.is_active_at(now)) {
                Some(discount) => resolved.discount = Some(discount.clone()),
                None => tracing::debug!(modifier_id = %id, "selected discount no longer active, dropped"),
            }
        }

        for id in &self.tax_ids {
            match catalog.find_tax(*id).filter(|t| t.is_active_at(now)) {
                Some(tax) => resolved.taxes.push(tax.clone()),
                None => tracing::debug!(modifier_id = %id, "selected tax no longer active, dropped"),
            }
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::AdjustmentKind;
    use chrono::Duration;

    fn promotion(name: &str, pct: f64) -> Promotion {
        Promotion {
            id: ModifierId::new(),
            name: name.to_string(),
            value_percent: Some(pct),
            active: true,
            starts_at: None,
            ends_at: None,
        }
    }

    fn tax(name: &str, kind: AdjustmentKind, value: f64) -> Tax {
        Tax {
            id: ModifierId::new(),
            name: name.to_string(),
            kind,
            value,
            active: true,
            starts_at: None,
            ends_at: None,
        }
    }

    fn discount(name: &str, kind: AdjustmentKind, value: f64) -> Discount {
        Discount {
            id: ModifierId::new(),
            name: name.to_string(),
            kind,
            value,
            active: true,
            starts_at: None,
            ends_at: None,
        }
    }

    #[test]
    fn active_filters_drop_expired_entries_but_keep_order() {
        let now = Utc::now();
        let mut expired = promotion("Expired", 20.0);
        expired.ends_at = Some(now - Duration::days(1));

        let catalog = ModifierCatalog {
            promotions: vec![promotion("A", 10.0), expired, promotion("B", 5.0)],
            discounts: vec![],
            taxes: vec![],
        };

        let active = catalog.active_promotions(now);
        let names: Vec<&str> = active.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn resolve_preserves_selection_order_not_catalog_order() {
        let now = Utc::now();
        let first = tax("City", AdjustmentKind::Fixed, 10.0);
        let second = tax("VAT", AdjustmentKind::Percentage, 18.0);
        let catalog = ModifierCatalog {
            promotions: vec![],
            discounts: vec![],
            taxes: vec![first.clone(), second.clone()],
        };

        // Seller checked VAT before City.
        let selection = ModifierSelection {
            promotion_ids: vec![],
            discount_id: None,
            tax_ids: vec![second.id, first.id],
        };

        let resolved = selection.resolve(&catalog, now);
        let names: Vec<&str> = resolved.taxes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["VAT", "City"]);
    }

    #[test]
    fn resolve_drops_unknown_and_inactive_ids() {
        let now = Utc::now();
        let mut inactive = discount("Gone", AdjustmentKind::Fixed, 5.0);
        inactive.active = false;

        let catalog = ModifierCatalog {
            promotions: vec![promotion("A", 10.0)],
            discounts: vec![inactive.clone()],
            taxes: vec![],
        };

        let selection = ModifierSelection {
            promotion_ids: vec![catalog.promotions[0].id, ModifierId::new()],
            discount_id: Some(inactive.id),
            tax_ids: vec![ModifierId::new()],
        };

        let resolved = selection.resolve(&catalog, now);
        assert_eq!(resolved.promotions.len(), 1);
        assert!(resolved.discount.is_none());
        assert!(resolved.taxes.is_empty());
    }

    #[test]
    fn empty_selection_resolves_to_empty_modifiers() {
        let catalog = ModifierCatalog::default();
        let resolved = ModifierSelection::default().resolve(&catalog, Utc::now());
        assert_eq!(resolved, ResolvedModifiers::default());
    }

    #[test]
    fn catalog_deserializes_backend_payload_with_missing_lists() {
        let catalog: ModifierCatalog = serde_json::from_str(r#"{"taxes":[]}"#).unwrap();
        assert!(catalog.promotions.is_empty());
        assert!(catalog.discounts.is_empty());
    }
}
