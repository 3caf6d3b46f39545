use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use selldesk_core::{Entity, ModifierId};

/// How a discount or tax value is interpreted.
///
/// `Percentage` values are relative to the running total at the point in the
/// pricing pipeline where the modifier is applied (compounding); `Fixed`
/// values add or subtract a constant amount regardless of the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Percentage,
    Fixed,
}

/// Percentage-only markdown, selectable in multiples.
///
/// `value_percent` may be absent; absent, zero or non-finite values make the
/// promotion a no-op (it still appears in the price ledger for traceability).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: ModifierId,
    pub name: String,
    #[serde(default)]
    pub value_percent: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl Promotion {
    /// The percent this promotion actually contributes to the pipeline.
    ///
    /// Absent, non-finite and non-positive values degrade to `0.0` (no-op)
    /// rather than being rejected.
    pub fn effective_percent(&self) -> f64 {
        match self.value_percent {
            Some(pct) if pct.is_finite() && pct > 0.0 => pct,
            _ => 0.0,
        }
    }

    /// Whether the promotion is selectable at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.active && window_contains(self.starts_at, self.ends_at, now)
    }
}

/// Single selectable markdown: percentage-of-running-total or fixed amount.
///
/// At most one discount may be selected for a product at a time; the catalog
/// layer enforces the "at most one" part, this type only models the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: ModifierId,
    pub name: String,
    pub kind: AdjustmentKind,
    pub value: f64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl Discount {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.active && window_contains(self.starts_at, self.ends_at, now)
    }
}

/// Markup applied after the discount stage, in selection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tax {
    pub id: ModifierId,
    pub name: String,
    pub kind: AdjustmentKind,
    pub value: f64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl Tax {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.active && window_contains(self.starts_at, self.ends_at, now)
    }
}

/// Closed sum over the three modifier kinds.
///
/// Consumers match exhaustively; there is no stringly-typed "type" field to
/// fall through on. The wire representation stays tagged for the backend
/// (`{"type": "promotion", ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Modifier {
    Promotion(Promotion),
    Discount(Discount),
    Tax(Tax),
}

impl Modifier {
    pub fn id(&self) -> ModifierId {
        match self {
            Modifier::Promotion(p) => p.id,
            Modifier::Discount(d) => d.id,
            Modifier::Tax(t) => t.id,
        }
    }

    /// Human-readable name shown in the price ledger.
    pub fn name(&self) -> &str {
        match self {
            Modifier::Promotion(p) => &p.name,
            Modifier::Discount(d) => &d.name,
            Modifier::Tax(t) => &t.name,
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            Modifier::Promotion(p) => p.is_active_at(now),
            Modifier::Discount(d) => d.is_active_at(now),
            Modifier::Tax(t) => t.is_active_at(now),
        }
    }
}

impl Entity for Promotion {
    type Id = ModifierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Entity for Discount {
    type Id = ModifierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Entity for Tax {
    type Id = ModifierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn default_active() -> bool {
    true
}

/// Inclusive on both ends; a missing bound means unbounded on that side.
fn window_contains(
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    if let Some(start) = starts_at {
        if now < start {
            return false;
        }
    }
    if let Some(end) = ends_at {
        if now > end {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_promotion(value_percent: Option<f64>) -> Promotion {
        Promotion {
            id: ModifierId::new(),
            name: "Summer Sale".to_string(),
            value_percent,
            active: true,
            starts_at: None,
            ends_at: None,
        }
    }

    #[test]
    fn effective_percent_passes_positive_finite_values_through() {
        assert_eq!(test_promotion(Some(12.5)).effective_percent(), 12.5);
    }

    #[test]
    fn effective_percent_degrades_missing_zero_and_non_finite_to_zero() {
        assert_eq!(test_promotion(None).effective_percent(), 0.0);
        assert_eq!(test_promotion(Some(0.0)).effective_percent(), 0.0);
        assert_eq!(test_promotion(Some(-5.0)).effective_percent(), 0.0);
        assert_eq!(test_promotion(Some(f64::NAN)).effective_percent(), 0.0);
        assert_eq!(test_promotion(Some(f64::INFINITY)).effective_percent(), 0.0);
    }

    #[test]
    fn inactive_flag_overrides_open_window() {
        let mut promotion = test_promotion(Some(10.0));
        promotion.active = false;
        assert!(!promotion.is_active_at(Utc::now()));
    }

    #[test]
    fn validity_window_bounds_are_inclusive() {
        let now = Utc::now();
        let mut promotion = test_promotion(Some(10.0));
        promotion.starts_at = Some(now - Duration::days(1));
        promotion.ends_at = Some(now + Duration::days(1));
        assert!(promotion.is_active_at(now));
        assert!(promotion.is_active_at(now - Duration::days(1)));
        assert!(!promotion.is_active_at(now - Duration::days(2)));
        assert!(!promotion.is_active_at(now + Duration::days(2)));
    }

    #[test]
    fn modifier_wire_format_is_tagged_camel_case() {
        let tax = Modifier::Tax(Tax {
            id: ModifierId::new(),
            name: "VAT".to_string(),
            kind: AdjustmentKind::Percentage,
            value: 18.0,
            active: true,
            starts_at: None,
            ends_at: None,
        });

        let json = serde_json::to_value(&tax).unwrap();
        assert_eq!(json["type"], "tax");
        assert_eq!(json["kind"], "percentage");
        assert_eq!(json["value"], 18.0);
    }

    #[test]
    fn modifier_deserializes_backend_payload_with_defaults() {
        let json = format!(
            r#"{{"type":"discount","id":"{}","name":"Clearance","kind":"fixed","value":50.0}}"#,
            ModifierId::new()
        );

        let modifier: Modifier = serde_json::from_str(&json).unwrap();
        match modifier {
            Modifier::Discount(d) => {
                assert_eq!(d.kind, AdjustmentKind::Fixed);
                assert_eq!(d.value, 50.0);
                assert!(d.active);
                assert!(d.starts_at.is_none());
            }
            _ => panic!("Expected Discount modifier"),
        }
    }
}
