use serde::{Deserialize, Serialize};

use autoservice_core::{DomainError, DomainResult, RecordId, TenantId};

use super::required;

/// Stocked part in the workshop's parts room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub sku: String,
    pub name: String,
    pub quantity_on_hand: u32,
    pub reorder_level: u32,
    pub unit_cost_cents: u64,
}

impl Part {
    pub fn new(
        tenant_id: TenantId,
        sku: &str,
        name: &str,
        quantity_on_hand: u32,
        reorder_level: u32,
        unit_cost_cents: u64,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: RecordId::new(),
            tenant_id,
            sku: required("sku", sku)?.to_ascii_uppercase(),
            name: required("part name", name)?,
            quantity_on_hand,
            reorder_level,
            unit_cost_cents,
        })
    }

    pub fn needs_reorder(&self) -> bool {
        self.quantity_on_hand <= self.reorder_level
    }

    /// Apply a stock movement; stock can never go below zero.
    pub fn adjust_stock(&mut self, delta: i64) -> DomainResult<u32> {
        let next = i64::from(self.quantity_on_hand) + delta;
        if next < 0 {
            return Err(DomainError::invariant(format!(
                "insufficient stock for {}: have {}, need {}",
                self.sku,
                self.quantity_on_hand,
                -delta
            )));
        }
        self.quantity_on_hand = u32::try_from(next)
            .map_err(|_| DomainError::invariant("stock quantity overflow"))?;
        Ok(self.quantity_on_hand)
    }

    pub fn stock_value_cents(&self) -> u64 {
        u64::from(self.quantity_on_hand) * self.unit_cost_cents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oil_filter() -> Part {
        Part::new(TenantId::new(), "of-1042", "Oil filter", 4, 5, 850).unwrap()
    }

    #[test]
    fn reorder_at_or_below_level() {
        let mut part = oil_filter();
        assert!(part.needs_reorder());
        part.adjust_stock(10).unwrap();
        assert!(!part.needs_reorder());
        assert_eq!(part.sku, "OF-1042");
    }

    #[test]
    fn stock_cannot_go_negative() {
        let mut part = oil_filter();
        let err = part.adjust_stock(-5).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(part.quantity_on_hand, 4);
        assert_eq!(part.adjust_stock(-4).unwrap(), 0);
    }

    #[test]
    fn stock_value() {
        assert_eq!(oil_filter().stock_value_cents(), 3400);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: applying movements never leaves stock below zero, and a
            /// rejected movement leaves the quantity untouched.
            #[test]
            fn stock_never_negative(
                start in 0u32..500,
                deltas in proptest::collection::vec(-200i64..200, 0..40),
            ) {
                let mut part = Part::new(TenantId::new(), "P-1", "Part", start, 0, 1).unwrap();
                let mut expected = i64::from(start);
                for delta in deltas {
                    let before = part.quantity_on_hand;
                    match part.adjust_stock(delta) {
                        Ok(qty) => {
                            expected += delta;
                            prop_assert_eq!(i64::from(qty), expected);
                        }
                        Err(_) => {
                            prop_assert!(expected + delta < 0);
                            prop_assert_eq!(part.quantity_on_hand, before);
                        }
                    }
                }
            }
        }
    }
}
