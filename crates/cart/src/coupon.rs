//! Static coupon-code lookup.

use std::collections::BTreeMap;

use storefront_core::{DomainError, DomainResult};

/// Environment variable overriding the built-in coupon table.
///
/// Format: `CODE=PCT,CODE=PCT` (e.g. `SAVE10=10,VIP=35`).
pub const COUPONS_ENV: &str = "STOREFRONT_COUPONS";

/// Maps coupon codes to a fixed percentage off (0..=100).
///
/// Lookups are exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponTable {
    codes: BTreeMap<String, u8>,
}

impl Default for CouponTable {
    fn default() -> Self {
        let codes = [("SAVE10", 10), ("SAVE20", 20)]
            .into_iter()
            .map(|(code, pct)| (code.to_string(), pct))
            .collect();
        Self { codes }
    }
}

impl CouponTable {
    /// A table with no codes; every lookup misses.
    pub fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    /// Add or replace a code.
    pub fn with_code(mut self, code: impl Into<String>, pct: u8) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::validation("coupon code must not be empty"));
        }
        if pct > 100 {
            return Err(DomainError::validation(format!(
                "coupon {code}: discount must be at most 100 percent"
            )));
        }
        self.codes.insert(code, pct);
        Ok(self)
    }

    /// Parse a `CODE=PCT,CODE=PCT` list. Empty segments are skipped.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let mut table = Self::empty();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (code, pct) = entry.split_once('=').ok_or_else(|| {
                DomainError::validation(format!("coupon entry `{entry}` is not CODE=PCT"))
            })?;
            let pct: u8 = pct.trim().parse().map_err(|_| {
                DomainError::validation(format!(
                    "coupon entry `{entry}` has a non-numeric discount"
                ))
            })?;
            table = table.with_code(code.trim(), pct)?;
        }
        Ok(table)
    }

    /// Load from `STOREFRONT_COUPONS`, falling back to the built-in table when
    /// the variable is unset or malformed.
    pub fn from_env() -> Self {
        match std::env::var(COUPONS_ENV) {
            Ok(raw) => Self::parse(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "{} is invalid; using built-in coupons", COUPONS_ENV);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Discount percentage for `code`, if it is known.
    pub fn discount_for(&self, code: &str) -> Option<u8> {
        self.codes.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
