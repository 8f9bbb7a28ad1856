//! Pricing plans and the active-tab selection over plan categories.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// Highlighted as "Most Popular".
    #[serde(default)]
    pub popular: bool,
}

fn default_period() -> String {
    "/mo".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCategory {
    pub name: String,
    pub plans: Vec<PricingPlan>,
}

/// Single-selection tab state.  Any tab can be selected from any other.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTabs {
    categories: Vec<PlanCategory>,
    active: usize,
}

impl PricingTabs {
    pub fn new(categories: Vec<PlanCategory>) -> Result<Self, ConfigError> {
        if let Some(empty) = categories.iter().find(|c| c.plans.is_empty()) {
            return Err(ConfigError::EmptyPricingCategory(empty.name.clone()));
        }
        Ok(Self {
            categories,
            active: 0,
        })
    }

    pub fn categories(&self) -> &[PlanCategory] {
        &self.categories
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> Option<&PlanCategory> {
        self.categories.get(self.active)
    }

    /// Select a tab by index.  Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.categories.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) {
        if !self.categories.is_empty() {
            self.active = (self.active + 1) % self.categories.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.categories.is_empty() {
            self.active = (self.active + self.categories.len() - 1) % self.categories.len();
        }
    }
}
