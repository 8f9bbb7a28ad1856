//! Static page content: the hero screen and the ordered scroll sections.
//!
//! The animator never looks inside a section's content; it only needs the
//! count.  The renderer matches on [`SectionContent`] to paint it.

use serde::{Deserialize, Serialize};

use super::pricing::{PlanCategory, PricingPlan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub brand: String,
    #[serde(default = "default_hint")]
    pub hint: String,
}

fn default_hint() -> String {
    "Scroll to begin".into()
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            brand: "INFINIO".into(),
            hint: default_hint(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCard {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    Headline {
        heading: String,
        body: String,
    },
    Features {
        heading: String,
        /// Word of `heading` painted in the accent color.
        #[serde(default)]
        highlight: Option<String>,
        cards: Vec<FeatureCard>,
    },
    Pricing {
        heading: String,
        categories: Vec<PlanCategory>,
    },
    CallToAction {
        heading: String,
        body: String,
        button: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(flatten)]
    pub content: SectionContent,
}

impl Section {
    pub fn pricing_categories(&self) -> Option<&[PlanCategory]> {
        match &self.content {
            SectionContent::Pricing { categories, .. } => Some(categories),
            _ => None,
        }
    }
}

fn plan(name: &str, price: &str, features: &[&str], popular: bool) -> PricingPlan {
    PricingPlan {
        name: name.into(),
        price: price.into(),
        period: "/mo".into(),
        features: features.iter().map(|f| f.to_string()).collect(),
        popular,
    }
}

pub fn default_sections() -> Vec<Section> {
    vec![
        Section {
            title: "Welcome".into(),
            content: SectionContent::Headline {
                heading: "Digital Excellence.".into(),
                body: "We don't just build websites. We build digital experiences that drive \
                       growth, engagement, and results."
                    .into(),
            },
        },
        Section {
            title: "About".into(),
            content: SectionContent::Features {
                heading: "We Are INFINIO".into(),
                highlight: Some("INFINIO".into()),
                cards: vec![
                    FeatureCard {
                        title: "Data-Driven".into(),
                        body: "Every decision is backed by data to ensure maximum impact and \
                               ROI for your business."
                            .into(),
                    },
                    FeatureCard {
                        title: "Creative Innovation".into(),
                        body: "Our team blends artistic vision with technical expertise to \
                               create unforgettable brands."
                            .into(),
                    },
                    FeatureCard {
                        title: "Proven Results".into(),
                        body: "We have a track record of delivering measurable success for \
                               clients of all sizes."
                            .into(),
                    },
                ],
            },
        },
        Section {
            title: "Pricing".into(),
            content: SectionContent::Pricing {
                heading: "Plans & Pricing".into(),
                categories: vec![
                    PlanCategory {
                        name: "Marketing".into(),
                        plans: vec![
                            plan("Starter", "$99", &["Core SEO", "5 Social Posts", "Basic Analytics"], false),
                            plan(
                                "Professional",
                                "$249",
                                &["Advanced SEO", "15 Social Posts", "PPC Campaigns", "Monthly Strategy Call"],
                                true,
                            ),
                            plan(
                                "Enterprise",
                                "$499",
                                &["Full Suite SEO/PPC", "Unlimited Posts", "Dedicated Manager", "24/7 Support"],
                                false,
                            ),
                        ],
                    },
                    PlanCategory {
                        name: "Web".into(),
                        plans: vec![
                            plan("Landing", "$149", &["One Page", "Responsive Layout", "Contact Form"], false),
                            plan(
                                "Business",
                                "$349",
                                &["Up to 10 Pages", "CMS Integration", "Performance Audit"],
                                true,
                            ),
                            plan(
                                "Commerce",
                                "$699",
                                &["Online Store", "Payment Setup", "Inventory Sync", "Priority Support"],
                                false,
                            ),
                        ],
                    },
                ],
            },
        },
        Section {
            title: "Contact".into(),
            content: SectionContent::CallToAction {
                heading: "Ready to Grow?".into(),
                body: "Let's build something amazing together. Reach out and let us know how \
                       we can help you achieve your goals."
                    .into(),
                button: "Schedule a Free Consultation →".into(),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_has_four_sections_with_pricing_third() {
        let sections = default_sections();
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Welcome", "About", "Pricing", "Contact"]);
        assert!(sections[2].pricing_categories().is_some());
        assert!(sections[0].pricing_categories().is_none());
    }

    #[test]
    fn section_deserializes_from_tagged_toml() {
        let src = r#"
            title = "Contact"
            kind = "call_to_action"
            heading = "Hi"
            body = "Say hello"
            button = "Go"
        "#;
        let section: Section = toml::from_str(src).unwrap();
        assert_eq!(section.title, "Contact");
        assert!(matches!(section.content, SectionContent::CallToAction { ref button, .. } if button == "Go"));
    }
}
