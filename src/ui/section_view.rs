//! Lays section content out as rows of styled text runs.
//!
//! Composition is independent of where the rows end up on screen: the page
//! widget positions, clips and fades them.  Widths are measured in chars;
//! every glyph used here is single-width.

use crate::core::content::{FeatureCard, Section, SectionContent};
use crate::core::entrance::card_reveal;
use crate::core::pricing::{PlanCategory, PricingPlan, PricingTabs};

use super::theme::Role;

/// A run of text sharing one role.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub role: Role,
    /// Fade applied on top of the section's own opacity.
    pub alpha: f64,
}

impl Run {
    pub fn new(text: impl Into<String>, role: Role) -> Self {
        Self {
            text: text.into(),
            role,
            alpha: 1.0,
        }
    }
}

/// One screen row of runs.
pub type Row = Vec<Run>;

const GAP: usize = 2;
const MIN_CARD_WIDTH: usize = 22;
const BODY_MAX_WIDTH: usize = 72;

pub fn row_width(row: &[Run]) -> usize {
    row.iter().map(|r| r.text.chars().count()).sum()
}

/// Greedy word wrap.  Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

fn text(s: impl Into<String>, role: Role) -> Row {
    vec![Run::new(s, role)]
}

fn blank() -> Row {
    Vec::new()
}

fn pad_to(mut row: Row, width: usize) -> Row {
    let w = row_width(&row);
    if w < width {
        row.push(Run::new(" ".repeat(width - w), Role::Body));
    }
    row
}

/// Wrap content rows in a rounded box of inner width `inner`.
fn boxed(content: Vec<Row>, inner: usize, border: Role) -> Vec<Row> {
    let mut rows = Vec::with_capacity(content.len() + 2);
    rows.push(text(format!("╭{}╮", "─".repeat(inner + 2)), border));
    for row in content {
        let mut r = vec![Run::new("│ ", border)];
        r.extend(pad_to(row, inner));
        r.push(Run::new(" │", border));
        rows.push(r);
    }
    rows.push(text(format!("╰{}╯", "─".repeat(inner + 2)), border));
    rows
}

/// Place equally wide columns side by side, padding short ones.
fn join_columns(columns: Vec<Vec<Row>>, col_width: usize) -> Vec<Row> {
    let height = columns.iter().map(Vec::len).max().unwrap_or(0);
    let mut rows = Vec::with_capacity(height);
    for r in 0..height {
        let mut row = Row::new();
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                row.push(Run::new(" ".repeat(GAP), Role::Body));
            }
            let cell = col.get(r).cloned().unwrap_or_default();
            row.extend(pad_to(cell, col_width));
        }
        rows.push(row);
    }
    rows
}

/// Content of one card with its border role and fade.
struct Card {
    rows: Vec<Row>,
    border: Role,
    alpha: f64,
}

impl Card {
    fn new(rows: Vec<Row>, border: Role) -> Self {
        Self {
            rows,
            border,
            alpha: 1.0,
        }
    }

    fn boxed(self, inner: usize) -> Vec<Row> {
        let mut rows = boxed(self.rows, inner, self.border);
        for run in rows.iter_mut().flatten() {
            run.alpha *= self.alpha;
        }
        rows
    }
}

/// Lay `cards` out in as many columns as fit, otherwise stack them.
fn card_grid(cards: Vec<Card>, width: usize) -> Vec<Row> {
    let n = cards.len().max(1);
    let fits = n * (MIN_CARD_WIDTH + 4) + (n - 1) * GAP <= width;
    if fits {
        let col_width = (width - (n - 1) * GAP) / n;
        let inner = col_width - 4;
        let columns = cards
            .into_iter()
            .map(|card| card.boxed(inner))
            .collect();
        join_columns(columns, col_width)
    } else {
        let inner = width.saturating_sub(4).max(1);
        cards
            .into_iter()
            .flat_map(|card| card.boxed(inner))
            .collect()
    }
}

/// Cut a row down to `width` chars.
fn fit(row: Row, width: usize) -> Row {
    let mut left = width;
    let mut out = Row::new();
    for mut run in row {
        if left == 0 {
            break;
        }
        let n = run.text.chars().count();
        if n <= left {
            left -= n;
        } else {
            run.text = run.text.chars().take(left).collect();
            left = 0;
        }
        out.push(run);
    }
    out
}

fn feature_card(card: &FeatureCard, inner: usize) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut title = wrap(&card.title, inner.saturating_sub(2)).into_iter();
    if let Some(first) = title.next() {
        rows.push(vec![Run::new("✦ ", Role::Accent), Run::new(first, Role::Heading)]);
    }
    rows.extend(title.map(|l| vec![Run::new("  ", Role::Body), Run::new(l, Role::Heading)]));
    rows.push(blank());
    rows.extend(wrap(&card.body, inner).into_iter().map(|l| text(l, Role::Body)));
    rows
}

fn plan_card(plan: &PricingPlan, inner: usize) -> Vec<Row> {
    let mut rows = Vec::new();
    if plan.popular {
        rows.push(text("★ Most Popular", Role::Accent));
    }
    rows.extend(wrap(&plan.name, inner).into_iter().map(|l| text(l, Role::Heading)));
    rows.push(vec![
        Run::new(plan.price.as_str(), Role::Heading),
        Run::new(plan.period.as_str(), Role::Muted),
    ]);
    rows.push(blank());
    for feature in &plan.features {
        let mut lines = wrap(feature, inner.saturating_sub(2)).into_iter();
        if let Some(first) = lines.next() {
            rows.push(vec![Run::new("✓ ", Role::Check), Run::new(first, Role::Body)]);
        }
        rows.extend(lines.map(|l| vec![Run::new("  ", Role::Body), Run::new(l, Role::Body)]));
    }
    rows.push(blank());
    let button = if plan.popular { Role::OnAccent } else { Role::Accent };
    rows.push(text(" Choose Plan ", button));
    rows
}

fn heading_row(heading: &str, highlight: Option<&str>) -> Row {
    match highlight.and_then(|h| heading.find(h).map(|at| (h, at))) {
        Some((h, at)) => {
            let mut row = Row::new();
            if at > 0 {
                row.push(Run::new(&heading[..at], Role::Heading));
            }
            row.push(Run::new(h, Role::Accent));
            let rest = &heading[at + h.len()..];
            if !rest.is_empty() {
                row.push(Run::new(rest, Role::Heading));
            }
            row
        }
        None => text(heading, Role::Heading),
    }
}

fn tab_bar(categories: &[PlanCategory], active: usize) -> Row {
    let mut row = Row::new();
    for (i, category) in categories.iter().enumerate() {
        if i > 0 {
            row.push(Run::new("  ", Role::Muted));
        }
        let role = if i == active { Role::OnAccent } else { Role::Muted };
        row.push(Run::new(format!(" {} ", category.name), role));
    }
    row
}

/// Compose `section` into rows no wider than `width`.  The pricing section
/// shows the category selected in `tabs`, or its first one.  `reveal` is the
/// time in ms since the pricing cards started revealing; `None` shows them
/// outright.
pub fn compose(
    section: &Section,
    width: usize,
    tabs: Option<&PricingTabs>,
    reveal: Option<f64>,
) -> Vec<Row> {
    let body_width = width.min(BODY_MAX_WIDTH).max(1);
    let mut rows = Vec::new();
    match &section.content {
        SectionContent::Headline { heading, body } => {
            rows.extend(headings(heading, width));
            rows.push(blank());
            rows.extend(wrap(body, body_width).into_iter().map(|l| text(l, Role::Body)));
        }
        SectionContent::Features {
            heading,
            highlight,
            cards,
        } => {
            if heading.chars().count() <= width {
                rows.push(heading_row(heading, highlight.as_deref()));
            } else {
                rows.extend(headings(heading, width));
            }
            rows.push(blank());
            let inner = grid_inner_width(cards.len(), width);
            let cards = cards
                .iter()
                .map(|c| Card::new(feature_card(c, inner), Role::Border))
                .collect();
            rows.extend(card_grid(cards, width));
        }
        SectionContent::Pricing {
            heading,
            categories,
        } => {
            rows.extend(headings(heading, width));
            rows.push(blank());
            // Live tab state carries its own copy of the categories.
            let categories = tabs.map(PricingTabs::categories).unwrap_or(categories.as_slice());
            let active = tabs.map(PricingTabs::active_index).unwrap_or(0);
            if categories.len() > 1 {
                rows.push(tab_bar(categories, active));
                rows.push(blank());
            }
            if let Some(category) = categories.get(active).or_else(|| categories.first()) {
                let inner = grid_inner_width(category.plans.len(), width);
                let cards = category
                    .plans
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let border = if p.popular { Role::Accent } else { Role::Border };
                        let mut card = Card::new(plan_card(p, inner), border);
                        card.alpha = reveal.map_or(1.0, |ms| card_reveal(i, ms));
                        card
                    })
                    .collect();
                rows.extend(card_grid(cards, width));
            }
        }
        SectionContent::CallToAction {
            heading,
            body,
            button,
        } => {
            rows.extend(headings(heading, width));
            rows.push(blank());
            rows.extend(wrap(body, body_width).into_iter().map(|l| text(l, Role::Body)));
            rows.push(blank());
            for line in wrap(button, width.saturating_sub(4)) {
                rows.push(text(format!("  {line}  "), Role::OnAccent));
            }
        }
    }
    rows.into_iter().map(|row| fit(row, width)).collect()
}

fn headings(heading: &str, width: usize) -> Vec<Row> {
    wrap(heading, width).into_iter().map(|l| text(l, Role::Heading)).collect()
}

/// Inner (text) width each card gets in [`card_grid`].
fn grid_inner_width(n: usize, width: usize) -> usize {
    let n = n.max(1);
    if n * (MIN_CARD_WIDTH + 4) + (n - 1) * GAP <= width {
        (width - (n - 1) * GAP) / n - 4
    } else {
        width.saturating_sub(4).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::default_sections;
    use rstest::rstest;

    #[rstest]
    #[case("", 10, vec![])]
    #[case("one two three", 7, vec!["one two", "three"])]
    #[case("one two three", 100, vec!["one two three"])]
    #[case("abcdefghij", 4, vec!["abcd", "efgh", "ij"])]
    #[case("a abcdefgh b", 4, vec!["a", "abcd", "efgh", "b"])]
    fn wraps_words(#[case] input: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(wrap(input, width), expected);
    }

    #[rstest]
    #[case(120)]
    #[case(80)]
    #[case(40)]
    #[case(20)]
    fn every_section_fits_its_width(#[case] width: usize) {
        for section in default_sections() {
            for row in compose(&section, width, None, None) {
                assert!(row_width(&row) <= width, "{}: {row:?}", section.title);
            }
        }
    }

    #[test]
    fn wide_features_sit_side_by_side() {
        let sections = default_sections();
        let wide = compose(&sections[1], 100, None, None);
        let narrow = compose(&sections[1], 30, None, None);
        assert!(wide.len() < narrow.len());
    }

    #[test]
    fn highlight_is_accented() {
        let row = heading_row("We Are INFINIO", Some("INFINIO"));
        assert_eq!(row, vec![
            Run::new("We Are ", Role::Heading),
            Run::new("INFINIO", Role::Accent),
        ]);
    }

    #[test]
    fn pricing_shows_active_tab() {
        let sections = default_sections();
        let pricing = &sections[2];
        let mut tabs = PricingTabs::new(pricing.pricing_categories().unwrap().to_vec()).unwrap();
        let flat = |rows: Vec<Row>| -> String {
            rows.iter().flat_map(|r| r.iter().map(|run| run.text.as_str())).collect()
        };
        let first = flat(compose(pricing, 100, Some(&tabs), None));
        assert!(first.contains("Starter"));
        tabs.next();
        let second = flat(compose(pricing, 100, Some(&tabs), None));
        assert!(second.contains("Commerce"));
        assert!(!second.contains("Starter"));
    }

    /// Alpha of each card's top-left corner, left to right.
    fn corner_alphas(rows: &[Row]) -> Vec<f64> {
        rows.iter()
            .flat_map(|r| r.iter())
            .filter(|run| run.text.starts_with('╭'))
            .map(|run| run.alpha)
            .collect()
    }

    #[test]
    fn pricing_cards_fade_in_one_after_another() {
        let sections = default_sections();
        let pricing = &sections[2];
        assert_eq!(corner_alphas(&compose(pricing, 100, None, Some(0.0))), vec![0.0; 3]);
        let partial = corner_alphas(&compose(pricing, 100, None, Some(250.0)));
        for (got, want) in partial.iter().zip([0.5, 0.3, 0.1]) {
            assert!((got - want).abs() < 1e-12);
        }
        assert_eq!(corner_alphas(&compose(pricing, 100, None, Some(2000.0))), vec![1.0; 3]);
        assert_eq!(corner_alphas(&compose(pricing, 100, None, None)), vec![1.0; 3]);
    }

    #[test]
    fn reveal_leaves_other_sections_alone() {
        let sections = default_sections();
        let about = compose(&sections[1], 100, None, Some(0.0));
        assert!(about.iter().flatten().all(|run| run.alpha == 1.0));
    }
}
