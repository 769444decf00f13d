//! Category Summary
//!
//! Turns per-category totals into proportional shares for the pie chart
//! and the terminal breakdown.

use std::collections::BTreeMap;

use crate::display::report::{format_bar, separator};

/// One category's share of total spending
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    /// Category name
    pub category: String,
    /// Summed amount
    pub amount: f64,
    /// Fraction of the grand total, in `0.0..=1.0`
    pub share: f64,
}

impl CategorySlice {
    /// Share as a percentage
    pub fn percentage(&self) -> f64 {
        self.share * 100.0
    }

    /// Percentage label with one decimal place, e.g. `"99.6%"`
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage())
    }
}

/// Spending broken down by category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    /// One slice per category, in category order
    pub slices: Vec<CategorySlice>,
    /// Sum of all slice amounts
    pub total: f64,
}

impl CategorySummary {
    /// Build the summary from category totals
    ///
    /// Totals that are not strictly positive and finite are left out, so
    /// the remaining shares always add up to one.
    pub fn from_totals(totals: &BTreeMap<String, f64>) -> Self {
        let kept: Vec<(&String, f64)> = totals
            .iter()
            .filter(|(_, amount)| amount.is_finite() && **amount > 0.0)
            .map(|(category, amount)| (category, *amount))
            .collect();

        let total: f64 = kept.iter().map(|(_, amount)| amount).sum();

        let slices = kept
            .into_iter()
            .map(|(category, amount)| CategorySlice {
                category: category.clone(),
                amount,
                share: amount / total,
            })
            .collect();

        Self { slices, total }
    }

    /// Whether there is nothing to visualize
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Slices sorted by amount, largest first
    pub fn largest_first(&self) -> Vec<&CategorySlice> {
        let mut sorted: Vec<_> = self.slices.iter().collect();
        sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        sorted
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Expense Distribution by Category\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!(
            "{:<18} {:>12} {:>7}  {}\n",
            "Category", "Amount", "%", "Share"
        ));
        output.push_str(&separator(60));
        output.push('\n');

        for slice in self.largest_first() {
            output.push_str(&format!(
                "{:<18} {:>12} {:>7}  {}\n",
                slice.category,
                format!("{}{:.2}", currency_symbol, slice.amount),
                slice.percentage_label(),
                format_bar(slice.share, 1.0, 20)
            ));
        }

        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>12}\n",
            "TOTAL",
            format!("{}{:.2}", currency_symbol, self.total)
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(c, a)| (c.to_string(), *a)).collect()
    }

    #[test]
    fn test_shares() {
        let summary = CategorySummary::from_totals(&totals(&[("Housing", 1200.0), ("Food", 4.5)]));

        assert_eq!(summary.slices.len(), 2);
        assert!((summary.total - 1204.5).abs() < 1e-9);

        let food = &summary.slices[0];
        assert_eq!(food.category, "Food");
        assert_eq!(food.percentage_label(), "0.4%");

        let housing = &summary.slices[1];
        assert_eq!(housing.category, "Housing");
        assert_eq!(housing.percentage_label(), "99.6%");

        let share_sum: f64 = summary.slices.iter().map(|s| s.share).sum();
        assert!((share_sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_category_is_whole() {
        let summary = CategorySummary::from_totals(&totals(&[("Food", 12.0)]));
        assert_eq!(summary.slices[0].percentage_label(), "100.0%");
    }

    #[test]
    fn test_non_positive_totals_are_dropped() {
        let summary = CategorySummary::from_totals(&totals(&[
            ("Food", 30.0),
            ("Refunds", -10.0),
            ("Zero", 0.0),
            ("Bills", 10.0),
        ]));

        let names: Vec<_> = summary.slices.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Bills", "Food"]);
        assert_eq!(summary.slices[1].percentage_label(), "75.0%");
    }

    #[test]
    fn test_empty() {
        let summary = CategorySummary::from_totals(&BTreeMap::new());
        assert!(summary.is_empty());
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn test_largest_first() {
        let summary = CategorySummary::from_totals(&totals(&[
            ("A", 1.0),
            ("B", 3.0),
            ("C", 2.0),
        ]));
        let order: Vec<_> = summary
            .largest_first()
            .into_iter()
            .map(|s| s.category.as_str())
            .collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_format_terminal() {
        let summary = CategorySummary::from_totals(&totals(&[("Housing", 1200.0), ("Food", 4.5)]));
        let output = summary.format_terminal("$");

        assert!(output.contains("Expense Distribution by Category"));
        assert!(output.contains("$1200.00"));
        assert!(output.contains("99.6%"));
        assert!(output.contains("0.4%"));
        assert!(output.contains("$1204.50"));

        // Largest category is listed first
        let housing = output.find("Housing").unwrap();
        let food = output.find("Food").unwrap();
        assert!(housing < food);
    }
}
