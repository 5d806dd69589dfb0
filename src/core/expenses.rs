use serde::{Deserialize, Serialize};

use super::error::{FinanceError, FinanceResult, ensure_non_negative};
use super::i18n::Language;

const CUSTOM_ID_PREFIX: &str = "custom-";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FixedExpense {
    Rent,
    Utilities,
    Food,
    Transport,
    Subscriptions,
}

impl FixedExpense {
    pub const ALL: [FixedExpense; 5] = [
        FixedExpense::Rent,
        FixedExpense::Utilities,
        FixedExpense::Food,
        FixedExpense::Transport,
        FixedExpense::Subscriptions,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FixedExpense::Rent => "rent",
            FixedExpense::Utilities => "utilities",
            FixedExpense::Food => "food",
            FixedExpense::Transport => "transport",
            FixedExpense::Subscriptions => "subscriptions",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        FixedExpense::ALL.into_iter().find(|e| e.id() == id)
    }

    pub fn default_value(self) -> f64 {
        match self {
            FixedExpense::Rent => 150_000.0,
            FixedExpense::Utilities => 35_000.0,
            FixedExpense::Food => 80_000.0,
            FixedExpense::Transport => 9_500.0,
            FixedExpense::Subscriptions => 5_000.0,
        }
    }

    pub fn label(self, lang: Language) -> &'static str {
        let labels = lang.translations().expenses;
        match self {
            FixedExpense::Rent => labels.rent,
            FixedExpense::Utilities => labels.utilities,
            FixedExpense::Food => labels.food,
            FixedExpense::Transport => labels.transport,
            FixedExpense::Subscriptions => labels.subscriptions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLine {
    pub id: String,
    pub label: String,
    pub value: f64,
}

/// The student's monthly budget: five fixed rows plus any custom lines.
#[derive(Debug, Clone)]
pub struct ExpenseBook {
    lines: Vec<ExpenseLine>,
    language: Language,
    next_custom_id: u64,
}

impl ExpenseBook {
    pub fn new(language: Language) -> Self {
        let lines = FixedExpense::ALL
            .into_iter()
            .map(|e| ExpenseLine {
                id: e.id().to_string(),
                label: e.label(language).to_string(),
                value: e.default_value(),
            })
            .collect();
        Self {
            lines,
            language,
            next_custom_id: 1,
        }
    }

    /// Rebuilds a book from lines sent back by a client. Fixed rows are
    /// relabelled for `language`; custom ids keep counting from the highest
    /// one seen.
    pub fn from_lines(lines: Vec<ExpenseLine>, language: Language) -> FinanceResult<Self> {
        let mut next_custom_id = 1;
        for line in &lines {
            ensure_non_negative("expenses.value", line.value)?;
            if let Some(n) = line
                .id
                .strip_prefix(CUSTOM_ID_PREFIX)
                .and_then(|n| n.parse::<u64>().ok())
            {
                let next = n
                    .checked_add(1)
                    .ok_or_else(|| FinanceError::invalid("expenses.id", "a smaller custom number"))?;
                next_custom_id = next_custom_id.max(next);
            }
        }
        let mut book = Self {
            lines,
            language,
            next_custom_id,
        };
        book.relabel(language);
        Ok(book)
    }

    pub fn lines(&self) -> &[ExpenseLine] {
        &self.lines
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn add(&mut self, name: &str, value: f64) -> FinanceResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinanceError::EmptyExpenseName);
        }
        let value = ensure_non_negative("expenseValue", value)?;
        let id = format!("{CUSTOM_ID_PREFIX}{}", self.next_custom_id);
        self.next_custom_id += 1;
        self.lines.push(ExpenseLine {
            id: id.clone(),
            label: name.to_string(),
            value,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: &str) -> FinanceResult<ExpenseLine> {
        let idx = self
            .lines
            .iter()
            .position(|line| line.id == id)
            .ok_or_else(|| FinanceError::UnknownExpense(id.to_string()))?;
        Ok(self.lines.remove(idx))
    }

    pub fn update(&mut self, id: &str, value: f64) -> FinanceResult<()> {
        let value = ensure_non_negative("expenseValue", value)?;
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or_else(|| FinanceError::UnknownExpense(id.to_string()))?;
        line.value = value;
        Ok(())
    }

    /// Only the fixed rows follow the language; values never change.
    pub fn relabel(&mut self, language: Language) {
        self.language = language;
        for line in &mut self.lines {
            if let Some(fixed) = FixedExpense::from_id(&line.id) {
                line.label = fixed.label(language).to_string();
            }
        }
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(|line| line.value).sum()
    }

    pub fn remaining(&self, net: f64) -> f64 {
        net - self.total()
    }

    /// Monthly savings the investment tab starts from; `None` leaves the
    /// previous figure in place.
    pub fn suggested_monthly_savings(&self, net: f64) -> Option<f64> {
        let remaining = self.remaining(net);
        (remaining > 0.0).then_some(remaining)
    }
}

impl Default for ExpenseBook {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn new_book_has_five_fixed_rows_and_default_total() {
        let book = ExpenseBook::new(Language::Hu);
        assert_eq!(book.lines().len(), 5);
        assert!((book.total() - 279_500.0).abs() < 1e-9);
        assert_eq!(book.lines()[0].label, "Albérlet");
    }

    #[test]
    fn adding_and_removing_a_line_updates_the_total() {
        let mut book = ExpenseBook::new(Language::En);
        let id = book.add("Gym", 12_000.0).expect("valid line");
        assert!((book.total() - 291_500.0).abs() < 1e-9);

        let removed = book.remove(&id).expect("line exists");
        assert_eq!(removed.label, "Gym");
        assert!((book.total() - 279_500.0).abs() < 1e-9);
    }

    #[test]
    fn add_requires_a_name() {
        let mut book = ExpenseBook::default();
        assert_eq!(book.add("   ", 100.0), Err(FinanceError::EmptyExpenseName));
    }

    #[test]
    fn custom_ids_are_unique_even_after_removal() {
        let mut book = ExpenseBook::default();
        let first = book.add("A", 1.0).expect("valid");
        book.remove(&first).expect("exists");
        let second = book.add("B", 1.0).expect("valid");
        assert_ne!(first, second);
    }

    #[test]
    fn update_changes_value_and_rejects_unknown_id() {
        let mut book = ExpenseBook::default();
        book.update("food", 60_000.0).expect("fixed row exists");
        assert!((book.total() - 259_500.0).abs() < 1e-9);
        assert!(matches!(
            book.update("nope", 1.0),
            Err(FinanceError::UnknownExpense(_))
        ));
    }

    #[test]
    fn relabel_changes_fixed_labels_but_keeps_values_and_custom_rows() {
        let mut book = ExpenseBook::new(Language::Hu);
        book.update("rent", 200_000.0).expect("exists");
        book.add("Edzőterem", 12_000.0).expect("valid");

        book.relabel(Language::De);

        assert_eq!(book.language(), Language::De);
        assert_eq!(book.lines()[0].label, "Miete");
        assert!((book.lines()[0].value - 200_000.0).abs() < 1e-9);
        assert_eq!(book.lines()[5].label, "Edzőterem");
    }

    #[test]
    fn from_lines_continues_custom_numbering() {
        let lines = vec![ExpenseLine {
            id: "custom-7".to_string(),
            label: "Bérlet".to_string(),
            value: 9_500.0,
        }];
        let mut book = ExpenseBook::from_lines(lines, Language::Hu).expect("valid lines");
        let id = book.add("Kávé", 3_000.0).expect("valid");
        assert_eq!(id, "custom-8");
    }

    #[test]
    fn from_lines_rejects_exhausted_custom_numbering() {
        let lines = vec![ExpenseLine {
            id: format!("custom-{}", u64::MAX),
            label: "Utolsó".to_string(),
            value: 1.0,
        }];
        assert!(matches!(
            ExpenseBook::from_lines(lines, Language::Hu),
            Err(FinanceError::InvalidInput { field: "expenses.id", .. })
        ));
    }

    #[test]
    fn from_lines_rejects_negative_values() {
        let lines = vec![ExpenseLine {
            id: "rent".to_string(),
            label: "Rent".to_string(),
            value: -150_000.0,
        }];
        assert!(ExpenseBook::from_lines(lines, Language::En).is_err());
    }

    #[test]
    fn suggested_savings_only_when_money_remains() {
        let book = ExpenseBook::default();
        assert_eq!(book.suggested_monthly_savings(266_000.0), None);
        let saved = book.suggested_monthly_savings(300_000.0).expect("positive");
        assert!((saved - 20_500.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_added_values(values in proptest::collection::vec(0u32..1_000_000, 0..12)) {
            let mut book = ExpenseBook::default();
            let base = book.total();
            for (i, v) in values.iter().enumerate() {
                book.add(&format!("line {i}"), *v as f64).expect("valid");
            }
            let expected = base + values.iter().map(|v| *v as f64).sum::<f64>();
            prop_assert!((book.total() - expected).abs() < 1e-6);
        }
    }
}
