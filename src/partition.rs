//! Splitting transactions into income and expenses.

use crate::Transaction;

/// Transactions split by direction. Each keeps the relative input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Transactions where money was earned.
    pub income: Vec<Transaction>,
    /// Transactions where money was spent.
    pub expense: Vec<Transaction>,
}

/// Split `transactions` into income and expenses in a single pass.
///
/// The direction comes from [Transaction::is_income] only, the amount is
/// never inspected.
pub fn partition(transactions: &[Transaction]) -> Partition {
    let (income, expense): (Vec<Transaction>, Vec<Transaction>) = transactions
        .iter()
        .cloned()
        .partition(|transaction| transaction.is_income());

    Partition { income, expense }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{expense, income};

    use super::partition;

    #[test]
    fn splits_by_direction_and_keeps_order() {
        let transactions = vec![
            expense("Rent", "500"),
            income("Salary", "1000"),
            expense("Food", "20"),
            income("Gift", "50"),
        ];

        let result = partition(&transactions);

        assert_eq!(result.income, vec![transactions[1].clone(), transactions[3].clone()]);
        assert_eq!(result.expense, vec![transactions[0].clone(), transactions[2].clone()]);
    }

    #[test]
    fn every_transaction_lands_in_exactly_one_side() {
        let transactions = vec![
            expense("Rent", "500"),
            income("Salary", "1000"),
            expense("Broken", "not a number"),
            income("Refund", "-5"),
        ];

        let result = partition(&transactions);

        assert_eq!(result.income.len() + result.expense.len(), transactions.len());
        for transaction in &transactions {
            let in_income = result.income.contains(transaction);
            let in_expense = result.expense.contains(transaction);
            assert!(in_income != in_expense, "{transaction:?} must be in one side only");
        }
    }

    #[test]
    fn negative_income_amount_is_still_income() {
        let transactions = vec![income("Refund", "-5")];

        let result = partition(&transactions);

        assert_eq!(result.income.len(), 1);
        assert!(result.expense.is_empty());
    }

    #[test]
    fn empty_input_gives_empty_sides() {
        let result = partition(&[]);

        assert!(result.income.is_empty());
        assert!(result.expense.is_empty());
    }
}
