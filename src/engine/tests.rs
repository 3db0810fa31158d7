use super::{
    aggregate_by_category, aggregate_by_month, build_report, categories_present, fill_month_gaps,
    filter_transactions, running_balance, summarize, CategoryFilter, FilterError, ReportQuery, TimeWindow,
    TypeRestriction,
};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionType};
use crate::types::parse_amount;

fn create_transaction(id: &str, transaction_type: TransactionType, category: &str, amount: &str, date: Option<&str>) -> Result<Transaction> {
    let date = match date {
        Some(date) => Some(
            NaiveDate::from_str(date)?
                .and_hms_opt(12, 0, 0)
                .ok_or_else(|| anyhow!("invalid test date"))?
        ),
        None => None
    };

    Ok(Transaction {
        id: id.to_string(),
        transaction_type,
        category: category.to_string(),
        amount: parse_amount(amount)?,
        description: None,
        date,
        owner_id: Some("owner-1".to_string()),
        owner_email: None,
        owner_name: None
    })
}

fn scenario() -> Result<Vec<Transaction>> {
    Ok(vec![
        create_transaction("1", TransactionType::Income, "Salary", "1000", Some("2024-01-05"))?,
        create_transaction("2", TransactionType::Expense, "Food", "200", Some("2024-01-10"))?,
        create_transaction("3", TransactionType::Expense, "Food", "50", Some("2024-02-01"))?,
    ])
}

fn mixed_history() -> Result<Vec<Transaction>> {
    Ok(vec![
        create_transaction("1", TransactionType::Expense, "Transport", "12.30", Some("2023-11-20"))?,
        create_transaction("2", TransactionType::Income, "Salary", "2500", Some("2024-03-01"))?,
        create_transaction("3", TransactionType::Expense, "Food", "40.10", Some("2024-01-15"))?,
        create_transaction("4", TransactionType::Expense, "Shopping", "99.99", None)?,
        create_transaction("5", TransactionType::Income, "Other", "150", Some("2023-12-24"))?,
        create_transaction("6", TransactionType::Expense, "Food", "8.75", Some("2024-03-10"))?,
        create_transaction("7", TransactionType::Expense, "food", "3", Some("2024-03-11"))?,
    ])
}

fn today() -> Result<NaiveDate> {
    Ok(NaiveDate::from_str("2024-03-15")?)
}

fn decimal(value: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(value)?)
}

fn ids(transactions: &[&Transaction]) -> Vec<String> {
    transactions.iter().map(|transaction| transaction.id.clone()).collect()
}

#[test]
fn test_summary_of_scenario_matches_expected_totals() -> Result<()> {
    let summary = summarize(&scenario()?);

    assert_eq!(summary.total_income, decimal("1000")?);
    assert_eq!(summary.total_expense, decimal("250")?);
    assert_eq!(summary.balance, decimal("750")?);

    Ok(())
}

#[test]
fn test_expense_category_breakdown_of_scenario() -> Result<()> {
    let transactions = scenario()?;
    let expenses = transactions.iter().filter(|transaction| transaction.transaction_type == TransactionType::Expense);
    let totals = aggregate_by_category(expenses, TypeRestriction::OnlyExpense);

    assert_eq!(totals.len(), 1);

    let food = totals.get("Food").ok_or_else(|| anyhow!("Food missing from totals"))?;

    assert_eq!(food.total, decimal("250")?);
    assert_eq!(food.count, 2);
    assert!(totals.get("Salary").is_none());

    Ok(())
}

#[test]
fn test_monthly_series_of_scenario() -> Result<()> {
    let series = aggregate_by_month(&scenario()?);

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].month.to_string(), "2024-01");
    assert_eq!(series[0].income_total, decimal("1000")?);
    assert_eq!(series[0].expense_total, decimal("200")?);
    assert_eq!(series[1].month.to_string(), "2024-02");
    assert!(series[1].income_total.is_zero());
    assert_eq!(series[1].expense_total, decimal("50")?);

    Ok(())
}

#[test]
fn test_empty_input_yields_zero_and_empty_results() -> Result<()> {
    let transactions: Vec<Transaction> = Vec::new();

    let summary = summarize(&transactions);

    assert!(summary.total_income.is_zero());
    assert!(summary.total_expense.is_zero());
    assert!(summary.balance.is_zero());
    assert!(aggregate_by_category(&transactions, TypeRestriction::Any).is_empty());
    assert!(aggregate_by_category(&transactions, TypeRestriction::OnlyExpense).is_empty());
    assert!(aggregate_by_month(&transactions).is_empty());
    assert!(filter_transactions(&transactions, &TimeWindow::last_months(3)?, &CategoryFilter::All, today()?).is_empty());
    assert!(fill_month_gaps(&[]).is_empty());
    assert!(running_balance(&[]).is_empty());

    Ok(())
}

#[test]
fn test_last_month_window_excludes_january_relative_to_mid_march() -> Result<()> {
    let mut transactions = scenario()?;
    transactions.push(create_transaction("4", TransactionType::Expense, "Food", "5", Some("2024-01-31"))?);
    transactions.push(create_transaction("5", TransactionType::Income, "Salary", "900", Some("2024-03-14"))?);

    let window = TimeWindow::last_months(1)?;
    let filtered = filter_transactions(&transactions, &window, &CategoryFilter::All, today()?);

    assert_eq!(ids(&filtered), vec!["3", "5"]);

    Ok(())
}

#[test]
fn test_window_cutoff_is_the_first_of_the_month_n_months_back() -> Result<()> {
    let today = today()?;
    let cutoff = |months| -> Result<String> {
        TimeWindow::last_months(months)?
            .cutoff(today)
            .map(|cutoff| cutoff.to_string())
            .ok_or_else(|| anyhow!("no cutoff"))
    };

    assert_eq!(cutoff(1)?, "2024-02-01 00:00:00");
    assert_eq!(cutoff(3)?, "2023-12-01 00:00:00");
    assert_eq!(cutoff(6)?, "2023-09-01 00:00:00");
    assert_eq!(cutoff(12)?, "2023-03-01 00:00:00");
    assert_eq!(TimeWindow::All.cutoff(today), None);

    Ok(())
}

#[test]
fn test_unsupported_window_lengths_are_rejected() {
    assert_eq!(TimeWindow::last_months(2), Err(FilterError::UnsupportedWindow(2)));
    assert_eq!(TimeWindow::last_months(0), Err(FilterError::UnsupportedWindow(0)));
    assert_eq!(TimeWindow::from_str("all"), Ok(TimeWindow::All));
    assert_eq!(TimeWindow::from_str("6"), Ok(TimeWindow::LastMonths(6)));
    assert!(matches!(TimeWindow::from_str("soon"), Err(FilterError::InvalidWindow(_))));
}

#[test]
fn test_all_filters_return_the_input_unchanged() -> Result<()> {
    let transactions = mixed_history()?;
    let filtered = filter_transactions(&transactions, &TimeWindow::All, &CategoryFilter::All, today()?);
    let expected: Vec<&Transaction> = transactions.iter().collect();

    assert_eq!(filtered, expected);

    Ok(())
}

#[test]
fn test_filtered_output_is_always_an_ordered_subsequence() -> Result<()> {
    let transactions = mixed_history()?;
    let windows = [TimeWindow::All, TimeWindow::LastMonths(1), TimeWindow::LastMonths(3), TimeWindow::LastMonths(6), TimeWindow::LastMonths(12)];
    let categories = [CategoryFilter::All, CategoryFilter::Exact("Food".to_string()), CategoryFilter::Exact("Rent".to_string())];

    for window in &windows {
        for category in &categories {
            let filtered = filter_transactions(&transactions, window, category, today()?);
            let mut remaining = transactions.iter();

            for kept in &filtered {
                assert!(remaining.any(|transaction| std::ptr::eq(transaction, *kept)), "{window:?} / {category:?} reordered output");
            }
        }
    }

    Ok(())
}

#[test]
fn test_category_filter_is_an_exact_case_sensitive_match() -> Result<()> {
    let transactions = mixed_history()?;
    let food = CategoryFilter::Exact("Food".to_string());
    let filtered = filter_transactions(&transactions, &TimeWindow::All, &food, today()?);

    assert_eq!(ids(&filtered), vec!["3", "6"]);
    assert_eq!(CategoryFilter::from_str("all"), Ok(CategoryFilter::All));
    assert_eq!(CategoryFilter::from_str("All"), Ok(CategoryFilter::Exact("All".to_string())));

    Ok(())
}

#[test]
fn test_predicates_combine_with_logical_and() -> Result<()> {
    let transactions = mixed_history()?;
    let food = CategoryFilter::Exact("Food".to_string());
    let filtered = filter_transactions(&transactions, &TimeWindow::last_months(1)?, &food, today()?);

    assert_eq!(ids(&filtered), vec!["6"]);

    Ok(())
}

#[test]
fn test_undated_transactions_only_fail_windowed_filters() -> Result<()> {
    let transactions = mixed_history()?;

    let all_time = filter_transactions(&transactions, &TimeWindow::All, &CategoryFilter::All, today()?);
    let last_year = filter_transactions(&transactions, &TimeWindow::last_months(12)?, &CategoryFilter::All, today()?);

    assert!(ids(&all_time).contains(&"4".to_string()));
    assert!(!ids(&last_year).contains(&"4".to_string()));

    Ok(())
}

#[test]
fn test_category_totals_keep_first_encounter_order() -> Result<()> {
    let totals = aggregate_by_category(&mixed_history()?, TypeRestriction::Any);
    let order: Vec<&str> = totals.iter().map(|(category, _)| category).collect();

    assert_eq!(order, vec!["Transport", "Salary", "Food", "Shopping", "Other", "food"]);

    Ok(())
}

#[test]
fn test_type_restriction_limits_the_breakdown() -> Result<()> {
    let transactions = mixed_history()?;

    let income = aggregate_by_category(&transactions, TypeRestriction::OnlyIncome);
    let expense = aggregate_by_category(&transactions, TypeRestriction::OnlyExpense);
    let any = aggregate_by_category(&transactions, TypeRestriction::Any);

    assert_eq!(income.len(), 2);
    assert_eq!(income.grand_total(), decimal("2650")?);
    assert_eq!(expense.len(), 4);
    assert_eq!(expense.grand_total(), decimal("164.14")?);
    assert_eq!(any.grand_total(), income.grand_total() + expense.grand_total());

    let food = expense.get("Food").ok_or_else(|| anyhow!("Food missing"))?;

    assert_eq!(food.total, decimal("48.85")?);
    assert_eq!(food.count, 2);

    Ok(())
}

#[test]
fn test_type_restriction_parses_from_text() {
    assert_eq!(TypeRestriction::from_str("expense"), Ok(TypeRestriction::OnlyExpense));
    assert_eq!(TypeRestriction::from_str("Income"), Ok(TypeRestriction::OnlyIncome));
    assert_eq!(TypeRestriction::from_str("any"), Ok(TypeRestriction::Any));
    assert!(TypeRestriction::from_str("transfers").is_err());
}

#[test]
fn test_ranked_categories_order_by_total_then_count_then_name() -> Result<()> {
    let transactions = vec![
        create_transaction("1", TransactionType::Expense, "Food", "10", Some("2024-01-01"))?,
        create_transaction("2", TransactionType::Expense, "Transport", "30", Some("2024-01-02"))?,
        create_transaction("3", TransactionType::Expense, "Shopping", "5", Some("2024-01-03"))?,
        create_transaction("4", TransactionType::Expense, "Shopping", "5", Some("2024-01-04"))?,
        create_transaction("5", TransactionType::Expense, "Books", "10", Some("2024-01-05"))?,
    ];

    let totals = aggregate_by_category(&transactions, TypeRestriction::OnlyExpense);
    let ranked: Vec<&str> = totals.ranked().into_iter().map(|(category, _)| category).collect();

    assert_eq!(ranked, vec!["Transport", "Shopping", "Books", "Food"]);

    Ok(())
}

#[test]
fn test_repeated_aggregation_is_deterministic() -> Result<()> {
    let transactions = mixed_history()?;
    let window = TimeWindow::last_months(6)?;

    let first = aggregate_by_category(filter_transactions(&transactions, &window, &CategoryFilter::All, today()?), TypeRestriction::Any);
    let second = aggregate_by_category(filter_transactions(&transactions, &window, &CategoryFilter::All, today()?), TypeRestriction::Any);

    assert_eq!(first, second);
    assert_eq!(first.iter().collect::<Vec<_>>(), second.iter().collect::<Vec<_>>());

    Ok(())
}

#[test]
fn test_balance_always_equals_income_minus_expense() -> Result<()> {
    let transactions = mixed_history()?;

    for end in 0..=transactions.len() {
        let summary = summarize(&transactions[..end]);

        assert_eq!(summary.balance, summary.total_income - summary.total_expense);
    }

    Ok(())
}

#[test]
fn test_monthly_keys_are_strictly_increasing() -> Result<()> {
    let series = aggregate_by_month(&mixed_history()?);
    let months: Vec<String> = series.iter().map(|totals| totals.month.to_string()).collect();

    assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-03"]);
    assert!(series.windows(2).all(|pair| pair[0].month < pair[1].month));

    Ok(())
}

#[test]
fn test_monthly_series_skips_undated_transactions() -> Result<()> {
    let series = aggregate_by_month(&mixed_history()?);
    let expense: Decimal = series.iter().map(|totals| totals.expense_total).sum();

    assert_eq!(expense, decimal("64.15")?);

    Ok(())
}

#[test]
fn test_zero_amount_records_do_not_disturb_aggregates() -> Result<()> {
    let mut transactions = scenario()?;
    transactions.push(create_transaction("4", TransactionType::Expense, "Food", "0", Some("2024-02-03"))?);

    let summary = summarize(&transactions);
    let food = aggregate_by_category(&transactions, TypeRestriction::OnlyExpense);

    assert_eq!(summary.balance, decimal("750")?);
    assert_eq!(food.get("Food").map(|total| total.count), Some(3));
    assert_eq!(food.get("Food").map(|total| total.total), Some(decimal("250")?));

    Ok(())
}

#[test]
fn test_gap_filling_produces_a_continuous_axis() -> Result<()> {
    let series = aggregate_by_month(&mixed_history()?);
    let filled = fill_month_gaps(&series);
    let months: Vec<String> = filled.iter().map(|totals| totals.month.to_string()).collect();

    assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-02", "2024-03"]);
    assert!(filled[3].income_total.is_zero());
    assert!(filled[3].expense_total.is_zero());
    assert_eq!(filled[4], series[3]);

    Ok(())
}

#[test]
fn test_running_balance_accumulates_monthly_net() -> Result<()> {
    let series = aggregate_by_month(&scenario()?);
    let points = running_balance(&series);

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].net, decimal("800")?);
    assert_eq!(points[0].balance, decimal("800")?);
    assert_eq!(points[1].net, decimal("-50")?);
    assert_eq!(points[1].balance, decimal("750")?);

    Ok(())
}

#[test]
fn test_categories_present_lists_distinct_labels_in_first_seen_order() -> Result<()> {
    let categories = categories_present(&mixed_history()?);

    assert_eq!(categories, vec!["Transport", "Salary", "Food", "Shopping", "Other", "food"]);

    Ok(())
}

#[test]
fn test_report_combines_all_views_over_the_filtered_set() -> Result<()> {
    let transactions = mixed_history()?;
    let query = ReportQuery {
        time_window: TimeWindow::last_months(3)?,
        ..ReportQuery::default()
    };

    let report = build_report(&transactions, &query, today()?);

    assert_eq!(report.matched, 5);
    assert_eq!(report.summary.total_income, decimal("2650")?);
    assert_eq!(report.summary.total_expense, decimal("51.85")?);
    assert_eq!(report.categories.len(), 2);
    assert!(report.categories.get("Salary").is_none());
    assert_eq!(report.monthly.len(), 3);
    assert_eq!(report.running_balance.last().map(|point| point.balance), Some(report.summary.balance));
    assert_eq!(report.available_categories.len(), 6);

    Ok(())
}

#[test]
fn test_report_fills_gaps_when_asked() -> Result<()> {
    let transactions = mixed_history()?;
    let query = ReportQuery {
        fill_gaps: true,
        type_restriction: TypeRestriction::Any,
        ..ReportQuery::default()
    };

    let report = build_report(&transactions, &query, today()?);

    assert_eq!(report.matched, transactions.len());
    assert_eq!(report.monthly.len(), 5);
    assert_eq!(report.running_balance.len(), 5);
    assert_eq!(report.categories.len(), 6);

    Ok(())
}

#[test]
fn test_report_serializes_amounts_and_months_as_strings() -> Result<()> {
    let report = build_report(&scenario()?, &ReportQuery::default(), today()?);
    let json = serde_json::to_value(&report)?;

    assert_eq!(json["summary"]["balance"], "750");
    assert_eq!(json["monthly"][0]["month"], "2024-01");
    assert_eq!(json["monthly"][1]["expenseTotal"], "50");
    assert_eq!(json["categories"][0]["category"], "Food");
    assert_eq!(json["categories"][0]["count"], 2);

    Ok(())
}
