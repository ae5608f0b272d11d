use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;

use moneytrack::models::{Category, CategoryId, DateRange, Expense, Money, TimeRange};
use moneytrack::reports::{
    expenses_in_range, group_by_category, total_amount, DailyRollup, YearlyRollup,
};
use moneytrack::services::CategoryService;
use moneytrack::storage::Storage;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn categories() -> Vec<Category> {
    ["Food", "Transport", "Fun", "Rent"]
        .into_iter()
        .map(Category::new)
        .collect()
}

/// (amount in cents, day of 2024, category slot); slots past the known
/// categories point at an unknown id
fn expense_specs() -> impl Strategy<Value = Vec<(i64, i64, usize)>> {
    prop::collection::vec((1i64..100_000, 0i64..366, 0usize..6), 0..60)
}

fn build(specs: &[(i64, i64, usize)], categories: &[Category], known_only: bool) -> Vec<Expense> {
    let unknown = CategoryId::new();
    specs
        .iter()
        .map(|&(cents, day, slot)| {
            let category_id = match categories.get(slot) {
                Some(category) => category.id,
                None if known_only => categories[slot % categories.len()].id,
                None => unknown,
            };
            Expense::new(
                Money::from_cents(cents),
                "Generated",
                date(2024, 1, 1) + Duration::days(day),
                category_id,
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn disjoint_months_sum_to_year_total(specs in expense_specs()) {
        let expenses = build(&specs, &categories(), false);
        let year = DateRange::for_year(2024);

        let by_month: Money = (1..=12)
            .map(|m| DateRange::for_month(date(2024, m, 1)))
            .map(|month| total_amount(&expenses_in_range(&expenses, &month)))
            .sum();

        prop_assert_eq!(by_month, total_amount(&expenses_in_range(&expenses, &year)));
    }

    #[test]
    fn category_totals_sum_to_known_spending(specs in expense_specs()) {
        let categories = categories();
        let expenses = build(&specs, &categories, false);
        let totals = group_by_category(&expenses, &categories);

        let known: Money = expenses
            .iter()
            .filter(|e| categories.iter().any(|c| c.id == e.category_id))
            .map(|e| e.amount)
            .sum();

        prop_assert_eq!(totals.len(), categories.len());
        prop_assert_eq!(totals.iter().map(|t| t.total).sum::<Money>(), known);
        prop_assert!(totals.windows(2).all(|w| w[0].total >= w[1].total));
    }

    #[test]
    fn percentages_sum_to_hundred(specs in expense_specs()) {
        let categories = categories();
        let expenses = build(&specs, &categories, true);
        let totals = group_by_category(&expenses, &categories);
        let sum: f64 = totals.iter().map(|t| t.percentage).sum();

        if expenses.is_empty() {
            prop_assert!(totals.iter().all(|t| t.percentage == 0.0));
        } else {
            let tolerance = 0.05 * categories.len() as f64 + 1e-9;
            prop_assert!((sum - 100.0).abs() <= tolerance, "sum was {}", sum);
        }
    }

    #[test]
    fn daily_rollup_is_consistent(specs in expense_specs(), month in 1u32..=12) {
        let expenses = build(&specs, &categories(), false);
        let rollup = DailyRollup::for_month_starting(&expenses, date(2024, month, 1));
        let period = DateRange::for_month(date(2024, month, 1));

        prop_assert_eq!(rollup.days.len(), period.days().len());
        prop_assert_eq!(rollup.daily.len(), rollup.days.len());

        let mut running = Money::zero();
        for (daily, cumulative) in rollup.daily.iter().zip(&rollup.cumulative) {
            running += *daily;
            prop_assert_eq!(running, *cumulative);
        }
        prop_assert_eq!(rollup.total(), total_amount(&expenses_in_range(&expenses, &period)));
    }

    #[test]
    fn yearly_rollup_is_consistent(specs in expense_specs()) {
        let expenses = build(&specs, &categories(), false);
        let rollup = YearlyRollup::for_year(&expenses, 2024);

        prop_assert_eq!(rollup.months.len(), 12);
        prop_assert_eq!(rollup.total, total_amount(&expenses));
        for (index, total) in rollup.months.iter().enumerate() {
            let in_month: Money = expenses
                .iter()
                .filter(|e| e.date.month0() as usize == index)
                .map(|e| e.amount)
                .sum();
            prop_assert_eq!(*total, in_month);
        }
    }

    #[test]
    fn resolved_ranges_contain_now(day in 0i64..3650, hour in 0u32..24) {
        let now = (date(2020, 1, 1) + Duration::days(day)).and_hms_opt(hour, 30, 0).unwrap();
        for range in [TimeRange::Day, TimeRange::Week, TimeRange::Month, TimeRange::Year] {
            let resolved = DateRange::resolve(&range, now);
            prop_assert!(resolved.contains(now));
            prop_assert!(resolved.start() <= resolved.end());
        }
    }
}

#[test]
fn food_and_transport_example() {
    let food = Category::new("Food");
    let transport = Category::new("Transport");
    let expenses = vec![
        Expense::new(Money::from_units(50), "A", date(2024, 3, 1), food.id),
        Expense::new(Money::from_units(30), "B", date(2024, 3, 1), food.id),
        Expense::new(Money::from_units(20), "C", date(2024, 3, 15), transport.id),
    ];

    let totals = group_by_category(&expenses, &[transport.clone(), food.clone()]);
    assert_eq!(totals[0].category.id, food.id);
    assert_eq!(totals[0].percentage, 80.0);
    assert_eq!(totals[1].category.id, transport.id);
    assert_eq!(totals[1].percentage, 20.0);

    let rollup = DailyRollup::for_month(&expenses, date(2024, 3, 20), 0);
    assert_eq!(rollup.days.len(), 31);
    assert_eq!(rollup.daily[0], Money::from_units(80));
    assert_eq!(rollup.daily[14], Money::from_units(20));
    assert_eq!(rollup.cumulative[0], Money::from_units(80));
    assert_eq!(rollup.cumulative[14], Money::from_units(100));
    assert_eq!(rollup.cumulative[30], Money::from_units(100));
}

#[test]
fn category_deletion_depends_on_references() {
    let storage = Storage::in_memory();
    storage.load_all().unwrap();
    let service = CategoryService::new(&storage);

    let shopping = service.require("Shopping").unwrap();
    for description in ["Shoes", "Hat"] {
        storage
            .expenses
            .upsert(Expense::new(Money::from_units(10), description, date(2024, 3, 1), shopping.id))
            .unwrap();
    }
    assert!(service.delete(shopping.id).is_err());
    assert!(service.get(shopping.id).unwrap().is_some());

    let utilities = service.require("Utilities").unwrap();
    service.delete(utilities.id).unwrap();
    assert!(service.get(utilities.id).unwrap().is_none());
}
