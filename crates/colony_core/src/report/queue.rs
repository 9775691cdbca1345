use serde::Serialize;

use crate::bill::{Bill, RepeatMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueRow {
    pub name: String,
    pub count: i32,
}

/// Active production orders split by repeat mode, each list sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueReport {
    pub target: Vec<QueueRow>,
    pub repeat: Vec<QueueRow>,
    pub forever: Vec<QueueRow>,
}

pub fn build_queue(bills: &[Bill]) -> QueueReport {
    let mut active: Vec<&Bill> = bills.iter().filter(|bill| bill.is_active()).collect();
    active.sort();

    let mut report = QueueReport::default();
    for bill in active {
        let row = QueueRow {
            name: bill.display_name(),
            count: bill.count,
        };
        match bill.repeat_mode {
            RepeatMode::TargetCount => report.target.push(row),
            RepeatMode::RepeatCount => report.repeat.push(row),
            RepeatMode::Forever => report.forever.push(row),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::FOREVER_COUNT;

    fn bill(recipe_id: &str, repeat_mode: RepeatMode, count: i32, suspended: bool) -> Bill {
        Bill {
            recipe_id: recipe_id.to_string(),
            repeat_mode,
            count,
            materials: Vec::new(),
            suspended,
        }
    }

    #[test]
    fn bills_split_by_mode_and_sorted() {
        let bills = vec![
            bill("MealSimple_CookMealSimple", RepeatMode::RepeatCount, 4, false),
            bill("MealFine_CookMealFine", RepeatMode::RepeatCount, 5, false),
            bill("Make_ComponentIndustrial", RepeatMode::TargetCount, 10, false),
            bill("ButcherCorpseFlesh", RepeatMode::Forever, FOREVER_COUNT, false),
        ];
        let report = build_queue(&bills);

        let names: Vec<_> = report.repeat.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Fine Meal", "Simple Meal"]);
        assert_eq!(report.repeat[0].count, 5);
        assert_eq!(report.target[0].name, "Component");
        assert_eq!(report.forever[0].count, FOREVER_COUNT);
    }

    #[test]
    fn suspended_and_zero_count_bills_never_appear() {
        let bills = vec![
            bill("CookMealSimple", RepeatMode::Forever, FOREVER_COUNT, true),
            bill("CookMealFine", RepeatMode::RepeatCount, 0, false),
            bill("Make_ComponentIndustrial", RepeatMode::TargetCount, 0, false),
        ];
        assert_eq!(build_queue(&bills), QueueReport::default());
    }
}
