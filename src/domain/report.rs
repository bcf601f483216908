use std::collections::HashMap;

use super::order::ReportRow;
use super::pricing::round2;

/// Label for rows whose order date is missing or unreadable.
pub const INVALID_MONTH: &str = "Invalid Date";

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTotal {
    pub size: String,
    pub total_weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

/// Sum values per key, keeping keys in the order they were first seen.
fn group_sum<I>(pairs: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, f64)> = Vec::new();
    for (key, value) in pairs {
        match index.get(&key) {
            Some(&i) => groups[i].1 += value,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, value));
            }
        }
    }
    groups
}

/// Total weight per size, heaviest first. Ties keep first-seen order.
pub fn top_materials(rows: &[ReportRow]) -> Vec<MaterialTotal> {
    let mut groups = group_sum(rows.iter().map(|r| (r.size.clone(), r.total_weight)));
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    groups
        .into_iter()
        .map(|(size, total)| MaterialTotal {
            size,
            total_weight: round2(total),
        })
        .collect()
}

/// Total sales value per calendar month, labelled like `Oct 2025`.
pub fn monthly_sales(rows: &[ReportRow]) -> Vec<MonthlyTotal> {
    let labelled = rows.iter().map(|r| {
        let month = r
            .date
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| INVALID_MONTH.to_string());
        (month, r.total_price)
    });
    group_sum(labelled)
        .into_iter()
        .map(|(month, total)| MonthlyTotal {
            month,
            total: round2(total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn row(size: &str, date: Option<(i32, u32, u32)>, weight: f64, price: f64) -> ReportRow {
        ReportRow {
            size: size.to_string(),
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            total_weight: weight,
            total_price: price,
        }
    }

    #[test]
    fn top_materials_sums_and_sorts_descending() {
        let rows = vec![
            row("40x40x2", None, 10.0, 0.0),
            row("400x400x12mm", None, 4444.44, 0.0),
            row("40x40x2", None, 15.5, 0.0),
        ];

        let top = top_materials(&rows);

        assert_eq!(
            top,
            vec![
                MaterialTotal {
                    size: "400x400x12mm".to_string(),
                    total_weight: 4444.44
                },
                MaterialTotal {
                    size: "40x40x2".to_string(),
                    total_weight: 25.5
                },
            ]
        );
    }

    #[test]
    fn top_materials_ties_keep_first_seen_order() {
        let rows = vec![
            row("b", None, 5.0, 0.0),
            row("a", None, 5.0, 0.0),
            row("c", None, 9.0, 0.0),
        ];

        let sizes: Vec<String> = top_materials(&rows).into_iter().map(|m| m.size).collect();

        assert_eq!(sizes, vec!["c", "b", "a"]);
    }

    #[test]
    fn monthly_sales_groups_by_month_label() {
        let rows = vec![
            row("x", Some((2025, 10, 3)), 0.0, 1180.0),
            row("x", Some((2025, 9, 30)), 0.0, 100.0),
            row("x", Some((2025, 10, 28)), 0.0, 20.5),
        ];

        let months = monthly_sales(&rows);

        assert_eq!(
            months,
            vec![
                MonthlyTotal {
                    month: "Oct 2025".to_string(),
                    total: 1200.5
                },
                MonthlyTotal {
                    month: "Sep 2025".to_string(),
                    total: 100.0
                },
            ]
        );
    }

    #[test]
    fn monthly_sales_buckets_undated_rows() {
        let rows = vec![row("x", None, 0.0, 10.0), row("x", None, 0.0, 0.1)];

        let months = monthly_sales(&rows);

        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, INVALID_MONTH);
        assert_eq!(months[0].total, 10.1);
    }

    #[test]
    fn empty_input_gives_empty_reports() {
        assert!(top_materials(&[]).is_empty());
        assert!(monthly_sales(&[]).is_empty());
    }
}
