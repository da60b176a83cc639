use chrono::{TimeZone, Utc};
use link_ledger::registry::{CategorySpec, Item, Registry};
use link_ledger::selection::{collect_candidates, ReportEngine};
use link_ledger::types::{CategoryKey, ReportStatus, Timestamp};
use proptest::prelude::*;

// (points, is_news, item timestamps in seconds)
type CategoryPlan = (u32, bool, Vec<i64>);

fn build(plan: &[CategoryPlan]) -> Registry {
    let mut registry = Registry::new();
    for (c, (points, is_news, stamps)) in plan.iter().enumerate() {
        let key = CategoryKey::new(format!("cat-{c}"));
        let spec = CategorySpec::new(i64::from(*points), "", *is_news).unwrap();
        registry.create_category(key.clone(), spec).unwrap();
        for (i, secs) in stamps.iter().enumerate() {
            let at = Timestamp::from_datetime(Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap());
            registry.push_item(&key, Item::new(format!("cat-{c}/{i}"), at)).unwrap();
        }
    }
    registry
}

fn combos(n: usize, r: usize) -> Vec<Vec<usize>> {
    fn go(start: usize, n: usize, r: usize, cur: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if cur.len() == r {
            out.push(cur.clone());
            return;
        }
        for i in start..n {
            cur.push(i);
            go(i + 1, n, r, cur, out);
            cur.pop();
        }
    }
    let mut out = Vec::new();
    go(0, n, r, &mut Vec::new(), &mut out);
    out
}

/// Straight two-pass scan over every combination, floats and all.
fn reference_selection(plan: &[CategoryPlan], target: u64) -> (ReportStatus, Vec<String>) {
    let mut items: Vec<(i64, String, u64, bool)> = Vec::new();
    for (c, (points, is_news, stamps)) in plan.iter().enumerate() {
        for (i, secs) in stamps.iter().enumerate() {
            items.push((*secs, format!("cat-{c}/{i}"), u64::from(*points), *is_news));
        }
    }
    items.sort_by_key(|item| item.0);

    let worth = |&(_, _, points, is_news): &(i64, String, u64, bool)| {
        if is_news {
            points / 2
        } else {
            points
        }
    };

    for strict in [true, false] {
        for r in 1..=items.len() {
            for combo in combos(items.len(), r) {
                if combo.iter().any(|&i| worth(&items[i]) == target) {
                    continue;
                }
                let total: u64 = combo.iter().map(|&i| worth(&items[i])).sum();
                let news: u64 = combo.iter().filter(|&&i| items[i].3).map(|&i| worth(&items[i])).sum();
                if total < target {
                    continue;
                }
                let balanced = total == 0 || {
                    let ratio = news as f64 / total as f64;
                    (0.4..=0.6).contains(&ratio)
                };
                if !strict || balanced {
                    let status = if strict {
                        ReportStatus::Qualified
                    } else {
                        ReportStatus::Fallback
                    };
                    return (status, combo.iter().map(|&i| items[i].1.clone()).collect());
                }
            }
        }
    }
    (ReportStatus::Unsatisfiable, Vec::new())
}

fn plan_strategy() -> impl Strategy<Value = Vec<CategoryPlan>> {
    prop::collection::vec(
        (0u32..30, any::<bool>(), prop::collection::vec(0i64..6, 1..3)),
        1..5,
    )
}

proptest! {
    #[test]
    fn engine_agrees_with_reference_scan(plan in plan_strategy(), target in 1u64..60) {
        let registry = build(&plan);
        let allocation = ReportEngine::default().plan(&registry, target as i64).unwrap();
        let (status, references) = reference_selection(&plan, target);

        prop_assert_eq!(allocation.report().status, status);
        prop_assert_eq!(&allocation.report().references, &references);
    }

    #[test]
    fn qualified_reports_meet_target_and_balance(plan in plan_strategy(), target in 1u64..60) {
        let registry = build(&plan);
        let allocation = ReportEngine::default().plan(&registry, target as i64).unwrap();
        let report = allocation.report();

        if report.status.is_satisfied() {
            prop_assert!(report.total >= target);
            prop_assert_eq!(report.total, report.news_points + report.regular_points);
            prop_assert_eq!(report.items_selected, report.references.len());
        }
        if report.status == ReportStatus::Qualified && report.total > 0 {
            prop_assert!(report.news_points * 10 >= report.total * 4);
            prop_assert!(report.news_points * 10 <= report.total * 6);
        }
    }

    #[test]
    fn selections_never_contain_a_solo_match(plan in plan_strategy(), target in 1u64..60) {
        let registry = build(&plan);
        let allocation = ReportEngine::default().plan(&registry, target as i64).unwrap();

        for &at in allocation.picks() {
            let category = registry.category_at(at.category).unwrap();
            let worth = if category.is_news() {
                u64::from(category.points()) / 2
            } else {
                u64::from(category.points())
            };
            prop_assert_ne!(worth, target);
        }
    }

    #[test]
    fn commit_touches_only_picks(plan in plan_strategy(), target in 1u64..60) {
        let mut registry = build(&plan);
        let engine = ReportEngine::default();
        let allocation = engine.plan(&registry, target as i64).unwrap();
        let picks = allocation.picks().to_vec();
        let unused_before = collect_candidates(&registry).len();

        engine.generate(&mut registry, target as i64).unwrap();

        for &at in &picks {
            prop_assert!(registry.item(at).unwrap().is_used());
        }
        prop_assert_eq!(collect_candidates(&registry).len(), unused_before - picks.len());
    }
}
