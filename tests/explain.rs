use ironlinq::planner::explain;
use ironlinq::*;

#[test]
fn explain_lists_every_node() {
    let q = from_vec(vec![5, 3, 8])
        .filter(|x| *x > 3)
        .map(|x: &i32| x * 2)
        .order()
        .concat(from_vec(vec![0]));
    let plan = q.explain();

    assert_eq!(plan.steps.len(), 6);
    assert_eq!(plan.steps.last().map(|s| s.label.as_str()), Some("Concat"));
    assert_eq!(plan.steps.last().map(|s| s.depth), Some(0));
    assert!(plan.steps.iter().any(|s| s.is_barrier && s.label.starts_with("Order")));

    let cost = &plan.cost_estimate;
    assert_eq!(cost.source_size, Some(4));
    assert_eq!(cost.total_ops, 4);
    assert_eq!(cost.barriers, 1);
    assert_eq!(cost.lazy_ops, 3);
    for (i, step) in plan.steps.iter().enumerate() {
        assert_eq!(step.step, i + 1);
    }
}

#[test]
fn explain_does_not_pull() {
    let (src, counter) = ironlinq::testing::spy(iota(0u64));
    let q = src.map(|x: &u64| x + 1).take(3);
    let _ = explain(&q).to_string();
    assert_eq!(counter.snapshot().cursors, 0);
}

#[test]
fn display_has_sections() {
    let text = from_vec(vec![1, 2, 2]).distinct().explain().to_string();
    assert!(text.contains("SEQUENCE PLAN EXPLANATION"));
    assert!(text.contains("COST ESTIMATES"));
    assert!(text.contains("EXECUTION STEPS"));
    assert!(text.contains("Distinct [BARRIER]"));
    assert!(text.contains("Buffer(len=3)"));
}
