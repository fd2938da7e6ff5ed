use ironlinq::comparer::{self, by_key, from_fn, reverse};
use ironlinq::testing::*;
use ironlinq::*;

#[test]
fn order_natural() -> anyhow::Result<()> {
    assert_seq_eq(&from_vec(vec![3, 1, 2]).order_by(comparer::natural()), &[1, 2, 3]);
    assert_seq_eq(&from_vec(vec![3, 1, 2]).order_desc(), &[3, 2, 1]);
    assert_seq_eq(&empty::<u8>().order(), &[]);
    assert_eq!(from_vec(vec![5, 5, 1]).order().to_vec()?, vec![1, 5, 5]);
    Ok(())
}

#[test]
fn order_by_keys() -> anyhow::Result<()> {
    let people = from_vec(vec![("ann", 31), ("bob", 25), ("cy", 47)]);
    let by_age = people.clone().order_by_key(|p| p.1).map(|p| p.0);
    assert_eq!(by_age.to_vec()?, vec!["bob", "ann", "cy"]);

    let oldest_first = people.order_by_key_desc(|p| p.1).first()?;
    assert_eq!(oldest_first, ("cy", 47));
    Ok(())
}

#[test]
fn stable_sort_keeps_input_order_of_ties() -> anyhow::Result<()> {
    let rows = from_vec(vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (2, 'e')]);
    let q = rows.order_with(by_key(|r: &(i32, char)| r.0), OrderMode::StableSort);
    assert_eq!(
        q.map(|r: &(i32, char)| r.1).to_vec()?,
        vec!['b', 'd', 'a', 'c', 'e']
    );
    Ok(())
}

#[test]
fn heap_and_stable_modes_agree_on_distinct_keys() -> anyhow::Result<()> {
    let data: Vec<i64> = (0..200).map(|i| (i * 7919) % 1009).collect();
    let heap = from_vec(data.clone()).order_with(comparer::natural(), OrderMode::PairingHeap);
    let stable = from_vec(data).order_with(comparer::natural(), OrderMode::StableSort);
    assert_eq!(heap.to_vec()?, stable.to_vec()?);
    Ok(())
}

#[test]
fn then_by_key_breaks_ties() -> anyhow::Result<()> {
    let q = from_vec(vec![("b", 2), ("a", 2), ("c", 1)]).then_by_key(vec![
        by_key(|p: &(&'static str, i32)| p.1),
        reverse(by_key(|p: &(&'static str, i32)| p.0)),
    ]);
    assert_eq!(q.to_vec()?, vec![("c", 1), ("b", 2), ("a", 2)]);
    Ok(())
}

#[test]
fn float_keys() -> anyhow::Result<()> {
    let q = from_vec(vec![2.5, f64::NAN, -1.0, 0.0]).order_by(comparer::float_total());
    let v = q.to_vec()?;
    assert_eq!(&v[..3], &[-1.0, 0.0, 2.5]);
    assert!(v[3].is_nan());
    Ok(())
}

#[test]
fn merge_sorted_inputs() -> anyhow::Result<()> {
    let a = from_vec(vec![1, 4, 6]);
    let b = from_vec(vec![2, 3, 7, 9]);
    assert_seq_eq(&a.clone().merge(b), &[1, 2, 3, 4, 6, 7, 9]);
    assert_seq_eq(&a.clone().merge(empty()), &[1, 4, 6]);
    assert_seq_eq(&empty::<i32>().merge(a), &[1, 4, 6]);
    Ok(())
}

#[test]
fn merge_ties_favour_first_input() -> anyhow::Result<()> {
    let left = from_vec(vec![(1, 'L'), (2, 'L')]);
    let right = from_vec(vec![(1, 'R'), (2, 'R')]);
    let cmp = from_fn(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
    let merged = left.merge_by(right, cmp).map(|p: &(i32, char)| p.1).to_vec()?;
    assert_eq!(merged, vec!['L', 'R', 'L', 'R']);
    Ok(())
}

#[test]
fn sorted_terminals() -> anyhow::Result<()> {
    assert_eq!(from_vec(vec![9, 3, 5]).to_sorted_vec()?, vec![3, 5, 9]);
    assert_eq!(
        from_vec(vec!["bb", "a", "ccc"]).to_sorted_vec_by(|a, b| b.len().cmp(&a.len()))?,
        vec!["ccc", "bb", "a"]
    );
    let pairs = from_vec(vec![(3, "c"), (1, "a"), (2, "b")]).order_by_pair_key();
    assert_eq!(pairs.values().to_vec()?, vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn heap_sorted_view_leaves_heap_intact() -> anyhow::Result<()> {
    let mut heap: PairingHeap<u32> = [8, 3, 5].into_iter().collect();
    let view = heap.sorted();
    heap.insert(1);
    assert_seq_eq(&view, &[3, 5, 8]);
    assert_reenumerable(&view);
    assert_eq!(heap.len(), 4);
    assert_eq!(heap.peek(), Some(&1));
    Ok(())
}
