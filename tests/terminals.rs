use ironlinq::testing::*;
use ironlinq::*;

#[test]
fn empty_input_errors() {
    let none = from_vec(Vec::<i32>::new());
    assert!(matches!(none.first(), Err(LinqError::Empty { op: "first" })));
    assert!(none.single().unwrap_err().is_empty());
    assert!(none.aggregate(|a, b| a + b).unwrap_err().is_empty());
    assert!(none.min().unwrap_err().is_empty());
    assert!(none.max().unwrap_err().is_empty());
    assert!(none.average().unwrap_err().is_empty());
    assert!(none.last().unwrap_err().is_empty());
    assert!(none.minmax().unwrap_err().is_empty());
    assert!(none.index_of_min().unwrap_err().is_empty());
}

#[test]
fn single_distinguishes_too_many() {
    let two = from_vec(vec![1, 2]);
    let err = two.single().unwrap_err();
    assert!(err.is_more_than_one());
    assert!(!err.is_empty());
    assert_eq!(from_vec(vec![1, 2, 3]).single_where(|x| *x == 2).unwrap(), 2);
    assert!(from_vec(vec![1, 2, 3]).single_where(|x| *x > 5).unwrap_err().is_empty());
}

#[test]
fn element_access() -> anyhow::Result<()> {
    let q = from_vec(vec![4, 9, 2, 9, 7]);
    assert_eq!(q.first()?, 4);
    assert_eq!(q.last()?, 7);
    assert_eq!(q.first_where(|x| *x > 5)?, 9);
    assert_eq!(q.last_where(|x| *x < 5)?, 2);
    assert!(q.any()?);
    assert!(q.any_where(|x| *x == 2)?);
    assert!(!q.all(|x| *x > 2)?);
    assert_eq!(q.count()?, 5);
    assert_eq!(q.count_where(|x| *x == 9)?, 2);
    assert!(!empty::<i32>().any()?);
    assert!(empty::<i32>().all(|_| false)?);
    Ok(())
}

#[test]
fn folds_and_extremes() -> anyhow::Result<()> {
    let q = from_vec(vec![3, 8, 1, 8, 5]);
    assert_eq!(q.aggregate(|a, b| a * 10 + b)?, 38_185);
    assert_eq!(q.fold(String::new(), |acc, x| format!("{acc}{x}"))?, "38185");
    assert_eq!(q.sum()?, 25);
    assert!((q.average()? - 5.0).abs() < f64::EPSILON);
    assert_eq!(q.min()?, 1);
    assert_eq!(q.max()?, 8);
    assert_eq!(q.minmax()?, (1, 8));
    assert_eq!(q.index_of_min()?, 2);
    assert_eq!(q.index_of_max()?, 1);
    Ok(())
}

#[test]
fn keyed_extremes_keep_first_tie() -> anyhow::Result<()> {
    let words = from_vec(vec!["kiwi", "fig", "pear", "yam", "plum"]);
    assert_eq!(words.min_by_key(|w| w.len())?, "fig");
    assert_eq!(words.max_by_key(|w| w.len())?, "kiwi");
    assert_eq!(words.index_of_max_by_key(|w| w.len())?, 0);
    assert_eq!(words.min_by(|a, b| a.cmp(b))?, "fig");
    assert!((words.average_by(|w| w.len() as f64)? - 3.6).abs() < 1e-9);
    Ok(())
}

#[test]
fn wide_integers_average_through_a_key() -> anyhow::Result<()> {
    let offsets = from_vec(vec![-4i64, 10, 3_000_000_000]);
    let mean = offsets.average_by(|n| *n as f64)?;
    assert!((mean - 1_000_000_002.0).abs() < 1e-6);
    assert!(empty::<u64>().average_by(|n| *n as f64).unwrap_err().is_empty());
    Ok(())
}

#[test]
fn materializers() -> anyhow::Result<()> {
    let q = from_vec(vec![("b", 2), ("a", 1), ("b", 3)]);
    let m = q.to_map_pairs()?;
    assert_eq!(m.get("b"), Some(&2));
    assert_eq!(m.len(), 2);

    let by_len = from_vec(vec!["aa", "b", "cc"]).to_map(|s| s.len())?;
    assert_eq!(by_len.get(&2), Some(&"aa"));

    let set = from_vec(vec![3, 1, 3, 2]).to_set()?;
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(from_vec(vec![1, 1, 2]).to_hash_set()?.len(), 2);
    Ok(())
}

#[test]
fn join_renders_elements() -> anyhow::Result<()> {
    assert_eq!(range(1, 4).join(", ")?, "1, 2, 3, 4");
    assert_eq!(empty::<i32>().join(",")?, "");
    let hex = from_vec(vec![10u8, 255]).join_with(":", |v, out| {
        use std::fmt::Write;
        write!(out, "{v:02x}")
    })?;
    assert_eq!(hex, "0a:ff");
    Ok(())
}

#[test]
fn visitors_see_positions() -> anyhow::Result<()> {
    let mut seen = Vec::new();
    from_vec(vec!['x', 'y']).for_each_indexed(|c, i| seen.push((i, c)))?;
    assert_collections_equal(&seen, &[(0, 'x'), (1, 'y')]);
    Ok(())
}

#[test]
fn fallible_results() -> anyhow::Result<()> {
    let mixed: Seq<std::result::Result<i32, String>> =
        from_vec(vec![Ok(1), Err("bad".to_string()), Ok(3)]);
    let (oks, errs) = mixed.partition_results()?;
    assert_eq!(oks, vec![1, 3]);
    assert_eq!(errs, vec!["bad".to_string()]);
    assert!(mixed.collect_fail_fast().is_err());
    assert_eq!(mixed.clone().ok_or_fail().take(1).to_vec()?, vec![1]);
    assert!(mixed.ok_or_fail().to_vec().is_err());
    Ok(())
}
