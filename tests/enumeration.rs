use ironlinq::testing::*;
use ironlinq::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn current_outside_an_element_fails() -> anyhow::Result<()> {
    let mut cur = from_vec(vec![7]).map(|x: &i32| x + 1).cursor()?;
    assert!(matches!(cur.current(), Err(LinqError::NotStarted)));
    assert!(cur.advance()?);
    assert_eq!(cur.current()?, 8);
    assert!(!cur.advance()?);
    assert!(matches!(cur.current(), Err(LinqError::Exhausted)));
    assert!(!cur.advance()?);
    Ok(())
}

#[test]
fn every_operator_stays_exhausted() -> anyhow::Result<()> {
    let cases: Vec<Seq<i32>> = vec![
        from_vec(vec![1, 2]).filter(|x| *x > 0),
        from_vec(vec![1, 2]).skip(1),
        from_vec(vec![1, 2]).skip_while(|x| *x < 2),
        from_vec(vec![1, 2]).take_while(|x| *x < 2),
        from_vec(vec![1]).concat(from_vec(vec![2])),
        from_vec(vec![1]).merge(from_vec(vec![2])),
        from_vec(vec![2, 1]).order(),
        from_vec(vec![1, 1]).distinct(),
        from_vec(vec![1, 2]).memoize(),
        from_vec(vec![vec![1], vec![]]).flat_map(|v: &Vec<i32>| from_vec(v.clone())),
    ];
    for q in cases {
        let mut cur = q.cursor()?;
        while cur.advance()? {}
        for _ in 0..3 {
            assert!(!cur.advance()?, "{q:?} advanced after the end");
        }
        assert!(matches!(cur.current(), Err(LinqError::Exhausted)), "{q:?}");
    }
    Ok(())
}

#[test]
fn ordinary_sequences_reenumerate() {
    assert_reenumerable(&from_vec(vec![3, 1, 2]).order().map(|x: &i32| x * 10));
    assert_reenumerable(&sequence(1u32, |x| *x < 1_000, |x| x * 7).skip(1));
    assert_reenumerable(&from_range(0..20).filter(|x: &i32| x % 3 == 0).group_by(|x| x % 2).map(
        |(k, g): &(i32, Seq<i32>)| (*k, g.count().unwrap_or(0)),
    ));
    assert_reenumerable(&range(0u8, 5).zip_pairs(from_vec(vec!['a', 'b'])));
}

#[test]
fn independent_cursors_do_not_share_state() -> anyhow::Result<()> {
    let q = from_vec(vec![1, 2, 3]).skip(1).map_indexed(|x, i| (i, *x));
    let mut a = q.cursor()?;
    let mut b = q.cursor()?;
    assert!(a.advance()?);
    assert!(a.advance()?);
    assert!(b.advance()?);
    assert_eq!(a.current()?, (1, 3));
    assert_eq!(b.current()?, (0, 2));
    Ok(())
}

#[test]
fn single_use_source_refuses_second_cursor() -> anyhow::Result<()> {
    let q = from_iter_once(vec![1, 2, 3].into_iter().map(|x| x * 2));
    assert_eq!(q.to_vec()?, vec![2, 4, 6]);
    assert_seq_fails(&q, |e| matches!(e, LinqError::AlreadyEnumerated));

    let built = Arc::new(AtomicUsize::new(0));
    let b = Arc::clone(&built);
    let lazy = factory(move || {
        b.fetch_add(1, Ordering::SeqCst);
        from_vec(vec!["line 1", "line 2"])
    });
    assert_eq!(built.load(Ordering::SeqCst), 0);
    assert_eq!(lazy.count()?, 2);
    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(matches!(lazy.first(), Err(LinqError::AlreadyEnumerated)));
    assert_eq!(built.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn generator_state_is_shared_across_enumerations() -> anyhow::Result<()> {
    let mut n = 0;
    let q = generate(move || {
        n += 1;
        n
    });
    assert_eq!(q.clone().take(3).to_vec()?, vec![1, 2, 3]);
    assert_eq!(q.take(2).to_vec()?, vec![4, 5]);
    Ok(())
}

#[test]
fn callback_errors_propagate_unchanged() {
    let q = from_vec(vec!["1", "2", "x", "4"]).try_map(|s: &&str| Ok(s.parse::<i32>()?));
    let err = q.to_vec().unwrap_err();
    assert!(matches!(err, LinqError::Callback(_)));
    assert!(err.to_string().contains("invalid digit"));

    let mut cur = q.cursor().unwrap();
    assert!(cur.advance().unwrap());
    assert_eq!(cur.current().unwrap(), 1);
}

#[test]
fn seq_iter_yields_results() -> anyhow::Result<()> {
    let q = from_vec(vec![1, 2, 3]).filter(|x| x % 2 == 1);
    let mut total = 0;
    for v in &q {
        total += v?;
    }
    assert_eq!(total, 4);
    let collected: Result<Vec<i32>> = q.iter().collect();
    assert_eq!(collected?, vec![1, 3]);
    Ok(())
}
