use ironlinq::testing::*;
use ironlinq::*;

#[test]
fn word_lengths_pipeline() -> anyhow::Result<()> {
    let lines = from_vec(vec![
        "The quick brown fox".to_string(),
        "jumps over the lazy dog".to_string(),
    ]);

    let words = lines.flat_map(|s: &String| {
        from_vec(s.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>())
    });
    let long = words.filter(|w| w.len() >= 4);

    assert_seq_eq(
        &long,
        &[
            "quick".to_string(),
            "brown".to_string(),
            "jumps".to_string(),
            "over".to_string(),
            "lazy".to_string(),
        ],
    );
    Ok(())
}

#[test]
fn concat_with_empty() {
    let q = from_range(vec![1, 3, 4]).concat(from_range(Vec::new()));
    assert_seq_eq(&q, &[1, 3, 4]);
    assert_seq_eq(&empty().concat(from_vec(vec![2])), &[2]);
    assert_seq_eq(&concat_all(vec![once(1), empty(), from_vec(vec![2, 3])]), &[1, 2, 3]);
}

#[test]
fn zip_truncates_to_shorter() {
    let q = from_vec(vec![1, 2, 3]).zip(from_vec(vec![10, 20]), |a, b| a + b);
    assert_seq_eq(&q, &[11, 22]);
    assert_seq_eq(
        &from_vec(vec!['a', 'b']).zip_pairs(iota(1u8)),
        &[('a', 1), ('b', 2)],
    );
}

#[test]
fn select_many_flattens() {
    let q = from_vec(vec![1usize, 2]).flat_map(|x| range(0usize, *x));
    assert_seq_eq(&q, &[0, 0, 1]);
    let nested = from_vec(vec![from_vec(vec![1]), empty(), from_vec(vec![2, 3])]);
    assert_seq_eq(&nested.flatten(), &[1, 2, 3]);
    let runs = from_vec(vec![0usize, 0, 3, 0]).flat_map(|n| repeat('x').take(*n));
    assert_seq_eq(&runs, &['x', 'x', 'x']);
}

#[test]
fn skip_and_take_variants() {
    let q = from_vec((1..=10).collect::<Vec<i32>>());
    assert_seq_eq(&q.clone().skip(8), &[9, 10]);
    assert_seq_eq(&q.clone().skip(20), &[]);
    assert_seq_eq(&q.clone().take(2), &[1, 2]);
    assert_seq_eq(&q.clone().take_while(|x| *x < 4), &[1, 2, 3]);
    assert_seq_eq(&q.clone().skip_while(|x| *x < 8), &[8, 9, 10]);
    assert_seq_eq(&q.clone().skip_while(|x| x % 2 == 1).take(3), &[2, 3, 4]);
    assert_seq_eq(&q.to_exclusive(3), &[1, 2]);
}

#[test]
fn indexed_operators() {
    let q = from_vec(vec!['a', 'b', 'c', 'd']);
    assert_seq_eq(&q.clone().filter_indexed(|_, i| i % 2 == 0), &['a', 'c']);
    assert_seq_eq(&q.clone().index().skip(2), &[(2, 'c'), (3, 'd')]);
    assert_seq_eq(&q.map_indexed(|c, i| format!("{i}{c}")).take(2), &["0a".to_string(), "1b".to_string()]);
}

#[test]
fn generated_sources() -> anyhow::Result<()> {
    assert_seq_eq(&sequence(1u64, |x| *x < 50, |x| x * 2), &[1, 2, 4, 8, 16, 32]);
    assert_seq_eq(&unfold(1u64, |x| x * 10).take(3), &[1, 10, 100]);
    assert_seq_eq(&range(-2i32, 4), &[-2, -1, 0, 1]);
    assert_seq_eq(&once("only"), &["only"]);
    assert_eq!(repeat(7).take(1000).count()?, 1000);
    assert_seq_eq(&from_slice(&[1.5, 2.5]), &[1.5, 2.5]);
    let collected: Seq<i32> = (1..4).collect();
    assert_seq_eq(&collected, &[1, 2, 3]);
    Ok(())
}

#[test]
fn conversions() {
    assert_seq_eq(&from_vec(vec![1u8, 200]).cast::<u32>(), &[1, 200]);
    assert_seq_eq(&from_vec(vec![1i64, 2]).try_cast::<u8>(), &[1, 2]);
    assert_seq_fails(&from_vec(vec![-1i64]).try_cast::<u8>(), |e| {
        matches!(e, LinqError::Callback(_))
    });
}

#[test]
fn memoize_caches_per_advance() -> anyhow::Result<()> {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    let q = from_vec(vec![1, 2]).map(move |x: &i32| {
        c.fetch_add(1, Ordering::SeqCst);
        x * 100
    });
    let cached = q.clone().memoize();

    let mut cur = cached.cursor()?;
    assert!(cur.advance()?);
    for _ in 0..5 {
        assert_eq!(cur.current()?, 100);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn selector_side_effects_run_once_per_element() -> anyhow::Result<()> {
    use std::sync::{Arc, Mutex};

    let log = Arc::new(Mutex::new(Vec::new()));
    let zips = Arc::new(Mutex::new(0));
    let l = Arc::clone(&log);
    let z = Arc::clone(&zips);
    let q = from_vec(vec![1, 2, 3])
        .map(move |x: &i32| {
            l.lock().unwrap().push(*x);
            x + 1
        })
        .zip(from_vec(vec!['a', 'b', 'c']), move |n: &i32, c: &char| {
            *z.lock().unwrap() += 1;
            format!("{c}{n}")
        });

    let mut cur = q.cursor()?;
    assert!(cur.advance()?);
    for _ in 0..3 {
        assert_eq!(cur.current()?, "a2");
    }
    assert_eq!(*log.lock().unwrap(), vec![1]);
    assert_eq!(*zips.lock().unwrap(), 1);

    log.lock().unwrap().clear();
    assert_eq!(q.count()?, 3);
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    Ok(())
}

#[test]
fn selector_error_stops_counting() {
    let parsed = from_vec(vec!["1", "x", "3"]).try_map(|w: &&str| Ok(w.parse::<u32>()?));
    assert!(matches!(parsed.count(), Err(LinqError::Callback(_))));
    assert!(matches!(parsed.to_vec(), Err(LinqError::Callback(_))));
}
