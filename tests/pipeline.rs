mod common;

use anyhow::Result;
use ironstream::testing::*;
use ironstream::{SliceStream, from_slice, from_vec};

#[test]
fn stages_run_in_declaration_order() -> Result<()> {
    common::init_tracing();
    // limit before filter and after it give different results
    let a = from_vec(vec![1, 2, 3, 4, 5, 6]).limit(4).filter(|x: &i32| x % 2 == 0);
    let b = from_vec(vec![1, 2, 3, 4, 5, 6]).filter(|x: &i32| x % 2 == 0).limit(4);
    assert_stream_yields(&a, &[2, 4]);
    assert_stream_yields(&b, &[2, 4, 6]);
    Ok(())
}

#[test]
fn filter_map_limit_preserve_order() -> Result<()> {
    let out = from_vec((0..50).collect::<Vec<i32>>())
        .filter(|x: &i32| x % 3 == 0)
        .map(|x: &i32| x * 2)
        .limit(5)
        .to_vec();
    assert_collections_equal(&out, &[0, 6, 12, 18, 24]);
    Ok(())
}

#[test]
fn terminal_twice_runs_stages_once() -> Result<()> {
    let maps = CallCounter::new();
    let preds = CallCounter::new();
    let (m, p) = (maps.clone(), preds.clone());
    let s = from_vec(vec![4, 8, 15, 16, 23, 42])
        .filter(move |x: &i32| {
            p.hit();
            *x > 10
        })
        .map(move |x: &i32| {
            m.hit();
            x + 1
        });

    let first = s.to_vec();
    let second = s.to_vec();
    assert_eq!(first, second);
    assert_eq!(s.len(), 4);
    assert_eq!(preds.get(), 6);
    assert_eq!(maps.get(), 4);
    Ok(())
}

#[test]
fn clones_share_one_evaluation() -> Result<()> {
    let calls = CallCounter::new();
    let c = calls.clone();
    let s = from_vec(vec![1, 2, 3]).map(move |x: &i32| {
        c.hit();
        x * x
    });
    let t = s.clone();
    assert_stream_yields(&s, &[1, 4, 9]);
    assert_stream_yields(&t, &[1, 4, 9]);
    assert!(t.is_evaluated());
    assert_eq!(calls.get(), 3);
    Ok(())
}

#[test]
fn branches_do_not_leak_stages() -> Result<()> {
    let base = from_vec(vec![5, 1, 4, 2, 3]).filter(|x: &i32| *x != 4);
    let sorted = base.clone().sort_by(|a: &i32, b: &i32| a.cmp(b));
    let doubled = base.clone().map(|x: &i32| x * 2);

    assert_stream_yields(&base, &[5, 1, 2, 3]);
    assert_stream_yields(&sorted, &[1, 2, 3, 5]);
    assert_stream_yields(&doubled, &[10, 2, 4, 6]);
    assert_eq!(base.pending_stages(), 0);
    Ok(())
}

#[test]
fn chaining_on_evaluated_stream_does_not_rerun() -> Result<()> {
    let calls = CallCounter::new();
    let c = calls.clone();
    let s = from_vec(vec![1, 2, 3, 4]).map(move |x: &i32| {
        c.hit();
        x * 10
    });
    assert_eq!(s.len(), 4);

    let next = s.limit(2);
    assert_eq!(next.pending_stages(), 1);
    assert_stream_yields(&next, &[10, 20]);
    assert_eq!(calls.get(), 4);
    Ok(())
}

#[test]
fn evaluate_is_idempotent() -> Result<()> {
    let calls = CallCounter::new();
    let c = calls.clone();
    let s = from_vec(vec!["a".to_string(), "b".to_string()])
        .map(move |s: &String| {
            c.hit();
            s.to_uppercase()
        })
        .evaluate()
        .evaluate();
    assert_eq!(s.pending_stages(), 0);
    assert_eq!(s.into_vec(), vec!["A".to_string(), "B".to_string()]);
    assert_eq!(calls.get(), 2);
    Ok(())
}

#[test]
fn caller_collection_is_not_mutated() -> Result<()> {
    let original = vec![3, 1, 2];
    let s = from_slice(&original).map(|x: &i32| x * 100).sort_by(|a: &i32, b: &i32| b.cmp(a));
    assert_stream_yields(&s, &[300, 200, 100]);
    assert_eq!(original, vec![3, 1, 2]);
    Ok(())
}

#[test]
fn limit_boundaries() -> Result<()> {
    let data = vec![1, 2, 3];
    assert!(from_vec(data.clone()).limit(0).is_empty());
    assert_stream_yields(&from_vec(data.clone()).limit(3), &[1, 2, 3]);
    assert_stream_yields(&from_vec(data.clone()).limit(usize::MAX), &[1, 2, 3]);
    assert_stream_yields(&from_vec(data).limit(2), &[1, 2]);
    Ok(())
}

#[test]
fn sort_by_is_stable() -> Result<()> {
    let people = vec![
        ("carol", 30),
        ("alice", 25),
        ("dave", 30),
        ("bob", 25),
        ("erin", 20),
    ];
    let out = from_vec(people)
        .sort_by(|a, b| a.1.cmp(&b.1))
        .to_vec();
    assert_collections_equal(
        &out,
        &[("erin", 20), ("alice", 25), ("bob", 25), ("carol", 30), ("dave", 30)],
    );

    let by_len = from_vec(vec!["ccc", "a", "bb", "d", "ee"]).sort_by_key(|s| s.len());
    assert_stream_yields(&by_len, &["a", "d", "bb", "ee", "ccc"]);
    Ok(())
}

#[test]
fn absent_and_empty_sources_yield_empty() -> Result<()> {
    let absent: SliceStream<i32> = SliceStream::from(None::<Vec<i32>>);
    let empty: SliceStream<i32> = SliceStream::default();
    for s in [absent, empty] {
        let s = s
            .filter(|x: &i32| *x > 0)
            .map(|x: &i32| x + 1)
            .sort_by(|a: &i32, b: &i32| a.cmp(b))
            .limit(3)
            .parallel(4)
            .for_each(|_, _| panic!("visitor called on empty stream"));
        assert!(s.is_empty());
        assert_eq!(s.to_vec(), Vec::<i32>::new());
    }
    Ok(())
}

#[test]
fn for_each_visits_indices_in_order_sequentially() -> Result<()> {
    let seen = std::sync::Mutex::new(Vec::new());
    let s = from_vec(vec!['x', 'y', 'z'])
        .map(|c: &char| c.to_ascii_uppercase())
        .for_each(|i, c| seen.lock().unwrap().push((i, *c)));
    assert_eq!(seen.into_inner().unwrap(), vec![(0, 'X'), (1, 'Y'), (2, 'Z')]);
    assert!(s.is_evaluated());
    assert_stream_yields(&s, &['X', 'Y', 'Z']);
    Ok(())
}

#[test]
fn iteration_and_conversions() -> Result<()> {
    let s: SliceStream<u8> = (1..=4).collect();
    let s = s.map(|x: &u8| x * 2);
    let by_ref: Vec<u8> = (&s).into_iter().copied().collect();
    assert_eq!(by_ref, vec![2, 4, 6, 8]);
    assert_eq!(s.iter().sum::<u8>(), 20);
    let owned: Vec<u8> = s.into_iter().collect();
    assert_eq!(owned, vec![2, 4, 6, 8]);
    Ok(())
}

#[test]
#[should_panic(expected = "boom")]
fn stage_panics_propagate_to_terminal() {
    let s = from_vec(vec![1, 2, 3]).map(|x: &i32| if *x == 2 { panic!("boom") } else { *x });
    let _ = s.to_vec();
}
