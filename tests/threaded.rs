use std::sync::Arc;
use std::thread;

use morpho::{PositionalError, Rule};

#[test]
fn apply_across_threads() {
    let rule = Arc::new(Rule::from_dsl("-u?-u:+u;ge+t").unwrap());

    let mut handles = vec![];

    // Thread 1: ends in -u, so the -u is dropped first
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || r.apply("lupu")));

    // Thread 2: no -u, one is added
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || r.apply("kot")));

    // Thread 3: empty word
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || r.apply("")));

    // Thread 4: compound, edges only touch the outer stems
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || {
        r.apply_compound(&["lupu", "kot"]).map(|stems| stems.join("|"))
    }));

    let results: Vec<Result<String, PositionalError>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0].as_deref(), Ok("gelupt"));
    assert_eq!(results[1].as_deref(), Ok("gekotut"));
    assert_eq!(results[2].as_deref(), Ok("geut"));
    assert_eq!(results[3].as_deref(), Ok("gelupu|kotut"));
}

#[test]
fn many_threads_agree() {
    let rule = Arc::new(Rule::from_dsl("i(ch)^+;.en").unwrap());
    let expected = rule.apply("ten").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let r = Arc::clone(&rule);
            thread::spawn(move || r.apply("ten").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
