//! Contract tests run against both backends through the `Dictionary` trait,
//! so any behavioral drift between them shows up as a single failing helper.

use probetree::{Cursor, DictError, Dictionary, ProbeHashMap, TreeMap};

fn collect_entries<D: Dictionary<String, i32>>(dict: &D) -> Vec<(String, i32)> {
    let mut cursor = dict.cursor();
    let mut out = Vec::new();
    while cursor.has_next() {
        let (k, v) = cursor.current().expect("has_next implies current");
        out.push((k.clone(), *v));
        cursor.advance().expect("has_next implies advance");
    }
    out
}

fn exercise_point_operations<D: Dictionary<String, i32>>(dict: &mut D) {
    assert_eq!(dict.len(), 0);
    assert!(dict.is_empty());
    assert!(!dict.contains(&"absent".to_string()));
    assert_eq!(dict.get(&"absent".to_string()), Err(DictError::KeyNotFound));
    assert_eq!(
        dict.remove(&"absent".to_string()),
        Err(DictError::KeyNotFound)
    );

    // Count tracks distinct keys; duplicates overwrite.
    for i in 0..10 {
        dict.insert(format!("key-{i}"), i);
    }
    for i in 0..5 {
        dict.insert(format!("key-{i}"), i + 100);
    }
    assert_eq!(dict.len(), 10);

    // Round trip, including the overwritten half.
    for i in 0..5 {
        assert_eq!(dict.get(&format!("key-{i}")), Ok(&(i + 100)));
    }
    for i in 5..10 {
        assert_eq!(dict.get(&format!("key-{i}")), Ok(&i));
    }

    // Removal returns the last saved value and unbinds the key.
    assert_eq!(dict.remove(&"key-3".to_string()), Ok(103));
    assert_eq!(dict.len(), 9);
    assert!(!dict.contains(&"key-3".to_string()));
    assert_eq!(dict.get(&"key-3".to_string()), Err(DictError::KeyNotFound));
    assert_eq!(
        dict.remove(&"key-3".to_string()),
        Err(DictError::KeyNotFound)
    );

    // Deleting then re-inserting makes the key immediately findable again.
    dict.insert("key-3".to_string(), -3);
    assert!(dict.contains(&"key-3".to_string()));
    assert_eq!(dict.get(&"key-3".to_string()), Ok(&-3));
    assert_eq!(dict.len(), 10);
    assert!(collect_entries(dict)
        .iter()
        .any(|(k, v)| k == "key-3" && *v == -3));
}

fn exercise_iteration<D: Dictionary<String, i32>>(dict: &mut D) {
    for i in 0..8 {
        dict.insert(format!("key-{i}"), i);
    }

    // The visitor sees every entry exactly once.
    let mut visited = Vec::new();
    dict.for_each(|k, v| {
        visited.push((k.clone(), *v));
        true
    });
    let mut sorted = visited.clone();
    sorted.sort();
    let expected: Vec<(String, i32)> = (0..8).map(|i| (format!("key-{i}"), i)).collect();
    assert_eq!(sorted, expected);

    // A false visitor result stops the traversal on the spot.
    let mut count = 0;
    dict.for_each(|_, _| {
        count += 1;
        count < 3
    });
    assert_eq!(count, 3);

    // Cursor and visitor agree on the sequence, and iteration over an
    // unmodified container is idempotent.
    let first = collect_entries(dict);
    let second = collect_entries(dict);
    assert_eq!(first, visited);
    assert_eq!(first, second);
}

fn exercise_cursor_exhaustion<D: Dictionary<String, i32>>(dict: &mut D) {
    dict.insert("only".to_string(), 1);

    let mut cursor = dict.cursor();
    assert!(cursor.has_next());
    assert_eq!(
        cursor.current().map(|(k, v)| (k.clone(), *v)),
        Ok(("only".to_string(), 1))
    );
    cursor.advance().unwrap();

    assert!(!cursor.has_next());
    assert_eq!(cursor.current().map(|_| ()), Err(DictError::IteratorExhausted));
    assert_eq!(cursor.advance(), Err(DictError::IteratorExhausted));
    assert!(!cursor.has_next());
}

#[test]
fn probe_hash_map_honors_point_contract() {
    exercise_point_operations(&mut ProbeHashMap::new());
}

#[test]
fn tree_map_honors_point_contract() {
    exercise_point_operations(&mut TreeMap::new());
}

#[test]
fn probe_hash_map_honors_iteration_contract() {
    exercise_iteration(&mut ProbeHashMap::new());
}

#[test]
fn tree_map_honors_iteration_contract() {
    exercise_iteration(&mut TreeMap::new());
}

#[test]
fn probe_hash_map_cursor_exhausts_cleanly() {
    exercise_cursor_exhaustion(&mut ProbeHashMap::new());
}

#[test]
fn tree_map_cursor_exhausts_cleanly() {
    exercise_cursor_exhaustion(&mut TreeMap::new());
}
