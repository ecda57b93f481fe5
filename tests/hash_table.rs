use madhash::{HashTable, TableConfig, TableError, is_prime};
use std::collections::BTreeSet;

#[test]
fn upsert_keeps_last_value() -> Result<(), TableError> {
    let mut table = HashTable::seeded();
    table.put(1, "a")?;
    table.put(2, "b")?;
    table.put(1, "c")?;

    assert_eq!(table.get(&1), Some(&"c"));
    assert_eq!(table.len(), 2);
    Ok(())
}

#[test]
fn twenty_keys_force_a_prime_growth() -> Result<(), TableError> {
    let mut table = HashTable::seeded();
    let initial = table.capacity();
    assert_eq!(initial, 17);

    for key in 0..20 {
        table.put(key, key.to_string())?;
    }

    assert!(table.capacity() > initial);
    assert!(is_prime(table.capacity()));
    assert!(table.capacity() * 2 >= initial * 3);
    for key in 0..20 {
        assert_eq!(table.get(&key), Some(&key.to_string()));
    }
    Ok(())
}

#[test]
fn draining_a_grown_table_shrinks_it() -> Result<(), TableError> {
    let mut table = HashTable::seeded();
    for key in 0..25 {
        table.put(key, key)?;
    }
    let grown = table.capacity();
    assert_eq!(grown, 37);

    for key in 1..25 {
        table.remove(&key);
    }

    assert!(table.capacity() < grown);
    assert!(table.capacity() > 2);
    assert!(is_prime(table.capacity()));
    assert_eq!(table.get(&0), Some(&0));
    assert_eq!(table.len(), 1);
    Ok(())
}

#[test]
fn resize_preserves_entries() -> Result<(), TableError> {
    let mut table = HashTable::with_seed(99);
    for key in 0..11u32 {
        table.put(key, key * 3)?;
    }
    let before: BTreeSet<(u32, u32)> = table.iter().map(|(&k, &v)| (k, v)).collect();
    let capacity = table.capacity();

    // The twelfth entry crosses 0.7 at capacity 17
    table.put(11, 33)?;
    assert_ne!(table.capacity(), capacity);
    table.remove(&11);

    let after: BTreeSet<(u32, u32)> = table.iter().map(|(&k, &v)| (k, v)).collect();
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn put_then_get_and_remove_then_get() -> Result<(), TableError> {
    let mut table = HashTable::new();
    table.put("key".to_string(), 5)?;
    assert_eq!(table.get("key"), Some(&5));
    assert_eq!(table.remove("key"), Some(5));
    assert_eq!(table.get("key"), None);
    assert!(table.is_empty());
    Ok(())
}

#[test]
fn string_keys_lookup_by_str() -> Result<(), TableError> {
    let mut table = HashTable::new();
    for word in ["apple", "banana", "cherry", "date", "elderberry"] {
        table.put(word.to_string(), word.len())?;
    }
    assert!(table.contains_key("cherry"));
    assert!(!table.contains_key("fig"));
    assert_eq!(table.get("elderberry"), Some(&10));
    Ok(())
}

#[test]
fn custom_thresholds_are_respected() -> Result<(), TableError> {
    let config =
        TableConfig::default().with_initial_capacity(5).with_load_factors(0.25, 0.5).with_seed(3);
    let mut table = HashTable::with_config(config)?;

    for key in 0..100 {
        table.put(key, ())?;
        assert!(table.load_factor() <= 0.5);
    }
    for key in 0..100 {
        table.remove(&key);
        assert!(table.load_factor() >= 0.25 || table.capacity() == 3);
    }
    assert_eq!(table.capacity(), 3);
    Ok(())
}

#[test]
fn narrow_threshold_band_is_rejected() -> Result<(), TableError> {
    let narrow = TableConfig::default().with_load_factors(0.6, 0.7).with_seed(1);
    assert!(matches!(HashTable::<i32, i32>::with_config(narrow), Err(TableError::InvalidConfig(_))));

    // The tightest accepted band keeps every removal inside it
    let tight = TableConfig::default().with_load_factors(0.35, 0.7).with_seed(1);
    let mut table = HashTable::with_config(tight)?;
    for key in 0..12 {
        table.put(key, key)?;
    }
    for key in 0..12 {
        table.remove(&key);
        assert!(table.load_factor() <= 0.7);
        assert!(table.load_factor() >= 0.35 || table.capacity() == 3);
    }
    Ok(())
}

#[test]
fn exhausted_growth_is_reported() -> Result<(), TableError> {
    let config = TableConfig::default().with_max_capacity(17);
    let mut table = HashTable::with_config(config)?;

    let mut failure = None;
    for key in 0..20 {
        if let Err(error) = table.put(key, key) {
            failure = Some(error);
            break;
        }
    }

    assert_eq!(failure, Some(TableError::CapacityExhausted { target: 34, horizon: 17 }));
    assert_eq!(table.len(), 11);
    assert_eq!(table.capacity(), 17);
    Ok(())
}

#[test]
fn extend_and_debug() -> Result<(), TableError> {
    let mut table = HashTable::seeded();
    table.try_extend((0..4).map(|i| (i, i * 2)))?;
    assert_eq!(table.len(), 4);

    let clone = table.clone();
    assert_eq!(clone.get(&3), Some(&6));
    assert!(!format!("{table:?}").is_empty());
    Ok(())
}
