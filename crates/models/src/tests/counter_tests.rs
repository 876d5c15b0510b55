use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;
use sea_orm::{EntityTrait, PaginatorTrait};
use tokio::sync::Barrier;

use crate::global_counter::{self, current, increment_in, SINGLETON_ID};
use super::{setup_empty, TestDb};

/// Empty table -> first call returns 1 and leaves exactly one row
#[tokio::test]
async fn test_first_increment_on_empty_table() -> Result<()> {
    let Some(t) = setup_empty().await else { return Ok(()) };

    assert_eq!(current(&t.db).await?, 0);
    let v = increment_in(&t.db).await?;
    assert_eq!(v, 1);

    let rows = global_counter::Entity::find().all(&t.db).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, SINGLETON_ID);
    assert_eq!(rows[0].value, 1);
    Ok(())
}

/// N sequential calls return exactly 1..=N
#[tokio::test]
async fn test_sequential_increments() -> Result<()> {
    let Some(t) = setup_empty().await else { return Ok(()) };

    let n = 25;
    let mut seen = Vec::with_capacity(n);
    for _ in 0..n {
        seen.push(increment_in(&t.db).await?);
    }
    let expected: Vec<i32> = (1..=n as i32).collect();
    assert_eq!(seen, expected);
    assert_eq!(current(&t.db).await?, n as i32);
    Ok(())
}

/// K concurrent calls from value V return exactly {V+1..=V+K}
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_no_lost_updates() -> Result<()> {
    let Some(TestDb { db, _guard }) = setup_empty().await else { return Ok(()) };

    let base = {
        let mut v = 0;
        for _ in 0..3 {
            v = increment_in(&db).await?;
        }
        v
    };

    let k = 16;
    let db = Arc::new(db);
    let barrier = Arc::new(Barrier::new(k));
    let mut handles = Vec::with_capacity(k);
    for _ in 0..k {
        let db = Arc::clone(&db);
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            increment_in(&*db).await
        }));
    }

    let mut values = BTreeSet::new();
    for h in handles {
        let v = h.await??;
        assert!(values.insert(v), "duplicate value {v}");
    }
    let expected: BTreeSet<i32> = (base + 1..=base + k as i32).collect();
    assert_eq!(values, expected);
    assert_eq!(global_counter::Entity::find().count(&*db).await?, 1);
    Ok(())
}

/// Concurrent first calls on an empty table create a single row
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_calls_create_one_row() -> Result<()> {
    let Some(TestDb { db, _guard }) = setup_empty().await else { return Ok(()) };

    let k = 8;
    // DatabaseConnection is not Clone once sea-orm's mock backend is compiled in.
    let db = Arc::new(db);
    let barrier = Arc::new(Barrier::new(k));
    let mut handles = Vec::with_capacity(k);
    for _ in 0..k {
        let db = Arc::clone(&db);
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            increment_in(&*db).await
        }));
    }
    let mut values = Vec::with_capacity(k);
    for h in handles {
        values.push(h.await??);
    }
    values.sort_unstable();
    assert_eq!(values, (1..=k as i32).collect::<Vec<_>>());
    assert_eq!(global_counter::Entity::find().count(&*db).await?, 1);
    Ok(())
}
