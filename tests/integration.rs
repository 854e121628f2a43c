//! Integration tests for pushweld pipelines

use async_trait::async_trait;
use pushweld::prelude::*;
use pushweld::util::for_each;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::tempdir;

#[tokio::test]
async fn test_identity_chain_preserves_sequence() -> Result<()> {
    let input = vec![5, 3, 9, 3, 0];
    let mut out = Vec::new();

    start(input.clone(), cmap(|x: i32| x, collect(&mut out))).await?;

    assert_eq!(out, input);
    Ok(())
}

#[tokio::test]
async fn test_filter_yields_ordered_subsequence() -> Result<()> {
    let input: Vec<i64> = (1..=20).collect();
    let mut out = Vec::new();

    start(input.clone(), cfilter(|x: &i64| x % 3 == 0, collect(&mut out))).await?;

    let expected: Vec<i64> = input.into_iter().filter(|x| x % 3 == 0).collect();
    assert_eq!(out, expected);
    assert!(out.len() <= 20);
    Ok(())
}

#[tokio::test]
async fn test_split_keeps_empty_pieces() -> Result<()> {
    let mut out = Vec::new();

    start(vec!["a,b,,c".to_string()], split_on(",", collect(&mut out))?).await?;

    assert_eq!(out, vec!["a", "b", "", "c"]);
    Ok(())
}

#[tokio::test]
async fn test_enumerate_pairs_from_zero() -> Result<()> {
    let mut out = Vec::new();

    start(vec!["x", "y", "z"], cenumerate(collect(&mut out))).await?;

    assert_eq!(out, vec![(0, "x"), (1, "y"), (2, "z")]);
    Ok(())
}

#[tokio::test]
async fn test_start_into_sink_has_no_effect() -> Result<()> {
    start(vec![1, 2, 3], sink()).await
}

#[tokio::test]
async fn test_from_file_default_splitter() -> Result<()> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.txt");
    tokio::fs::write(&path, "line1\nline2\n").await.unwrap();
    let mut out = Vec::new();

    from_file(&path, collect(&mut out)).await?;

    assert_eq!(out, vec!["line1", "line2"]);
    Ok(())
}

#[tokio::test]
async fn test_priming_truncates_each_file_once_at_construction() -> Result<()> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    tokio::fs::write(&path, "stale").await.unwrap();

    let mut first = prime(|| to_file::<&str, _>(&path, true)).await?;
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "");

    start(vec!["a", "b"], &mut first).await?;
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "ab");

    let mut second = prime(|| to_file::<&str, _>(&path, true)).await?;
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "");

    start(vec!["c"], &mut second).await?;
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "c");
    assert_eq!(first.accepted(), 2);
    assert_eq!(second.accepted(), 1);
    Ok(())
}

#[tokio::test]
async fn test_to_file_reused_across_runs_is_not_retruncated() -> Result<()> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let mut stage = to_file(&path, true).await?;

    start(vec![1, 2], &mut stage).await?;
    start(vec![3], &mut stage).await?;

    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "123");
    Ok(())
}

#[tokio::test]
async fn test_primed_stage_is_single_use() -> Result<()> {
    let mut out = Vec::new();
    let out_ref = &mut out;
    let mut stage = prime(|| async move { Ok(collect(out_ref)) }).await?;

    start(vec![1], &mut stage).await?;
    let err = start(vec![2], &mut stage).await.unwrap_err();

    assert!(matches!(err, Error::Exhausted));
    assert_eq!(stage.state(), StageState::Exhausted);
    drop(stage);
    assert_eq!(out, vec![1]);
    Ok(())
}

#[tokio::test]
async fn test_to_files_from_enumerated_lines() -> Result<()> {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    tokio::fs::write(&input, "alpha\nbeta\n").await.unwrap();

    let base = dir.path().to_path_buf();
    let head = to_files::<PathBuf, String>()
        .cmap(move |(i, line): (usize, String)| (base.join(format!("{}.txt", i)), line))
        .cenumerate();
    from_file(&input, head).await?;

    let first = tokio::fs::read_to_string(dir.path().join("0.txt")).await.unwrap();
    let second = tokio::fs::read_to_string(dir.path().join("1.txt")).await.unwrap();
    assert_eq!(first, "alpha");
    assert_eq!(second, "beta");
    Ok(())
}

#[tokio::test]
async fn test_io_failure_aborts_run() {
    let dir = tempdir().unwrap();
    let failing = to_files_with_mode::<PathBuf, &str>(FileMode::Write)
        .cmap(|name: &'static str| (dir.path().join(name), name));

    let result = start(vec!["ok.txt", "missing/nested.txt", "never.txt"], failing).await;

    assert!(matches!(result, Err(Error::Io { action: "open", .. })));
    assert!(dir.path().join("ok.txt").exists());
    assert!(!dir.path().join("never.txt").exists());
}

struct Countdown {
    finished: bool,
    seen: usize,
}

#[async_trait]
impl Consumer for Countdown {
    type Item = String;

    async fn accept(&mut self, _item: Self::Item) -> Result<()> {
        self.seen += 1;
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[tokio::test]
async fn test_finish_reaches_sink_through_transforms() -> Result<()> {
    let mut tail = Countdown {
        finished: false,
        seen: 0,
    };

    start(
        vec!["a b".to_string(), "c".to_string()],
        cfilter(|s: &String| !s.is_empty(), split_on(" ", &mut tail)?),
    )
    .await?;

    assert_eq!(tail.seen, 3);
    assert!(tail.finished);
    Ok(())
}

#[tokio::test]
async fn test_each_item_completes_downstream_before_next() -> Result<()> {
    let log = Mutex::new(Vec::new());

    let tail = for_each(|x: u8| {
        log.lock().unwrap().push(format!("sink {}", x));
        Ok(())
    });
    let head = cmap(
        |x: u8| {
            log.lock().unwrap().push(format!("map {}", x));
            x
        },
        tail,
    );
    Driver::new().start(vec![1, 2], head).await?;

    assert_eq!(
        log.into_inner().unwrap(),
        vec!["map 1", "sink 1", "map 2", "sink 2"]
    );
    Ok(())
}
