//! Parsing untrusted input through a pool stage, carrying per-item failures
//! as values instead of crashing a worker.
//!
//! Run with: cargo run --example fallible_stage

use futures_util::stream::StreamExt;
use pipeflow::{from_seq, FlowResultStreamExt};

#[tokio::main]
async fn main() {
    let raw = vec!["12", "7", "not-a-number", "40", ""];

    let lines = from_seq(
        raw.into_iter().map(Ok::<&str, String>).collect::<Vec<_>>(),
        4,
    );

    let parsed = lines
        .try_via_workers(4, 2, |line: &'static str| async move {
            line.parse::<i64>().map_err(|e| format!("{:?}: {}", line, e))
        })
        .expect("valid pool configuration");

    let doubled = parsed
        .try_via_workers(4, 2, |n| async move { Ok::<i64, String>(n * 2) })
        .expect("valid pool configuration");

    let results: Vec<Result<i64, String>> = doubled.collect().await;
    for item in results {
        match item {
            Ok(n) => println!("ok:  {}", n),
            Err(e) => println!("err: {}", e),
        }
    }
}
