//! Three worker tasks squaring ten numbers off one shared input stream.
//!
//! Run with: cargo run --example basic_pipeline

use futures_util::stream::StreamExt;
use pipeflow::{from_seq, workers};

#[tokio::main]
async fn main() {
    let input = from_seq(1..=10, 10);

    let squares = workers(input, 5, 3, |n: i32| async move { n * n })
        .expect("valid pool configuration");

    // Three workers race for items, so squares arrive in completion order.
    let mut results: Vec<i32> = squares.collect().await;
    results.sort();

    for n in results {
        println!("{}", n);
    }
}
