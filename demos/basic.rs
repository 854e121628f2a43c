//! Word statistics over a small text file.
//!
//! Writes a sample file, then drives its lines through a chain that splits
//! them into words, drops short ones, numbers the survivors, and prints them.

use pushweld::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Basic Pipeline Example ===");

    let dir = std::env::temp_dir().join("pushweld-demo");
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| Error::io("create", &dir, e))?;
    let input = dir.join("input.txt");
    tokio::fs::write(&input, "the quick brown fox\njumps over\r\nthe lazy dog\n")
        .await
        .map_err(|e| Error::io("write", &input, e))?;

    let head = printer_with(|(i, word): (usize, String)| format!("{:>2}: {}", i, word))
        .cenumerate()
        .cfilter(|word: &String| word.len() > 3)
        .split_on(" ")?;
    from_file(&input, head).await?;

    let mut lengths = Vec::new();
    let head = collect(&mut lengths).cmap(|line: String| line.len());
    from_file(&input, head).await?;
    println!("Line lengths: {:?}", lengths);

    let output = dir.join("lengths.txt");
    let head = to_file::<String, _>(&output, true)
        .await?
        .cmap(|n: usize| format!("{}\n", n));
    start(lengths, head).await?;
    println!("Wrote {}", output.display());

    println!("Basic pipeline completed!\n");
    Ok(())
}
