use anyhow::Context;
use clap::Parser;
use docdigest::{config, logging, processing::DigestService};
use std::path::PathBuf;

/// Summarize an extracted plain-text document and optionally answer a question about it.
#[derive(Parser)]
#[command(name = "docdigest", version, about)]
struct Cli {
    /// Path to the extracted plain-text document.
    input: PathBuf,
    /// Question to answer using the document as context.
    #[arg(long)]
    question: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init_config();
    logging::init_tracing();
    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let service = DigestService::new();
    let outcome = service.digest(&text).await;

    for (index, summary) in outcome.chunk_summaries.iter().enumerate() {
        println!("Chunk {} summary: {summary}", index + 1);
    }
    println!("\nCombined summary:\n{}", outcome.summary);
    if !outcome.keywords.is_empty() {
        println!("\nKeywords: {}", outcome.keywords.join(", "));
    }

    if let Some(question) = cli.question {
        match service.answer_question(&question, &text).await {
            Ok(qa) => {
                if qa.truncated {
                    tracing::info!(
                        context_chars = qa.context_chars,
                        "Question answered from a truncated document prefix"
                    );
                }
                println!("\nAnswer: {}", qa.answer);
            }
            Err(error) => {
                // Question answering is best-effort; the digest above already succeeded.
                eprintln!("Could not answer question: {error}");
            }
        }
    }

    Ok(())
}
