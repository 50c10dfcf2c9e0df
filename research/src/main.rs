mod answer;
mod config;
mod gather;
mod repl;
mod research;

use agent::Result;
use agent::tools::{DuckDuckGo, SaveToFile, Wikipedia};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();

    // stdout carries the conversation, logs go to stderr (RUST_LOG, default warn)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let args = config::Args::parse();

    let llm = agent::llm::OpenAI::with_config(
        args.model.clone(),
        args.endpoint_config()?,
        args.generation_config(),
    );

    let gatherer = gather::Gatherer::new(
        Box::new(Wikipedia::new(args.wikipedia_chars)?),
        Box::new(DuckDuckGo::new()?),
    );

    let orchestrator = research::Orchestrator::new(llm, gatherer)?;
    let repl = repl::Repl::new(orchestrator, SaveToFile::new(&args.output_dir));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    repl.run(stdin, std::io::stdout()).await?;

    Ok(())
}
