use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use mhtml2pdf::async_api::Browser;
use mhtml2pdf::cli::{Args, USAGE};
use mhtml2pdf::convert;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let Some(job) = args.job() else {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    };

    let browser = Browser::new(Some(args.engine_config()))
        .await
        .context("Failed to start the browser")?;

    let conversion = convert::run(browser, &job)
        .await
        .with_context(|| format!("Failed to convert {}", job.input.display()))?;

    println!("PDF written to {}", conversion.output.display());
    Ok(())
}
