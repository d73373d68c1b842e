use clap::Parser;
use og_images::config::Settings;
use og_images::generation::GeminiClient;
use og_images::{output, run};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "og-images")]
#[command(about = "Generate Open Graph images for blog posts with Gemini")]
#[command(long_about = "\
Generate Open Graph images for blog posts with Gemini

Run from the project root. Every published post without an image gets one;
existing images are left alone unless the post is named explicitly.

Layout (paths configurable in og-images.toml):

  src/content/blog/*.md                     # Posts (draft: true is skipped)
  scripts/assets/og-style-reference.png     # Optional style reference
  public/safari-pinned-tab.svg              # Logo stamped bottom-right
  public/og/<slug>.png                      # Output, plus .webp, -800w.webp, -400w.webp

Frontmatter keys read: title, description, draft, ogPrompt.

Requires GEMINI_API_KEY in the environment or a .env file.")]
#[command(version)]
struct Cli {
    /// Only (re)generate the post with this slug
    slug: Option<String>,
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match execute(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the generator. `Ok(false)` means at least one post failed.
fn execute(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let root = std::env::current_dir()?;
    let settings = Settings::load(&root)?;
    let client = GeminiClient::from_settings(&settings);

    output::print_banner();

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_event(&event);
        }
    });
    let result = run::run(&settings, cli.slug.as_deref(), &client, Some(tx));
    printer.join().ok();

    let summary = result?;
    output::print_summary(&summary);
    Ok(summary.is_success())
}
