use anyhow::{Context, Result};
use clap::Parser;
use imagga_tagger::{encode, CancellationToken, FetchMode, ImaggaClient, Outcome, TaggerConfig};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "imagga-tagger",
    version,
    about = "Upload a photo to Imagga and print its tags and dominant colors"
)]
struct Cli {
    /// Image to upload (any format the `image` crate can read)
    image: PathBuf,

    /// API root (default: IMAGGA_BASE_URL or http://api.imagga.com/v1)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Full Authorization header value, e.g. "Basic YWNj..."
    /// (default: IMAGGA_AUTHORIZATION or IMAGGA_API_KEY/IMAGGA_API_SECRET)
    #[arg(long, value_name = "VALUE")]
    authorization: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Fetch tags and colors at the same time
    #[arg(long)]
    concurrent: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Do not render upload progress
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> Result<TaggerConfig> {
        let mut config = match &self.authorization {
            Some(auth) => TaggerConfig::default().authorization(auth.clone()),
            None => TaggerConfig::from_env()?,
        };
        if let Some(url) = &self.base_url {
            config = config.base_url(url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.timeout(Duration::from_secs(secs));
        }
        if self.concurrent {
            config = config.fetch_mode(FetchMode::Concurrent);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ImaggaClient::new(cli.config()?)?;
    let bytes = std::fs::read(&cli.image)
        .with_context(|| format!("Cannot read image {}", cli.image.display()))?;
    let image = encode::decode(&bytes)?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let quiet = cli.quiet;
    let outcome = client
        .process_with_cancel(&image, &cancel, |fraction| {
            if !quiet {
                eprint!("\rUploading {:>3.0}%", fraction * 100.0);
                let _ = std::io::stderr().flush();
            }
        })
        .await;
    if !quiet {
        eprintln!();
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render(&outcome));
    }
    Ok(())
}

fn render(outcome: &Outcome) -> String {
    let mut out = String::new();
    if outcome.cancelled {
        out.push_str("Cancelled.\n");
    }
    match &outcome.tags {
        Some(tags) if !tags.is_empty() => {
            out.push_str("Tags:\n");
            for tag in tags {
                out.push_str(&format!("  {}\n", tag));
            }
        }
        _ => out.push_str("No tags.\n"),
    }
    match &outcome.colors {
        Some(colors) if !colors.is_empty() => {
            out.push_str("Colors:\n");
            for color in colors {
                out.push_str(&format!("  {}\n", color));
            }
        }
        _ => out.push_str("No colors.\n"),
    }
    out
}
