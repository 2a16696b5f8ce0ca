use std::path::PathBuf;

use article_finder_lib::RunOptions;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "article-finder", about = "Search, rank and highlight news articles")]
struct Args {
    /// JSON config file; environment variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show a single article by id instead of starting a search session
    #[arg(long)]
    article: Option<String>,

    /// Log at debug level
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            config_path: self.config.clone(),
            article_id: self.article.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // fmt().init() also routes `log` records from the library
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = article_finder_lib::run(args.run_options()).await {
        eprintln!("article-finder: {}", e);
        std::process::exit(1);
    }
}
