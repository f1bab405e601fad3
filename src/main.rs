use clap::Parser;
use llamaocr::models::config::OcrConfig;
use llamaocr::services::ocr::{TogetherOcrClient, DEFAULT_MODEL};
use tracing_subscriber::EnvFilter;

/// Send an image to a hosted OCR model and print the returned markdown
#[derive(Parser, Debug)]
#[command(name = "llamaocr", version)]
#[command(about = "Extract the text of an image as markdown via Together AI vision models")]
struct Args {
    /// Path or URL of the image to transcribe
    image: String,

    /// Vision model to use ("free" selects the free-tier model)
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean markdown
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version land here too and must exit 0
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    let client = TogetherOcrClient::new(OcrConfig::from_env());

    match client.extract_markdown(&args.image, &args.model).await {
        Ok(markdown) => println!("{}", markdown),
        Err(e) => {
            eprintln!("OCR failed: {}", e);
            std::process::exit(1);
        }
    }
}
