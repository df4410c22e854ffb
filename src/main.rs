use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;

use gift_suggest::output::{format_cards, format_json};
use gift_suggest::{
    AgeGroup, AppConfig, AppContext, GiftCategory, GiftSuggester, Occasion, ProviderKind,
};

#[derive(Parser)]
#[command(name = "gift-suggest")]
#[command(about = "Suggest gifts from a chat transcript")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Chat transcript to analyze (.txt)
    chat_file: PathBuf,

    /// Number of gifts to suggest (1-10)
    #[arg(short = 'n', long = "gifts", default_value = "1")]
    num_gifts: u32,

    /// Minimum budget in dollars
    #[arg(long)]
    min_budget: Option<String>,

    /// Maximum budget in dollars
    #[arg(long)]
    max_budget: Option<String>,

    /// Occasion: eid, graduation, retirement, promotion, marriage
    #[arg(long)]
    occasion: Option<Occasion>,

    /// Recipient's age group: child, teen, adult, senior
    #[arg(long)]
    age_group: Option<AgeGroup>,

    /// Gift category: tech, fashion, home, sports, books, other
    #[arg(long)]
    category: Option<GiftCategory>,

    /// LLM provider: openai, anthropic
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// Model name override
    #[arg(long)]
    model: Option<String>,

    /// API endpoint override
    #[arg(long)]
    base_url: Option<String>,

    /// Characters of chat to send before truncating
    #[arg(long)]
    max_chat_chars: Option<usize>,

    /// Display name to greet (defaults to GIFT_SUGGEST_USER)
    #[arg(long)]
    user: Option<String>,

    /// Print suggestions as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            eprintln!("Error: Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let user = cli
        .user
        .clone()
        .or_else(|| std::env::var("GIFT_SUGGEST_USER").ok());
    let context = AppContext::new(config, user);
    if let Some(greeting) = context.greeting() {
        eprintln!("{greeting}");
    }

    let mut builder = GiftSuggester::builder()
        .chat_file(cli.chat_file.clone())
        .num_gifts(cli.num_gifts)
        .config(context.config.clone());
    if let Some(min) = cli.min_budget {
        builder = builder.min_budget(min);
    }
    if let Some(max) = cli.max_budget {
        builder = builder.max_budget(max);
    }
    if let Some(occasion) = cli.occasion {
        builder = builder.occasion(occasion);
    }
    if let Some(age_group) = cli.age_group {
        builder = builder.age_group(age_group);
    }
    if let Some(category) = cli.category {
        builder = builder.category(category);
    }
    if let Some(provider) = cli.provider {
        builder = builder.provider(provider);
    }
    if let Some(model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }
    if let Some(limit) = cli.max_chat_chars {
        builder = builder.max_chat_chars(limit);
    }
    if let Some(name) = context.user_name.clone() {
        builder = builder.user_name(name);
    }

    eprintln!("Loading...");
    let gifts = match builder.build().await {
        Ok(gifts) => gifts,
        Err(e) => {
            error!("Request failed: {e}");
            eprintln!("{e}");
            process::exit(1);
        }
    };
    info!("Received {} suggestions", gifts.len());
    eprintln!("Gift suggestions fetched successfully!");

    let share_base_url = &context.config.share_base_url;
    if cli.json {
        match format_json(&gifts, share_base_url) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize suggestions: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{}", format_cards(&gifts, share_base_url));
    }
}
