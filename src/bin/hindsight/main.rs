use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use spdlog::info;

use hindsight::aggregator::aggregate_posts;
use hindsight::config::{open_config, Credentials};
use hindsight::logger::configure_logger;
use hindsight::reddit::{Post, RedditClient, SortMode};
use hindsight::report::render_report;
use hindsight::summarizer::{build_prompt, GeminiClient};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of posts to fetch
    #[arg(short, long)]
    posts: Option<u32>,

    /// Subreddit to fetch from
    #[arg(short, long)]
    subreddit: Option<String>,

    /// How to sort posts
    #[arg(long, value_enum, default_value_t = SortMode::Hot)]
    sort: SortMode,

    /// Skip pinned/stickied posts like weekly threads
    #[arg(long)]
    skip_pinned: bool,

    /// Show individual posts while aggregating
    #[arg(short, long)]
    verbose: bool,

    /// Save the summary as a standalone HTML report
    #[arg(long)]
    html: bool,

    /// Save the summary into the letter archive as YYYY-MM-DD.md
    #[arg(long)]
    save: bool,

    /// List the models available to the configured API key and exit
    #[arg(long)]
    list_models: bool,

    /// Config path
    #[arg(short, long)]
    config_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match open_config(args.config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run hindsight --help");
            std::process::exit(1);
        }
    };

    if let Err(err) = configure_logger(&config, args.verbose) {
        eprintln!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let creds = Credentials::from_env()?;
    let gemini = GeminiClient::new(&creds.gemini_api_key, &config.summarizer.model)?;

    if args.list_models {
        println!("Available models:");
        for model in gemini.list_models()? {
            println!("- {}", model.name);
        }
        return Ok(());
    }

    let num_posts = args.posts.unwrap_or(config.reddit.num_posts);
    let subreddit = args
        .subreddit
        .clone()
        .unwrap_or_else(|| config.reddit.subreddit.clone());

    let skip_label = if args.skip_pinned { " (skipping pinned)" } else { "" };
    info!(
        "Fetching {} {} posts from r/{}{}...",
        num_posts, args.sort, subreddit, skip_label
    );

    let reddit = RedditClient::connect(&creds, &config.reddit.user_agent)?;
    let posts = reddit.fetch_posts(
        &subreddit,
        num_posts,
        args.sort,
        args.skip_pinned,
        config.reddit.num_comments,
    )?;

    info!(
        "Fetched {} posts. Aggregating content for summarization...",
        posts.len()
    );
    if args.verbose {
        print_posts(&posts);
    }
    let content = aggregate_posts(&posts);

    let now = Local::now();
    let prompt = build_prompt(
        &config.summarizer.prompt_template,
        &content,
        &config.summarizer.model,
        &now.format("%B %d, %Y").to_string(),
    )?;

    info!(
        "Generating summary with {} (this may take a moment)...",
        config.summarizer.model
    );
    let summary = gemini.generate(&prompt)?;

    println!("\n{}", summary);

    if args.save {
        fs::create_dir_all(&config.paths.markdown_dir)?;
        let letter_path = config
            .paths
            .markdown_dir
            .join(format!("{}.md", now.format("%Y-%m-%d")));
        fs::write(&letter_path, &summary)?;
        info!("Letter saved to {}", letter_path.to_str().unwrap());
    }

    if args.html {
        let html = render_report(&summary, &subreddit, &config.paths.template_dir)?;
        let report_name = format!("summary_{}.html", now.format("%Y%m%d_%H%M%S"));
        fs::write(&report_name, html)?;
        info!("HTML report saved to {}", report_name);
    }

    Ok(())
}

fn print_posts(posts: &[Post]) {
    for (i, post) in posts.iter().enumerate() {
        println!("\n--- Post {}: {} ---", i + 1, post.title);
        println!("Score: {} upvotes", post.score);
        println!("URL: {}", post.url);
        if post.pinned {
            println!("(This is a pinned post)");
        }
        if !post.selftext.is_empty() {
            println!("Text: {}", truncate(&post.selftext, 200));
        }
        if !post.comments.is_empty() {
            println!("Comments ({}):", post.comments.len());
            for comment in &post.comments {
                println!("  - [{} upvotes] {}", comment.score, truncate(&comment.body, 100));
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
