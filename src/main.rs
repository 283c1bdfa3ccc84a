use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use clap::Parser;
use log::{debug, info, warn};

use git_apk_search::{
    APKMIRROR_SITE_URL, ApkMirrorListingFetcher, ApkMirrorPageParser, BotMessenger, BotPoller,
    CommandDispatcher, DEFAULT_SEARCH_LIMIT, GITHUB_API_ENDPOINT, GitHubRepositoryFetcher,
    LivenessPinger, PingerHandle, StdResult, TELEGRAM_API_ENDPOINT, TelegramMessenger,
};

/// Command line arguments for the search bot
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Telegram bot token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    bot_token: String,

    /// Externally visible address pinged to keep the hosting instance awake
    #[arg(long, env = "RENDER_EXTERNAL_URL")]
    ping_url: Option<String>,

    /// Minutes between two liveness pings
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    ping_interval_minutes: u64,

    /// Maximum number of results per search
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SEARCH_LIMIT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    results_limit: u16,

    /// Timeout of every upstream request, in seconds
    #[arg(long, default_value_t = 15)]
    request_timeout_secs: u64,

    /// Maximum number of release lookups running at the same time
    #[arg(long, default_value_t = 4)]
    max_concurrent_lookups: usize,

    /// Long polling timeout of the bot platform, in seconds
    #[arg(long, default_value_t = 30)]
    poll_timeout_secs: u64,

    /// GitHub REST API endpoint
    #[arg(long, default_value = GITHUB_API_ENDPOINT)]
    github_api_endpoint: String,

    /// APKMirror site address
    #[arg(long, default_value = APKMIRROR_SITE_URL)]
    listing_site_url: String,

    /// Telegram Bot API endpoint
    #[arg(long, default_value = TELEGRAM_API_ENDPOINT)]
    telegram_api_endpoint: String,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    info!("Starting search bot");
    let args = Args::parse();
    debug!(
        "Results limit: {}, request timeout: {}s, concurrent lookups: {}",
        args.results_limit, args.request_timeout_secs, args.max_concurrent_lookups
    );

    let pinger = start_liveness_pinger(&args)?;
    let poller = build_bot_poller(&args)?;
    tokio::select! {
        result = poller.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown requested"),
    }
    if let Some(pinger) = pinger {
        pinger.stop().await?;
    }
    info!("Search bot stopped");

    Ok(())
}

fn start_liveness_pinger(args: &Args) -> StdResult<Option<PingerHandle>> {
    match &args.ping_url {
        Some(ping_url) => {
            let interval = Duration::from_secs(ping_interval_secs(args.ping_interval_minutes)?);

            Ok(Some(LivenessPinger::try_new(ping_url, interval)?.start()))
        }
        None => {
            warn!("RENDER_EXTERNAL_URL is not set, liveness pinger disabled");

            Ok(None)
        }
    }
}

fn build_bot_poller(args: &Args) -> StdResult<BotPoller> {
    let request_timeout = Duration::from_secs(args.request_timeout_secs);
    let repository_fetcher = Arc::new(GitHubRepositoryFetcher::try_new(
        &args.github_api_endpoint,
        request_timeout,
        args.max_concurrent_lookups,
    )?);
    let listing_fetcher = Arc::new(ApkMirrorListingFetcher::try_new(
        &args.listing_site_url,
        request_timeout,
        Arc::new(ApkMirrorPageParser::try_new(&args.listing_site_url)?),
    )?);
    let messenger: Arc<dyn BotMessenger> = Arc::new(TelegramMessenger::try_new(
        &args.telegram_api_endpoint,
        &args.bot_token,
        request_timeout,
    )?);
    let dispatcher = Arc::new(CommandDispatcher::new(
        repository_fetcher,
        listing_fetcher,
        Arc::clone(&messenger),
        args.results_limit,
    ));

    Ok(BotPoller::new(
        messenger,
        dispatcher,
        Duration::from_secs(args.poll_timeout_secs),
        Duration::from_secs(5),
    ))
}

fn ping_interval_secs(ping_interval_minutes: u64) -> StdResult<u64> {
    ping_interval_minutes
        .checked_mul(60)
        .ok_or_else(|| anyhow!("Ping interval of {ping_interval_minutes} minutes is too large"))
}
