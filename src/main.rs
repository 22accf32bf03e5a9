use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use log::info;
use serde::Deserialize;
use serde_json::json;
use structopt::StructOpt;

use schlagzeile::{Article, ArticleStore, Config};

#[allow(missing_docs)]
#[derive(Debug, StructOpt)]
#[structopt(name = "schlagzeile", about = "News article extraction.")]
#[structopt(setting = structopt::clap::AppSettings::ColoredHelp)]
enum App {
    #[structopt(name = "article", about = "Extract a single article and store it as json.")]
    Article {
        #[structopt(name = "url", help = "The url of the article to download.")]
        url: String,
        #[structopt(
            long = "output",
            short = "o",
            help = "The file to store the article in, named after the current time if omitted.",
            parse(from_os_str)
        )]
        output: Option<PathBuf>,
        #[structopt(flatten)]
        opts: Opts,
    },
    #[structopt(name = "serve", about = "Serve extraction on `POST /scrape`.")]
    Serve {
        #[structopt(
            long = "addr",
            default_value = "0.0.0.0:5000",
            help = "The address to listen on."
        )]
        addr: SocketAddr,
        #[structopt(flatten)]
        opts: Opts,
    },
}

impl App {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            App::Article { url, output, opts } => {
                let config = opts.as_config();
                let record = Article::scrape(&url, &config)
                    .await
                    .ok_or_else(|| anyhow!("Failed to scrape the article."))?;
                let path = ArticleStore::new(".")
                    .save(&record, output.as_deref())
                    .await?;
                println!("Article saved to {}", path.display());
                println!("Successfully scraped article from {}", url);
                Ok(())
            }
            App::Serve { addr, opts } => serve(addr, opts.as_config()).await,
        }
    }
}

#[derive(Debug, Clone, StructOpt)]
pub struct Opts {
    #[structopt(
        long = "readability",
        help = "Prefer structural scoring over known class names for title and text."
    )]
    readability: bool,
    #[structopt(long = "user-agent", help = "The user-agent used for requests.")]
    user_agent: Option<String>,
    #[structopt(long = "timeout", help = "Request timeout in seconds.")]
    timeout: Option<u64>,
    #[structopt(
        long = "lenient-dates",
        help = "Retry dates that are not ISO 8601 with a fuzzy parser."
    )]
    lenient_dates: bool,
    #[structopt(
        long = "no-default-date",
        help = "Report a missing date instead of using the current time."
    )]
    no_default_date: bool,
}

impl Opts {
    fn as_config(&self) -> Config {
        let mut config = Config::builder()
            .use_readability(self.readability)
            .lenient_dates(self.lenient_dates)
            .default_date_to_now(!self.no_default_date);
        if let Some(user_agent) = self.user_agent.clone() {
            config = config.browser_user_agent(user_agent);
        }
        if let Some(timeout) = self.timeout {
            config = config.request_timeout(Duration::from_secs(timeout));
        }
        config.build()
    }
}

#[derive(Debug, Deserialize)]
struct ScrapeRequest {
    link: Option<String>,
}

async fn serve(addr: SocketAddr, config: Config) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/scrape", post(scrape))
        .with_state(Arc::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn scrape(
    State(config): State<Arc<Config>>,
    Json(request): Json<ScrapeRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let link = match request.link.filter(|link| !link.trim().is_empty()) {
        Some(link) => link,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "No URL provided" })),
            )
        }
    };

    match Article::scrape(&link, &config).await {
        Some(record) => (StatusCode::OK, Json(json!(record))),
        None => (StatusCode::OK, Json(json!({ "error": "Failed to scrape" }))),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    App::from_args().run().await
}
