use mockito::{Mock, Server, ServerGuard};

use schlagzeile::article::{NO_CONTENT, NO_DATE};
use schlagzeile::{Article, Config};

const ARTICLE: &str = include_str!("fixtures/article.html");
const UNMARKED: &str = include_str!("fixtures/unmarked.html");

async fn page(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::new_async().await;
    let mock = page(&mut server, "/news/1", ARTICLE).await;
    let url = format!("{}/news/1", server.url());

    let article = Article::builder(&url)?.get().await?;
    let record = article.record;

    assert_eq!(record.title, "Bridge closed for the winter");
    assert_eq!(record.image_url, format!("{}/img/lead.jpg", server.url()));
    assert_eq!(
        record.content,
        "The council said on Monday that the bridge will be closed for the winter. \
         Drivers will have to use the ring road with a detour"
    );
    assert_eq!(record.published_at, "2023-05-01T12:00:00+00:00");
    assert_eq!(record.source_url, url);
    assert_eq!(record.original_url, None);
    assert!(record.is_complete());

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn missing_content_still_returns_record() {
    let mut server = Server::new_async().await;
    let _mock = page(
        &mut server,
        "/news/2",
        "<html><head><title>Only a title</title></head><body><p>loose</p></body></html>",
    )
    .await;
    let url = format!("{}/news/2", server.url());
    let config = Config::builder().default_date_to_now(false).build();

    let record = Article::scrape(&url, &config).await.unwrap();
    assert_eq!(record.title, "Only a title");
    assert_eq!(record.content, NO_CONTENT);
    assert_eq!(record.published_at, NO_DATE);
}

#[tokio::test]
async fn fetch_failure_is_none() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/gone")
        .with_status(404)
        .expect(2)
        .create_async()
        .await;
    let url = format!("{}/gone", server.url());

    assert!(Article::scrape(&url, &Config::default()).await.is_none());
    assert!(Article::builder(&url).unwrap().get().await.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_host_is_none() {
    let config = Config::builder()
        .request_timeout(std::time::Duration::from_secs(1))
        .build();
    assert!(Article::scrape("http://127.0.0.1:1/news", &config)
        .await
        .is_none());
}

#[tokio::test]
async fn redirect_wrapper_resolved() {
    let mut server = Server::new_async().await;
    let wrapper = server
        .mock("HEAD", "/rss/articles/abc")
        .with_status(302)
        .with_header("location", "/news/1")
        .create_async()
        .await;
    let _head = server
        .mock("HEAD", "/news/1")
        .with_status(200)
        .create_async()
        .await;
    let _page = page(&mut server, "/news/1", ARTICLE).await;

    let original = format!("{}/rss/articles/abc", server.url());
    let config = Config::builder()
        .redirect_patterns(vec!["/rss/articles/"])
        .build();

    let record = Article::scrape(&original, &config).await.unwrap();
    assert_eq!(record.source_url, format!("{}/news/1", server.url()));
    assert_eq!(record.original_url.as_deref(), Some(original.as_str()));
    assert_eq!(record.title, "Bridge closed for the winter");
    wrapper.assert_async().await;
}

#[tokio::test]
async fn failed_redirect_uses_original_url() {
    let mut server = Server::new_async().await;
    let head = server
        .mock("HEAD", "/rss/articles/abc")
        .with_status(404)
        .create_async()
        .await;
    let get = page(&mut server, "/rss/articles/abc", ARTICLE).await;

    let original = format!("{}/rss/articles/abc", server.url());
    let config = Config::builder()
        .redirect_patterns(vec!["/rss/articles/"])
        .build();

    let record = Article::scrape(&original, &config).await.unwrap();
    assert_eq!(record.source_url, original);
    assert_eq!(record.original_url, None);
    assert_eq!(record.published_at, "2023-05-01T12:00:00+00:00");
    head.assert_async().await;
    get.assert_async().await;
}

#[tokio::test]
async fn plain_url_is_not_resolved() {
    let mut server = Server::new_async().await;
    let head = server
        .mock("HEAD", "/news/1")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;
    let _page = page(&mut server, "/news/1", ARTICLE).await;

    let url = format!("{}/news/1", server.url());
    assert!(Article::scrape(&url, &Config::default()).await.is_some());
    head.assert_async().await;
}

#[tokio::test]
async fn fetch_follows_redirects() {
    let mut server = Server::new_async().await;
    let _moved = server
        .mock("GET", "/old")
        .with_status(301)
        .with_header("location", "/news/1")
        .create_async()
        .await;
    let _page = page(&mut server, "/news/1", ARTICLE).await;

    let original = format!("{}/old", server.url());
    let record = Article::scrape(&original, &Config::default())
        .await
        .unwrap();
    assert_eq!(record.source_url, format!("{}/news/1", server.url()));
    assert_eq!(record.original_url.as_deref(), Some(original.as_str()));
}

#[tokio::test]
async fn readability_variant() {
    let mut server = Server::new_async().await;
    let _page = page(&mut server, "/coast", UNMARKED).await;
    let url = format!("{}/coast", server.url());

    let selectors = Article::scrape(&url, &Config::default()).await.unwrap();
    assert_eq!(selectors.title, "Harbour reopens after storm | Coast Times");
    assert_eq!(selectors.content, NO_CONTENT);

    let config = Config::builder().use_readability(true).build();
    let readability = Article::scrape(&url, &config).await.unwrap();
    assert_eq!(readability.title, "Harbour reopens after storm");
    assert!(readability
        .content
        .starts_with("The harbour was reopened on Friday"));
    assert!(readability.content.ends_with("the port said."));
    assert!(!readability.content.contains("More from the coast"));
}

#[tokio::test]
async fn readability_falls_back_to_selectors() {
    let mut server = Server::new_async().await;
    let _page = page(
        &mut server,
        "/short",
        "<html><head><title>Page</title></head><body><h1>Short</h1><article>Tiny</article></body></html>",
    )
    .await;
    let url = format!("{}/short", server.url());
    let config = Config::builder().use_readability(true).build();

    let record = Article::scrape(&url, &config).await.unwrap();
    assert_eq!(record.title, "Short");
    assert_eq!(record.content, "Tiny");
}
