use anyhow::{Context, Error, Result};
use chromiumoxide::cdp::browser_protocol::network::{EnableParams, EventRequestWillBeSent};
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::{fs, path::Path, str, sync::Arc, time::Duration};
use tokio::sync::oneshot;
use tokio::time;
use tracing::info;
use url::form_urlencoded;

const BROWSER_TIMEOUT: Duration = Duration::from_secs(300);

/// Drive an interactive Google sign-in and capture the ID token the browser
/// posts back to the redirect URI. The redirect URI is never served; the POST
/// is observed on the wire via DevTools network events.
pub async fn authenticate(
    auth_url: &str,
    redirect_uri: &str,
    user_data_dir: &Path,
) -> Result<String> {
    info!("Starting browser sign-in flow");

    let mut browser = launch_browser(user_data_dir).await?;

    let result = time::timeout(
        BROWSER_TIMEOUT,
        capture_id_token(&browser, auth_url, redirect_uri),
    )
    .await
    .context("Sign-in timed out")??;

    browser.close().await.ok();
    browser.wait().await.ok();

    Ok(result)
}

async fn launch_browser(user_data_dir: &Path) -> Result<Browser> {
    fs::create_dir_all(user_data_dir)?;

    let config = BrowserConfig::builder()
        .user_data_dir(user_data_dir)
        .with_head()
        .viewport(None)
        .args(vec![
            "--no-first-run",
            "--no-default-browser-check",
            "--start-maximized",
            "--disable-blink-features=AutomationControlled", // Prevent detection of automation
            "--no-startup-window",                           // Prevent automatic new tab on startup
        ])
        .build()
        .map_err(Error::msg)?;

    let (browser, mut handler) = Browser::launch(config)
        .await
        .context("Failed to launch Chrome")?;

    tokio::spawn(async move { while handler.next().await.is_some() {} });

    Ok(browser)
}

async fn capture_id_token(browser: &Browser, auth_url: &str, redirect_uri: &str) -> Result<String> {
    let page = browser.new_page("about:blank").await?;
    page.execute(EnableParams::default()).await?;

    let (tx, rx) = oneshot::channel();

    // Start monitoring network events
    let page_clone = page.clone();
    let callback_url = redirect_uri.to_string();
    tokio::spawn(async move {
        if let Ok(mut events) = page_clone.event_listener::<EventRequestWillBeSent>().await {
            while let Some(event) = events.next().await {
                if let Some(token) = extract_id_token(&event, &callback_url) {
                    let _ = tx.send(token);
                    return;
                }
            }
        }
    });

    info!("Navigating to Google sign-in page");
    page.goto(auth_url).await?;
    info!("Browser opened. Please complete sign-in in the browser window.");

    // Wait for the ID token POST
    rx.await
        .map_err(|_| anyhow::anyhow!("ID token channel closed"))
}

fn extract_id_token(event: &Arc<EventRequestWillBeSent>, redirect_uri: &str) -> Option<String> {
    if event.request.url != redirect_uri || !event.request.has_post_data.unwrap_or(false) {
        return None;
    }

    event
        .request
        .post_data_entries
        .as_ref()
        .and_then(|entries| {
            let data = entries
                .iter()
                .filter_map(|e| e.bytes.as_ref())
                .filter_map(|b| str::from_utf8(b.as_ref()).ok())
                .collect::<String>();

            // With response_mode=form_post the browser submits a regular
            // urlencoded form: "id_token=xxxxx&state=yyy"
            parse_id_token_response(&data)
        })
}

fn parse_id_token_response(data: &str) -> Option<String> {
    form_urlencoded::parse(data.as_bytes())
        .find(|(k, _)| k == "id_token")
        .map(|(_, v)| v.to_string())
}
