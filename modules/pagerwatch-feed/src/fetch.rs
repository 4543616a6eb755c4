use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::Result;

/// Bound on the feed request so a hung upstream cannot stall a poll cycle.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of raw pager message candidates, one batch per poll cycle.
#[async_trait]
pub trait PagerFeed: Send + Sync {
    /// Fetch the current batch of candidate message texts. A non-success
    /// response is an empty batch, not an error; only transport failures
    /// return Err.
    async fn fetch_candidates(&self) -> Result<Vec<String>>;
}

/// Fetches the CFA pager page over HTTP and extracts one candidate per
/// table cell.
pub struct HttpPagerFeed {
    url: String,
    http: reqwest::Client,
}

impl HttpPagerFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PagerFeed for HttpPagerFeed {
    async fn fetch_candidates(&self) -> Result<Vec<String>> {
        let resp = self
            .http
            .get(&self.url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        if !resp.status().is_success() {
            debug!(status = %resp.status(), url = self.url.as_str(), "Pager feed returned non-success");
            return Ok(Vec::new());
        }

        let body = resp.text().await?;
        Ok(extract_cells(&body))
    }
}

/// Extract the trimmed text of every `<td>` cell in the page. Empty cells
/// are dropped.
pub fn extract_cells(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let cell_selector = Selector::parse("td").unwrap();

    document
        .select(&cell_selector)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on an ephemeral local port.
    async fn serve_once(response: String) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        addr
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: text/html\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[tokio::test]
    async fn non_success_status_yields_empty_batch() {
        let addr = serve_once(http_response("500 Internal Server Error", "down")).await;
        let feed = HttpPagerFeed::new(format!("http://{addr}/"));

        let candidates = feed.fetch_candidates().await.expect("500 is not an error");
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn success_status_yields_cell_candidates() {
        let body = "<table><tr><td>@@ALERT REF1 one</td><td>@@ALERT REF2 two</td></tr></table>";
        let addr = serve_once(http_response("200 OK", body)).await;
        let feed = HttpPagerFeed::new(format!("http://{addr}/"));

        let candidates = feed.fetch_candidates().await.unwrap();
        assert_eq!(candidates, vec!["@@ALERT REF1 one", "@@ALERT REF2 two"]);
    }

    #[test]
    fn extracts_cell_text() {
        let html = r#"
            <html><body><table>
              <tr><td>@@ALERT REF1 msg one</td></tr>
              <tr><td>  @@ALERT REF2 msg two  </td></tr>
            </table></body></html>
        "#;
        let cells = extract_cells(html);
        assert_eq!(cells, vec!["@@ALERT REF1 msg one", "@@ALERT REF2 msg two"]);
    }

    #[test]
    fn empty_and_whitespace_cells_dropped() {
        let html = "<table><tr><td></td><td>   </td><td>kept</td></tr></table>";
        assert_eq!(extract_cells(html), vec!["kept"]);
    }

    #[test]
    fn nested_markup_flattened() {
        let html = "<table><tr><td><b>@@ALERT</b> REF1 <i>rest</i></td></tr></table>";
        assert_eq!(extract_cells(html), vec!["@@ALERT REF1 rest"]);
    }

    #[test]
    fn page_without_cells_yields_nothing() {
        assert!(extract_cells("<html><body><p>maintenance</p></body></html>").is_empty());
    }
}
