use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::{Bytes, BytesMut};
use mime::Mime;
use moka::future::Cache;

use crate::{
    card::Media,
    config::FetchConfig,
    models::{self, MediaSource},
};

/// Downloads avatar and logo images and embeds them as data URIs, so the SVG
/// renderer never has to touch the network itself.
#[derive(Clone)]
pub struct MediaFetcher {
    client: reqwest::Client,
    cache: Cache<String, Bytes>,
    max_bytes: u64,
}

impl MediaFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        let cache = Cache::builder()
            .weigher(|_k: &String, v: &Bytes| v.len().try_into().unwrap_or(u32::MAX))
            .max_capacity(config.cache_capacity)
            .eviction_listener(|url, _v, _cause| {
                tracing::info!("Evicting media from cache: {url}");
            })
            .build();
        Ok(Self { client, cache, max_bytes: config.max_bytes })
    }

    /// Resolve an avatar or logo value into slot artwork. URL values are
    /// fetched and embedded, anything else passes through as text.
    pub async fn media(&self, value: Option<&str>) -> Result<Media> {
        match value.map(models::classify) {
            None => Ok(Media::None),
            Some(MediaSource::Text(text)) => Ok(Media::Text(text.to_string())),
            Some(MediaSource::Url(url)) => {
                let data = self.bytes(url).await?;
                Ok(Media::Image { href: data_uri(&data)? })
            }
        }
    }

    async fn bytes(&self, url: &str) -> Result<Bytes> {
        self.cache
            .try_get_with(url.to_string(), self.download(url))
            .await
            .map_err(|e| anyhow!("Failed to fetch {url}: {e:#}"))
    }

    async fn download(&self, url: &str) -> Result<Bytes> {
        let mut response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            bail!("Unexpected status {}", response.status());
        }
        if let Some(length) = response.content_length()
            && length > self.max_bytes
        {
            bail!("Response too large: {length} bytes");
        }
        // A body with no declared length still gets capped as chunks arrive.
        let mut data = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            if (data.len() + chunk.len()) as u64 > self.max_bytes {
                bail!("Response too large: over {} bytes", self.max_bytes);
            }
            data.extend_from_slice(&chunk);
        }
        Ok(data.freeze())
    }
}

/// Embed raw image data as a data URI. The mime type is sniffed from the
/// content itself, so mislabeled responses still embed correctly.
pub fn data_uri(data: &[u8]) -> Result<String> {
    let mime = sniff_mime(data).context("Unrecognized image data")?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(data)))
}

fn sniff_mime(data: &[u8]) -> Option<Mime> {
    if let Ok(format) = image::guess_format(data) {
        return Mime::from_str(format.to_mime_type()).ok();
    }
    // guess_format does not know SVG; look for an XML prolog or a bare
    // <svg> root.
    let head = String::from_utf8_lossy(&data[..data.len().min(256)]);
    let head = head.trim_start();
    if head.starts_with("<svg") || head.starts_with("<?xml") {
        return Some(mime::IMAGE_SVG);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let mut data = std::io::Cursor::new(Vec::new());
        image::DynamicImage::new_rgba8(4, 4)
            .write_to(&mut data, image::ImageFormat::Png)
            .unwrap();
        data.into_inner()
    }

    #[test]
    fn test_data_uri() {
        let uri = data_uri(&png_bytes()).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_data_uri_svg() {
        let uri = data_uri(b"  <svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_data_uri_unrecognized() {
        assert!(data_uri(b"definitely not an image").is_err());
        assert!(data_uri(b"").is_err());
    }

    #[tokio::test]
    async fn test_media_passthrough() {
        let fetcher = MediaFetcher::new(&FetchConfig::default()).unwrap();
        assert_eq!(fetcher.media(None).await.unwrap(), Media::None);
        assert_eq!(fetcher.media(Some("🦀")).await.unwrap(), Media::Text("🦀".to_string()));
    }

    #[tokio::test]
    async fn test_media_fetch_failure() {
        let fetcher = MediaFetcher::new(&FetchConfig::default()).unwrap();
        // Port 9 (discard) refuses connections.
        let err = fetcher.media(Some("http://127.0.0.1:9/a.png")).await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to fetch"));
    }

    #[tokio::test]
    async fn test_media_over_size_limit() {
        use axum::{Router, body::Body, routing::get};

        // Streamed body without a Content-Length header, larger than the cap.
        let router = Router::new().route(
            "/big.png",
            get(|| async {
                let chunks = (0..64).map(|_| Ok::<_, std::io::Error>(Bytes::from(vec![0u8; 1024])));
                Body::from_stream(futures_util::stream::iter(chunks))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let config = FetchConfig { max_bytes: 16 * 1024, ..FetchConfig::default() };
        let fetcher = MediaFetcher::new(&config).unwrap();
        let err = fetcher.media(Some(&format!("http://{addr}/big.png"))).await.unwrap_err();
        assert!(format!("{err:#}").contains("Response too large"), "{err:#}");
    }
}
