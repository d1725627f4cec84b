use anyhow::{bail, Result};
use image::DynamicImage;
use reqwest::Client;
use std::time::Duration;

/// Cover art downloads, sharing the app-wide HTTP client.
pub struct ArtworkRenderer {
    client: Client,
    timeout: Duration,
}

impl ArtworkRenderer {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub async fn fetch_image(&self, url: &str) -> Result<DynamicImage> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        if !response.status().is_success() {
            bail!("artwork request failed with status {}", response.status());
        }
        let bytes = response.bytes().await?;
        let img = image::load_from_memory(&bytes)?;
        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn png_bytes() -> Vec<u8> {
        let img = RgbImage::from_pixel(2, 2, Rgb([200, 10, 10]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn downloads_and_decodes_cover() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/art/1.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
            .mount(&server)
            .await;

        let renderer = ArtworkRenderer::new(Client::new(), Duration::from_secs(5));
        let img = renderer
            .fetch_image(&format!("{}/art/1.png", server.uri()))
            .await
            .unwrap();
        assert_eq!((img.width(), img.height()), (2, 2));
    }

    #[tokio::test]
    async fn missing_cover_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let renderer = ArtworkRenderer::new(Client::new(), Duration::from_secs(5));
        assert!(renderer
            .fetch_image(&format!("{}/art/missing.png", server.uri()))
            .await
            .is_err());
    }
}
