use crate::{RenderError, RenderResult};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use graphflow::{RenderArtifact, RenderFormat};
use serde_json::Value;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::time::{sleep, timeout};

/// Deadline for each of the two bounded waits (renderer ready, render
/// complete).
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Output format is determined solely by the destination path's
/// extension: `.png` renders a PNG, anything else an SVG.
#[must_use]
pub fn format_for_path(path: &Path) -> RenderFormat {
    if path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("png"))
    {
        RenderFormat::Png
    } else {
        RenderFormat::Svg
    }
}

/// Read and parse a scene description. A failure here aborts before any
/// rendering resource is allocated.
pub fn load_scene(path: &Path) -> RenderResult<Value> {
    let raw = std::fs::read_to_string(path).map_err(|source| RenderError::ReadScene {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| RenderError::ParseScene {
        path: path.display().to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// The fixed local harness page hosting the layout/paint engine.
    pub harness_path: PathBuf,
    pub timeout: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            harness_path: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("harness")
                .join("index.html"),
            timeout: RENDER_TIMEOUT,
        }
    }
}

/// Materializes a scene through a real browser layout/paint pipeline.
///
/// Each render owns an ephemeral sandboxed browser session for its full
/// lifetime; the session is torn down on every exit path and never shared
/// between renders. No retries at any step: a timeout or failure discards
/// all work for the invocation.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Render `scene` and persist the artifact to `out_path`, choosing
    /// the format from the path's extension.
    pub async fn render_to_file(&self, scene: &Value, out_path: &Path) -> RenderResult<()> {
        let format = format_for_path(out_path);
        let artifact = self.render(scene, format).await?;

        let write_result = match artifact {
            RenderArtifact::Svg(markup) => tokio::fs::write(out_path, markup).await,
            RenderArtifact::Png(base64) => {
                let bytes = BASE64_STANDARD.decode(base64)?;
                tokio::fs::write(out_path, bytes).await
            }
        };
        write_result.map_err(|source| RenderError::WriteArtifact {
            path: out_path.display().to_string(),
            source,
        })
    }

    /// Render `scene` to an in-memory artifact of the requested format.
    pub async fn render(&self, scene: &Value, format: RenderFormat) -> RenderResult<RenderArtifact> {
        let harness_url = self.harness_url()?;

        let config = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--allow-file-access-from-files")
            .build()
            .map_err(RenderError::BrowserConfig)?;

        let (mut browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let result = self.drive(&browser, &harness_url, scene, format).await;

        // The session is released unconditionally, success or failure.
        browser.close().await.ok();
        handler_task.abort();

        result
    }

    async fn drive(
        &self,
        browser: &Browser,
        harness_url: &str,
        scene: &Value,
        format: RenderFormat,
    ) -> RenderResult<RenderArtifact> {
        tracing::debug!(harness_url, %format, "loading render harness");
        let page = browser.new_page(harness_url).await?;
        page.wait_for_navigation().await?;

        page.evaluate(inject_globals_script(scene, format)).await?;

        self.wait_until(
            &page,
            "typeof window.renderScene === 'function'",
            "renderer entry point",
        )
        .await?;
        page.evaluate("window.renderScene()").await?;
        self.wait_until(&page, "window.__DONE__ === true", "render completion")
            .await?;

        match format {
            RenderFormat::Svg => {
                let markup: String = page
                    .evaluate("window.__SVG__")
                    .await?
                    .into_value()
                    .map_err(|error| {
                        RenderError::Invariant(format!("no SVG markup exposed: {error}"))
                    })?;
                Ok(RenderArtifact::Svg(markup))
            }
            RenderFormat::Png => {
                let data_url: String = page
                    .evaluate("window.__PNG_BASE64__")
                    .await?
                    .into_value()
                    .map_err(|error| {
                        RenderError::Invariant(format!("no PNG data exposed: {error}"))
                    })?;
                Ok(RenderArtifact::Png(strip_png_data_url(&data_url).to_string()))
            }
        }
    }

    /// Block until `expression` evaluates to true, bounded by the render
    /// deadline. The harness writes its ready/done flags once; this is
    /// the host side of that single-slot completion signal.
    async fn wait_until(
        &self,
        page: &Page,
        expression: &'static str,
        waited: &'static str,
    ) -> RenderResult<()> {
        let poll = async {
            loop {
                let ready = page
                    .evaluate(expression)
                    .await?
                    .into_value::<bool>()
                    .unwrap_or(false);
                if ready {
                    return Ok::<(), RenderError>(());
                }
                sleep(POLL_INTERVAL).await;
            }
        };
        timeout(self.config.timeout, poll)
            .await
            .map_err(|_| RenderError::Timeout {
                waited,
                timeout: self.config.timeout,
            })?
    }

    fn harness_url(&self) -> RenderResult<String> {
        let path = self
            .config
            .harness_path
            .canonicalize()
            .map_err(|source| RenderError::Harness {
                path: self.config.harness_path.display().to_string(),
                source,
            })?;
        Ok(format!("file://{}", path.display()))
    }
}

fn inject_globals_script(scene: &Value, format: RenderFormat) -> String {
    format!("(() => {{ window.__SCENE__ = {scene}; window.__TARGET__ = \"{format}\"; }})()")
}

fn strip_png_data_url(data_url: &str) -> &str {
    data_url.strip_prefix(PNG_DATA_URL_PREFIX).unwrap_or(data_url)
}
