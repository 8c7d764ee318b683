use std::sync::Arc;
use std::{env, fs};

use reqwest::Url;
use serde::Deserialize;

use crate::controller::ToggleController;
use crate::dom::MemoryDocument;
use crate::errors::LikeButtonError;
use crate::markup::MarkupConfig;
use crate::models::action::DisplayState;
use crate::models::action_url::ActionUrl;
use crate::request::RequestLayer;
use crate::token::{CsrfConfig, TokenProvider};
use crate::transport::HttpTransport;

pub const COOKIE_ENV: &str = "LIKEBUTTON_COOKIE";

#[derive(Deserialize, Debug, Clone)]
pub struct PageConfig {
    pub origin: String,
    #[serde(default)]
    pub cookie: Option<String>,
}

/// A button as the server rendered it on page load.
#[derive(Deserialize, Debug, Clone)]
pub struct RenderedButton {
    pub item_id: String,
    pub url: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub page: PageConfig,
    #[serde(default)]
    pub csrf: CsrfConfig,
    #[serde(default)]
    pub markup: MarkupConfig,
    #[serde(default)]
    pub buttons: Vec<RenderedButton>,
}

#[derive(Clone)]
pub struct App {
    pub config: Config,
    pub origin: Url,
}

impl App {
    pub fn new() -> Result<Self, LikeButtonError> {
        dotenv::dotenv().ok();

        let env = env::var("ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config.{}.toml", env);

        let contents = fs::read_to_string(&config_file)
            .map_err(|e| LikeButtonError::ConfigError(format!("Unable to read {}: {}", config_file, e)))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, LikeButtonError> {
        let config: Config = toml::from_str(contents)?;
        let origin = Url::parse(&config.page.origin)
            .map_err(|e| LikeButtonError::InvalidUrl(format!("{}: {}", config.page.origin, e)))?;

        Ok(Self { config, origin })
    }

    /// Init processes that need to run once on startup
    pub fn init(&self) -> Result<Arc<TokenProvider>, LikeButtonError> {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

        TokenProvider::init(self.token_provider())
    }

    /// Environment wins over the config file so tokens need not be committed.
    pub fn cookie(&self) -> Option<String> {
        env::var(COOKIE_ENV).ok().or_else(|| self.config.page.cookie.clone())
    }

    pub fn token_provider(&self) -> TokenProvider {
        TokenProvider::new(self.config.csrf.clone(), self.cookie().as_deref())
    }

    /// Builds the headless page from the configured buttons, the way the server would render it.
    pub fn render_page(&self) -> Result<MemoryDocument, LikeButtonError> {
        let markup = &self.config.markup;
        let document = MemoryDocument::new();

        for rendered in &self.config.buttons {
            let action = ActionUrl::parse(&rendered.url)?.action();
            let counter_name = format!("{}{}", markup.counter_prefix, rendered.item_id);

            let button = document.append(
                "a",
                &[
                    (markup.action_attribute.as_str(), markup.action_marker.as_str()),
                    (markup.item_id_attribute.as_str(), rendered.item_id.as_str()),
                    (markup.url_attribute.as_str(), rendered.url.as_str()),
                ],
            );
            document.append_child(
                button,
                &markup.icon_tag,
                &[("class", markup.icon_class(DisplayState::for_action(action)))],
            );
            document.append_text(
                "span",
                &[(markup.counter_attribute.as_str(), counter_name.as_str())],
                &rendered.count.to_string(),
            );
        }

        Ok(document)
    }

    pub fn controller(
        &self,
        tokens: Arc<TokenProvider>,
    ) -> Result<ToggleController<MemoryDocument, HttpTransport>, LikeButtonError> {
        let document = Arc::new(self.render_page()?);
        let requests = RequestLayer::new(HttpTransport::default(), tokens, self.origin.clone());

        Ok(ToggleController::new(document, requests, self.config.markup.clone()))
    }
}
