//! BotConfig: BaseConfig + ArticlesConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{ArticlesConfig, BaseConfig};

#[derive(Debug)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub articles: ArticlesConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let articles = ArticlesConfig::from_env()?;
        Ok(Self { base, articles })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.articles.validate()
    }

    pub fn articles(&self) -> &ArticlesConfig {
        &self.articles
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn cache_file(&self) -> &str {
        &self.articles.cache_file
    }
}
