//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::CloudConfig;
use crate::error::{Error, Result};
use crate::http::{RequestConfig, ServiceClient};
use crate::pagination::{GenericPage, Pager};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::num::NonZeroUsize;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    env: CloudConfig,
}

impl Runner {
    /// Create a runner that falls back to `OS_*` environment variables
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            env: CloudConfig::from_env(),
        }
    }

    /// Replace the environment fallback
    #[must_use]
    pub fn with_env(mut self, env: CloudConfig) -> Self {
        self.env = env;
        self
    }

    /// Run the CLI command, printing to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with(&mut out).await
    }

    /// Run the CLI command, printing to `out`
    pub async fn run_with<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Get { path, key } => self.get(out, path, key.as_deref()).await,
            Commands::List {
                path,
                key,
                max_pages,
            } => self.list(out, path, key.as_deref(), *max_pages).await,
            Commands::Config => self.show_config(out),
        }
    }

    /// Config file, then environment, then command-line overrides
    pub fn resolve_config(&self) -> Result<CloudConfig> {
        let file = match &self.cli.config {
            Some(path) => {
                debug!("loading config from {}", path.display());
                CloudConfig::from_file(path)?
            }
            None => CloudConfig::default(),
        };

        let mut config = file.or(self.env.clone());
        if let Some(endpoint) = &self.cli.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        if let Some(token) = &self.cli.token {
            config = config.with_token(token.clone());
        }
        Ok(config)
    }

    fn client(&self) -> Result<ServiceClient> {
        let config = self.resolve_config()?;
        let client = ServiceClient::from_config(&config)?;
        debug!("using endpoint {}", client.endpoint());
        Ok(client)
    }

    async fn get<W: Write>(&self, out: &mut W, path: &str, key: Option<&str>) -> Result<()> {
        let client = self.client()?;
        let raw = client.get(path, RequestConfig::new()).await?;
        let body: Value = raw.extract_into()?;

        let value = match key {
            Some(k) => body
                .get(k)
                .cloned()
                .ok_or_else(|| Error::shape(k, "key not found in response body"))?,
            None => body,
        };
        self.emit(out, &value)
    }

    async fn list<W: Write>(
        &self,
        out: &mut W,
        path: &str,
        key: Option<&str>,
        max_pages: Option<NonZeroUsize>,
    ) -> Result<()> {
        let client = self.client()?;
        let mut pager: Pager<'_, GenericPage> = Pager::new(&client, path);

        let mut pages = 0;
        let mut total = 0;
        pager
            .each_page(|page: &GenericPage| {
                let items = match key {
                    Some(k) => page.items_at(k)?,
                    None => page.items()?,
                };
                for item in &items {
                    self.emit(out, item)?;
                }
                pages += 1;
                total += items.len();
                Ok::<_, Error>(max_pages.map_or(true, |max| pages < max.get()))
            })
            .await?;

        info!("listed {total} item(s) from {pages} page(s)");
        Ok(())
    }

    fn show_config<W: Write>(&self, out: &mut W) -> Result<()> {
        let config = self.resolve_config()?.masked();
        match self.cli.format {
            OutputFormat::Json => self.emit(out, &config),
            OutputFormat::Pretty => {
                write!(out, "{}", serde_yaml::to_string(&config)?)?;
                Ok(())
            }
        }
    }

    fn emit<W: Write, T: Serialize>(&self, out: &mut W, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        writeln!(out, "{text}")?;
        Ok(())
    }
}
