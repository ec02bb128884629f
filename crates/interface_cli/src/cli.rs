//! Command-line arguments

use clap::Parser;

use domain_fund::crawl::{CrawlConfig, DEFAULT_MAX_PAGES};
use infra_db::DatabaseConfig;
use infra_source::SourceConfig;

#[derive(Debug, Parser)]
#[command(name = "fund-crawl")]
#[command(about = "Crawl a fund's NAV history into the database", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Fund code to crawl, e.g. 000962
    #[arg(short, long, env = "FUND_CODE")]
    pub code: String,

    /// Stop after this many pages even if the source keeps returning rows
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: u32,

    /// NAV source endpoint (overrides SOURCE_BASE_URL)
    #[arg(long)]
    pub source_url: Option<String>,

    /// Database host (overrides DB_HOST)
    #[arg(long)]
    pub db_host: Option<String>,

    /// Database port (overrides DB_PORT)
    #[arg(long)]
    pub db_port: Option<u16>,

    /// Database user (overrides DB_USER)
    #[arg(long)]
    pub db_user: Option<String>,

    /// Database password (overrides DB_PASSWORD)
    #[arg(long)]
    pub db_password: Option<String>,

    /// Database name (overrides DB_DATABASE)
    #[arg(long)]
    pub db_name: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the crawl report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Applies the database flags on top of `base`
    pub fn database_config(&self, base: DatabaseConfig) -> DatabaseConfig {
        let mut config = base;
        if let Some(host) = &self.db_host {
            config = config.host(host.as_str());
        }
        if let Some(port) = self.db_port {
            config = config.port(port);
        }
        if let Some(user) = &self.db_user {
            config = config.user(user.as_str());
        }
        if let Some(password) = &self.db_password {
            config = config.password(password.as_str());
        }
        if let Some(name) = &self.db_name {
            config = config.database(name.as_str());
        }
        config
    }

    /// Applies `--source-url` on top of `base`
    pub fn source_config(&self, base: SourceConfig) -> SourceConfig {
        match &self.source_url {
            Some(url) => base.base_url(url.as_str()),
            None => base,
        }
    }

    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::default().max_pages(self.max_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments() {
        let cli = Cli::try_parse_from(["fund-crawl", "-c", "000962"]).unwrap();

        assert_eq!(cli.code, "000962");
        assert_eq!(cli.max_pages, DEFAULT_MAX_PAGES);
        assert!(!cli.json);
        assert_eq!(cli.database_config(DatabaseConfig::default()), DatabaseConfig::default());
        assert_eq!(cli.source_config(SourceConfig::default()), SourceConfig::default());
    }

    #[test]
    fn test_code_is_required() {
        assert!(Cli::try_parse_from(["fund-crawl"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "fund-crawl",
            "--code",
            "000962",
            "--max-pages",
            "20",
            "--source-url",
            "http://localhost:9000/nav",
            "--db-host",
            "db",
            "--db-port",
            "6543",
            "--db-user",
            "crawler",
            "--db-password",
            "secret",
            "--db-name",
            "nav",
        ])
        .unwrap();

        let db = cli.database_config(DatabaseConfig::default());
        assert_eq!(db.display_url(), "postgres://crawler@db:6543/nav");
        assert_eq!(db.password, "secret");
        assert_eq!(cli.source_config(SourceConfig::default()).base_url, "http://localhost:9000/nav");
        assert_eq!(cli.crawl_config().max_pages, 20);
    }
}
