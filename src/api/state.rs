use aws_config::{BehaviorVersion, Region};
use prometheus::Registry;
use std::path::PathBuf;
use std::sync::Arc;

use super::metrics::Metrics;
use crate::core::{DocumentError, DocumentResult, PdfConfig};
use crate::pdf::PdfGenerator;
use crate::storage::{DynamoDbClient, MetadataStore, ObjectStore, S3Client};

/// Handles shared by every request. Nothing in here is mutated per request.
#[derive(Clone)]
pub struct ApiState {
    pub object_store: Arc<dyn ObjectStore>,
    pub metadata_store: Arc<dyn MetadataStore>,
    pub pdf_generator: Arc<PdfGenerator>,
    pub metrics: Metrics,
    pub config: Arc<AppConfig>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub aws_region: String,
    pub table_name: String,
    pub bucket: String,
    pub temp_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            aws_region: "us-east-2".to_string(),
            table_name: "verdant-dev-invoices".to_string(),
            bucket: "verdant-dev-invoices".to_string(),
            temp_dir: std::env::temp_dir(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> DocumentResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from a variable lookup, falling back to defaults for
    /// anything unset.
    pub fn from_vars<F>(lookup: F) -> DocumentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = AppConfig::default();

        Ok(AppConfig {
            aws_region: lookup("AWS_REGION").unwrap_or(default.aws_region),
            table_name: lookup("DDB_TABLE").unwrap_or(default.table_name),
            bucket: lookup("S3_BUCKET").unwrap_or(default.bucket),
            temp_dir: lookup("TEMP_DIR").map(PathBuf::from).unwrap_or(default.temp_dir),
            host: lookup("HOST").unwrap_or(default.host),
            port: parse_var(&lookup, "PORT", default.port)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> DocumentResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| DocumentError::Config(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}

impl ApiState {
    /// Connects the AWS-backed stores for the configured region.
    pub async fn new(config: AppConfig, registry: Registry) -> anyhow::Result<Self> {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .load()
            .await;

        let object_store = Arc::new(S3Client::new(&aws_config));
        let metadata_store = Arc::new(DynamoDbClient::new(&aws_config, config.table_name.clone()));

        tracing::info!(
            region = %config.aws_region,
            bucket = %config.bucket,
            table = %config.table_name,
            "AWS clients initialized"
        );

        Ok(Self::with_stores(
            config,
            object_store,
            metadata_store,
            Metrics::new(registry)?,
        ))
    }

    pub fn with_stores(
        config: AppConfig,
        object_store: Arc<dyn ObjectStore>,
        metadata_store: Arc<dyn MetadataStore>,
        metrics: Metrics,
    ) -> Self {
        let pdf_generator = Arc::new(PdfGenerator::new(
            PdfConfig::default(),
            config.temp_dir.clone(),
        ));

        ApiState {
            object_store,
            metadata_store,
            pdf_generator,
            metrics,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_vars(lookup(&[])).unwrap();
        assert_eq!(config.aws_region, "us-east-2");
        assert_eq!(config.table_name, "verdant-dev-invoices");
        assert_eq!(config.bucket, "verdant-dev-invoices");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AppConfig::from_vars(lookup(&[
            ("AWS_REGION", "eu-west-1"),
            ("DDB_TABLE", "docs"),
            ("S3_BUCKET", "pdfs"),
            ("TEMP_DIR", "/var/tmp"),
            ("PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.aws_region, "eu-west-1");
        assert_eq!(config.table_name, "docs");
        assert_eq!(config.bucket, "pdfs");
        assert_eq!(config.temp_dir, PathBuf::from("/var/tmp"));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn signed_url_lifetime_is_not_read_from_the_environment() {
        let config = AppConfig::from_vars(lookup(&[("SIGNED_URL_TTL_SECS", "700000")])).unwrap();
        let default = AppConfig::default();
        assert_eq!(config.bucket, default.bucket);
        assert_eq!(config.port, default.port);
        assert_eq!(crate::storage::SIGNED_URL_TTL.as_secs(), 3600);
    }

    #[test]
    fn bad_numbers_are_config_errors() {
        let err = AppConfig::from_vars(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, DocumentError::Config(_)));
    }
}
