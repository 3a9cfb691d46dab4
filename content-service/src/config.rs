use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub queue: QueueConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub region: String,
    pub bucket: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    pub queue_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("CONTENT_SERVICE_PORT")
                    .unwrap_or_else(|_| "8086".to_string())
                    .parse()?,
            },
            storage: StorageConfig {
                region: std::env::var("AWS_REGION").unwrap_or_else(|_| "ap-south-1".to_string()),
                bucket: std::env::var("QA_BASE_BUCKET_NAME")?,
            },
            queue: QueueConfig {
                queue_url: std::env::var("QA_BASE_SQS_QUEUE_URL")?,
            },
        })
    }
}
