//! Image storage backend selection.
//!
//! `STORAGE_DRIVER=local` (the default) writes uploads under
//! `STORAGE_LOCAL_DIR` and serves them from `STORAGE_PUBLIC_URL`.
//! `STORAGE_DRIVER=s3` targets any S3-compatible bucket and requires
//! `STORAGE_BUCKET`; `STORAGE_ENDPOINT`, `STORAGE_ACCESS_KEY` and
//! `STORAGE_SECRET_KEY` are optional and fall back to the AWS default
//! provider chain.

use std::str::FromStr;

use crate::{ConfigError, required};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageDriver {
    Local,
    S3,
}

impl FromStr for StorageDriver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            other => Err(ConfigError::Invalid {
                name: "STORAGE_DRIVER",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub driver: StorageDriver,
    pub local_dir: String,
    pub public_url: String,
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl StorageConfig {
    pub fn local(local_dir: impl Into<String>, public_url: impl Into<String>) -> Self {
        Self {
            driver: StorageDriver::Local,
            local_dir: local_dir.into(),
            public_url: public_url.into(),
            bucket: None,
            endpoint: None,
            region: "us-east-1".to_string(),
            access_key: None,
            secret_key: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let optional = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let driver = optional("STORAGE_DRIVER")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(StorageDriver::Local);

        let bucket = match driver {
            StorageDriver::S3 => Some(required("STORAGE_BUCKET")?),
            StorageDriver::Local => optional("STORAGE_BUCKET"),
        };

        Ok(Self {
            driver,
            local_dir: optional("STORAGE_LOCAL_DIR").unwrap_or_else(|| "storage/uploads".to_string()),
            public_url: optional("STORAGE_PUBLIC_URL")
                .unwrap_or_else(|| "http://localhost:3000/uploads".to_string()),
            bucket,
            endpoint: optional("STORAGE_ENDPOINT"),
            region: optional("STORAGE_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            access_key: optional("STORAGE_ACCESS_KEY"),
            secret_key: optional("STORAGE_SECRET_KEY"),
        })
    }
}
