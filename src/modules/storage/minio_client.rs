//! MinIO/S3-compatible photo bucket
//!
//! Objects are written with rust-s3. The anonymous-read bucket policy for the public
//! prefix is not covered by rust-s3, so that single request is signed by hand
//! (AWS Signature v4) and sent with reqwest.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::ObjectStore;
use crate::core::config::MinIOConfig;
use crate::core::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    public_prefix: String,
    signer: PolicySigner,
    http_client: Client,
}

impl MinIOClient {
    /// Connect, create the bucket when missing and open the public prefix for reads.
    pub async fn new(config: MinIOConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to open MinIO bucket: {}", e)))?;
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let client = Self {
            bucket,
            region,
            credentials,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            public_endpoint: config.public_endpoint.trim_end_matches('/').to_string(),
            public_prefix: config.public_prefix.trim_matches('/').to_string(),
            signer: PolicySigner {
                access_key: config.access_key,
                secret_key: config.secret_key,
                region: config.region,
            },
            http_client,
        };

        client.ensure_bucket_exists().await;
        client.open_public_prefix().await;

        info!(
            "MinIO storage ready: endpoint={}, bucket={}, public_prefix={}",
            client.endpoint,
            client.bucket.name(),
            client.public_prefix
        );

        Ok(client)
    }

    /// Startup never fails on bucket creation; an existing bucket is the common case.
    async fn ensure_bucket_exists(&self) {
        let created = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match created {
            Ok(_) => info!("Bucket '{}' created", self.bucket.name()),
            Err(e) => {
                let message = e.to_string();
                if message.contains("BucketAlreadyOwnedByYou")
                    || message.contains("BucketAlreadyExists")
                    || message.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
            }
        }
    }

    async fn open_public_prefix(&self) {
        let bucket_name = self.bucket.name();
        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Principal": {"AWS": "*"},
                "Action": ["s3:GetObject"],
                "Resource": [format!("arn:aws:s3:::{}/{}/*", bucket_name, self.public_prefix)]
            }]
        })
        .to_string();

        if let Err(e) = self.put_bucket_policy(&bucket_name, &policy).await {
            warn!(
                "Failed to set read policy on {}/{}: {}. Set it manually with: mc anonymous set download minio/{}/{}",
                bucket_name, self.public_prefix, e, bucket_name, self.public_prefix
            );
        } else {
            info!("Public read enabled for {}/{}/*", bucket_name, self.public_prefix);
        }
    }

    async fn put_bucket_policy(&self, bucket_name: &str, policy: &str) -> Result<()> {
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid MinIO endpoint: {}", e)))?;
        let host = endpoint
            .host_str()
            .ok_or_else(|| AppError::Internal("MinIO endpoint has no host".to_string()))?;
        let host = match endpoint.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let signed = self.signer.sign_put(
            Utc::now(),
            &host,
            &format!("/{}", bucket_name),
            "policy=",
            policy.as_bytes(),
        )?;

        let response = self
            .http_client
            .put(format!("{}/{}?policy", self.endpoint, bucket_name))
            .header("Host", &host)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.payload_hash)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Policy request failed: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalServiceError(format!(
            "Bucket policy rejected: {} - {}",
            status, body
        )))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key)
    }
}

#[async_trait]
impl ObjectStore for MinIOClient {
    async fn put_public(&self, path: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        let key = format!("{}/{}", self.public_prefix, path.trim_start_matches('/'));

        self.bucket
            .put_object_with_content_type(&key, &data, content_type)
            .await
            .map_err(|e| {
                tracing::error!("Failed to upload '{}': {}", key, e);
                AppError::ExternalServiceError(format!("Failed to upload photo: {}", e))
            })?;

        debug!("Uploaded '{}' ({} bytes)", key, data.len());
        Ok(self.public_url(&key))
    }
}

/// Headers produced by signing one request
struct SignedRequest {
    amz_date: String,
    payload_hash: String,
    authorization: String,
}

/// AWS Signature v4 for the S3 service, PUT requests only
struct PolicySigner {
    access_key: String,
    secret_key: String,
    region: String,
}

impl PolicySigner {
    const ALGORITHM: &'static str = "AWS4-HMAC-SHA256";
    const SIGNED_HEADERS: &'static str = "host;x-amz-content-sha256;x-amz-date";

    fn sign_put(
        &self,
        now: DateTime<Utc>,
        host: &str,
        uri: &str,
        query: &str,
        payload: &[u8],
    ) -> Result<SignedRequest> {
        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let payload_hash = hex::encode(Sha256::digest(payload));

        let canonical_request = format!(
            "PUT\n{}\n{}\nhost:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n\n{}\n{}",
            uri,
            query,
            host,
            payload_hash,
            amz_date,
            Self::SIGNED_HEADERS,
            payload_hash
        );

        let scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            Self::ALGORITHM,
            amz_date,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let mut key = hmac_sha256(
            format!("AWS4{}", self.secret_key).as_bytes(),
            date_stamp.as_bytes(),
        )?;
        for part in [self.region.as_bytes(), b"s3".as_slice(), b"aws4_request".as_slice()] {
            key = hmac_sha256(&key, part)?;
        }
        let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

        Ok(SignedRequest {
            authorization: format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                Self::ALGORITHM,
                self.access_key,
                scope,
                Self::SIGNED_HEADERS,
                signature
            ),
            amz_date,
            payload_hash,
        })
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
