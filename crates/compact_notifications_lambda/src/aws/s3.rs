use crate::adapters::BlobStore;

pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl BlobStore for S3BlobStore {
    fn fetch_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>, String> {
        let client = self.client.clone();
        let bucket = bucket.to_string();
        let key = key.to_string();

        super::block_on(async move {
            let output = match client.get_object().bucket(&bucket).key(&key).send().await {
                Ok(output) => output,
                Err(error)
                    if error
                        .as_service_error()
                        .map(|service_error| service_error.is_no_such_key())
                        .unwrap_or(false) =>
                {
                    return Ok(None);
                }
                Err(error) => {
                    return Err(format!("failed to read s3://{bucket}/{key}: {error}"));
                }
            };
            output
                .body
                .collect()
                .await
                .map(|data| Some(data.into_bytes().to_vec()))
                .map_err(|error| format!("failed to read body of s3://{bucket}/{key}: {error}"))
        })
    }
}
