pub trait BlobStore: Send + Sync {
    /// `Ok(None)` when the object does not exist.
    fn fetch_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>, String>;
}
