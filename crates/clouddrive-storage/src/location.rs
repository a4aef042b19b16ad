//! Public URL construction for stored objects.

/// Where the bucket lives. Shared by listing and upload confirmation so the URL
/// format is defined once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLocation {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers
    pub endpoint: Option<String>,
}

impl BucketLocation {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Public URL of `key`.
    ///
    /// For AWS S3: `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
    /// For S3-compatible providers, path-style: `{endpoint}/{bucket}/{key}`.
    pub fn object_url(&self, key: &str) -> String {
        match self.endpoint {
            Some(ref endpoint) => {
                let base_url = endpoint.trim_end_matches('/');
                format!("{}/{}/{}", base_url, self.bucket, key)
            }
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aws_url_is_virtual_hosted() {
        let location = BucketLocation::new("drive", "eu-west-1");
        assert_eq!(
            location.object_url("uploads/a-1.txt"),
            "https://drive.s3.eu-west-1.amazonaws.com/uploads/a-1.txt"
        );
    }

    #[test]
    fn custom_endpoint_is_path_style() {
        let location = BucketLocation::new("drive", "us-east-1")
            .with_endpoint(Some("http://localhost:9000/".to_string()));
        assert_eq!(
            location.object_url("uploads/a-1.txt"),
            "http://localhost:9000/drive/uploads/a-1.txt"
        );
    }
}
