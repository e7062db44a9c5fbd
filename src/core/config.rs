use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// S3-compatible object storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket that receives the uploaded images
    pub bucket: String,
    /// Bucket region, also used to derive the default endpoints
    pub region: String,
    /// S3 API endpoint (custom endpoints such as MinIO use path-style addressing)
    pub endpoint: String,
    /// Scheme-qualified host used to build public object URLs
    pub public_endpoint: String,
    /// Static access key; `None` falls back to the default AWS credential chain
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Maximum number of uploads in flight for a single batch
    pub concurrency_limit: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            upload: UploadConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    // Ten base64-encoded photos plus JSON overhead
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 60 * 1024 * 1024; // 60MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    const DEFAULT_REGION: &'static str = "ap-northeast-2";

    pub fn from_env() -> Result<Self, String> {
        let bucket = env::var("STORAGE_BUCKET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "STORAGE_BUCKET environment variable is required".to_string())?;

        let region = env::var("STORAGE_REGION").unwrap_or_else(|_| Self::DEFAULT_REGION.to_string());

        let endpoint = env::var("STORAGE_ENDPOINT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::default_endpoint(&region));

        let public_endpoint = env::var("STORAGE_PUBLIC_ENDPOINT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::default_public_endpoint(&region));

        // Only use static credentials if they are non-empty
        let access_key = env::var("STORAGE_ACCESS_KEY").ok().filter(|s| !s.is_empty());
        let secret_key = env::var("STORAGE_SECRET_KEY").ok().filter(|s| !s.is_empty());

        Ok(Self {
            bucket,
            region,
            endpoint,
            public_endpoint,
            access_key,
            secret_key,
        })
    }

    pub fn default_endpoint(region: &str) -> String {
        format!("https://s3.{}.amazonaws.com", region)
    }

    pub fn default_public_endpoint(region: &str) -> String {
        format!("https://s3-{}.amazonaws.com", region)
    }
}

impl UploadConfig {
    pub const DEFAULT_CONCURRENCY_LIMIT: usize = 50;

    pub fn from_env() -> Result<Self, String> {
        let concurrency_limit = env::var("UPLOAD_CONCURRENCY_LIMIT")
            .unwrap_or_else(|_| Self::DEFAULT_CONCURRENCY_LIMIT.to_string())
            .parse::<usize>()
            .map_err(|_| "UPLOAD_CONCURRENCY_LIMIT must be a valid number".to_string())?;

        if concurrency_limit == 0 {
            return Err("UPLOAD_CONCURRENCY_LIMIT must be at least 1".to_string());
        }

        Ok(Self { concurrency_limit })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Image Batch Upload API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "All-or-nothing batch image upload to object storage".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
