use std::path::PathBuf;

use crate::error::Error;

/// Database used when neither `DATABASE_NAME` nor the connection string names one.
pub const DEFAULT_DATABASE_NAME: &str = "onboarding";

#[derive(serde::Deserialize)]
pub struct StaticConfiguration {
    pub port: u16,
    pub mongo_uri: Option<String>,
    pub database_name: Option<String>,
    pub uploads_directory: PathBuf,
}

impl StaticConfiguration {
    /// The MongoDB connection string. Absent and blank values are both fatal.
    pub fn mongo_uri(&self) -> Result<&str, Error> {
        match self.mongo_uri.as_deref().map(str::trim) {
            Some(uri) if !uri.is_empty() => Ok(uri),
            _ => Err(Error::MissingMongoUri),
        }
    }
}

/// Loads defaults, then `configuration.yaml` (optional), then the process environment.
/// `PORT`, `MONGO_URI`, `DATABASE_NAME` and `UPLOADS_DIRECTORY` map onto the fields above.
pub fn get_static_configuration() -> Result<StaticConfiguration, config::ConfigError> {
    load(config::Environment::default().try_parsing(true))
}

fn load<S>(overrides: S) -> Result<StaticConfiguration, config::ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("port", 5000)?
        .set_default("uploads_directory", "uploads")?
        .add_source(
            config::File::new("configuration.yaml", config::FileFormat::Yaml).required(false),
        )
        .add_source(overrides)
        .build()?;

    settings.try_deserialize::<StaticConfiguration>()
}
