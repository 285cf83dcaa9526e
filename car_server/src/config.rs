//! Car API configuration, loaded from environment variables.

/// Origins allowed to call the API with credentials.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] =
    ["http://localhost:3000", "https://project1-auto.vercel.app"];

#[derive(Clone, Debug)]
pub struct CarsConfig {
    /// Logical database holding the car collection.
    pub database_name: String,
    /// Collection queried by `/cars`.
    pub collection_name: String,
    /// CORS allow-list.
    pub allowed_origins: Vec<String>,
}

impl Default for CarsConfig {
    fn default() -> Self {
        Self {
            database_name: "cars".to_string(),
            collection_name: "cars".to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        }
    }
}

impl CarsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let database_name = lookup("CARS_DB_NAME")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.database_name);
        let collection_name = lookup("CARS_COLLECTION")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.collection_name);
        let allowed_origins = lookup("CARS_ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.allowed_origins);

        Self {
            database_name,
            collection_name,
            allowed_origins,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
