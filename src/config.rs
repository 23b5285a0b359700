use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Students must register with an email under this domain.
    pub student_email_domain: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "campuscode".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "campuscode-users".into()),
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(12),
        };
        let student_email_domain =
            std::env::var("STUDENT_EMAIL_DOMAIN").unwrap_or_else(|_| "panimalar.edu".into());
        Ok(Self {
            database_url,
            jwt,
            student_email_domain,
        })
    }
}
