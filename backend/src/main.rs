//! Backend entry-point: loads settings, prepares storage, and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use titto_backend::inbound::http::health::HealthState;
use titto_backend::inbound::http::session_config::{
    BuildMode, SessionSettings, session_settings_from_env,
};
use titto_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use titto_backend::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let session = load_session_settings(BuildMode::from_debug_assertions())?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    if let Some(pool) = connect_database(&settings).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, config)?.await
}

/// Read the session settings from the process environment.
fn load_session_settings(mode: BuildMode) -> std::io::Result<SessionSettings> {
    session_settings_from_env(&mockable::DefaultEnv::new(), mode).map_err(std::io::Error::other)
}

async fn connect_database(settings: &ServerSettings) -> std::io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url() else {
        return Ok(None);
    };

    if settings.skip_migrations {
        info!("skipping database migrations");
    } else {
        run_pending_migrations(url)
            .await
            .map_err(std::io::Error::other)?;
    }

    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
        .await
        .map_err(std::io::Error::other)?;
    Ok(Some(pool))
}

#[cfg(test)]
mod tests {
    //! Session settings read through the real process environment.

    use std::io::Write;

    use actix_web::cookie::SameSite;
    use env_lock::lock_env;
    use rstest::rstest;
    use tempfile::NamedTempFile;
    use titto_backend::inbound::http::session_config::SESSION_KEY_MIN_LEN;

    use super::*;

    fn key_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temporary key file");
        file.write_all(&[b'k'; SESSION_KEY_MIN_LEN])
            .expect("write key bytes");
        file
    }

    #[rstest]
    fn release_settings_load_from_process_environment() {
        let key = key_file();
        let _guard = lock_env([
            ("SESSION_KEY_FILE", Some(key.path().display().to_string())),
            ("SESSION_COOKIE_SECURE", Some("1".to_owned())),
            ("SESSION_SAMESITE", Some("Strict".to_owned())),
            ("SESSION_ALLOW_EPHEMERAL", Some("0".to_owned())),
        ]);

        let settings = load_session_settings(BuildMode::Release).expect("release settings");

        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    fn release_settings_reject_missing_environment() {
        let _guard = lock_env([
            ("SESSION_KEY_FILE", None::<String>),
            ("SESSION_COOKIE_SECURE", None),
            ("SESSION_SAMESITE", None),
            ("SESSION_ALLOW_EPHEMERAL", None),
        ]);

        let Err(error) = load_session_settings(BuildMode::Release) else {
            panic!("missing toggles");
        };

        assert!(error.to_string().contains("SESSION_COOKIE_SECURE"));
    }
}
