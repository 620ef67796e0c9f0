use alloy::signers::local::PrivateKeySigner;
use relayer_core::RelayerConfig;
use relayer_db::{DatabaseConfig, DatabasePool};
use relayer_matcher::{ChainSubmitter, MatchingEngine};
use relayer_processor::EventProcessor;
use relayer_redis::{ExhaustionCache, Publisher, RedisConfig, RedisConnection};
use relayer_sync::ChainWatcher;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("relayer_sync=info".parse()?)
                .add_directive("relayer_processor=info".parse()?),
        )
        .init();

    info!("cdex relayer starting...");

    let config = match RelayerConfig::load() {
        Ok(config) => {
            info!(
                bridge = %config.contracts.bridge.address,
                exchange = %config.contracts.exchange.address,
                orderbook = %config.contracts.orderbook.address,
                order_matcher = %config.contracts.order_matcher.address,
                "Configuration loaded"
            );
            config
        }
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Database (fatal if unreachable; the store must mirror chain truth)
    let db = {
        let db_config = match DatabaseConfig::from_env() {
            Ok(db_config) => db_config,
            Err(e) => {
                error!(error = %e, "Failed to load database configuration");
                std::process::exit(1);
            }
        };
        match DatabasePool::new(&db_config).await {
            Ok(pool) => {
                if let Err(e) = pool.migrate().await {
                    error!(error = %e, "Failed to run database migrations");
                    std::process::exit(1);
                }
                pool
            }
            Err(e) => {
                error!(error = %e, "Failed to connect to database");
                std::process::exit(1);
            }
        }
    };

    // Redis: pub/sub fan-out plus the exhaustion hint cache
    let redis = {
        let redis_config = match RedisConfig::from_env() {
            Ok(redis_config) => redis_config,
            Err(e) => {
                error!(error = %e, "Failed to load Redis configuration");
                std::process::exit(1);
            }
        };
        match RedisConnection::new(redis_config).await {
            Ok(conn) => Arc::new(conn),
            Err(e) => {
                error!(error = %e, "Failed to connect to Redis");
                std::process::exit(1);
            }
        }
    };
    if let Err(e) = redis.health_check().await {
        error!(error = %e, "Redis health check failed");
        std::process::exit(1);
    }
    let publisher = Arc::new(Publisher::new(redis.clone()));
    let flags = Arc::new(ExhaustionCache::new(redis));

    // Matcher account keystore
    let signer = match unlock_keystore(&config) {
        Ok(signer) => signer,
        Err(e) => {
            error!(error = %e, "Failed to unlock matcher keystore");
            std::process::exit(1);
        }
    };
    info!(matcher = %signer.address(), "Matcher account unlocked");

    let submitter = match ChainSubmitter::connect(
        config.exchange_rpc_url(),
        config.contracts.order_matcher.address,
        signer,
    )
    .await
    {
        Ok(submitter) => Arc::new(submitter),
        Err(e) => {
            error!(error = %e, "Failed to connect matcher to exchange RPC");
            std::process::exit(1);
        }
    };

    let matcher = Arc::new(MatchingEngine::new(db.inner().clone(), submitter, flags));
    let processor = Arc::new(EventProcessor::new(db.inner().clone(), publisher, matcher));

    // One watcher per chain; losing either is fatal, the relayer must not
    // continue half-deaf.
    let mut exchange_task = tokio::spawn(ChainWatcher::exchange(&config, processor.clone()).run());
    let mut bridge_task = tokio::spawn(ChainWatcher::bridge(&config, processor).run());

    info!("Relayer running");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        res = &mut exchange_task => {
            report_watcher_exit("exchange", res);
            std::process::exit(1);
        }
        res = &mut bridge_task => {
            report_watcher_exit("bridge", res);
            std::process::exit(1);
        }
    }

    // Graceful shutdown
    exchange_task.abort();
    bridge_task.abort();
    db.close().await;

    info!("Relayer shutdown complete");
    Ok(())
}

fn unlock_keystore(config: &RelayerConfig) -> relayer_core::Result<PrivateKeySigner> {
    let password = std::fs::read_to_string(&config.keystore_password_path)?;
    PrivateKeySigner::decrypt_keystore(&config.keystore_path, password.trim())
        .map_err(|e| relayer_core::RelayerError::Keystore(e.to_string()))
}

fn report_watcher_exit(
    network: &str,
    result: Result<relayer_core::Result<()>, tokio::task::JoinError>,
) {
    match result {
        Ok(Err(e)) => error!(network, error = %e, "Watcher failed"),
        Ok(Ok(())) => error!(network, "Watcher exited unexpectedly"),
        Err(e) => error!(network, error = %e, "Watcher task panicked"),
    }
}
