use anyhow::Result;
use example_operator::config::OperatorConfig;
use example_operator::crds::*;
use example_operator::object_map::ObjectMap;
use example_operator::watch_cache::{lock, run_watch_cache, watched_api, SharedObjectMap};
use kube::{Client, CustomResourceExt, Resource};
use std::sync::{Arc, Mutex};
use std::env;
use tokio::time::Duration;
use tracing::*;
use tracing_subscriber::EnvFilter;

async fn report_cache(cache: SharedObjectMap, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;
        let (clock_servers, version_servers) = {
            let map = lock(&cache);
            (
                map.count_kind(&ClockServer::kind(&())),
                map.count_kind(&VersionServer::kind(&())),
            )
        };
        info!(clock_servers, version_servers, "Cached objects");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cmd = env::args().nth(1).unwrap_or_default();
    if cmd == "export" {
        info!("exporting custom resource definitions");
        println!("{}", serde_yaml::to_string(&ClockServer::crd())?);
        println!("---");
        println!("{}", serde_yaml::to_string(&VersionServer::crd())?);
    } else if cmd == "run" {
        let config = OperatorConfig::from_env()?;
        info!(namespace = ?config.watch_namespace, "running example-operator");
        let client = Client::try_default().await?;
        let cache: SharedObjectMap = Arc::new(Mutex::new(ObjectMap::new()));

        let clock_servers = run_watch_cache(
            watched_api::<ClockServer>(client.clone(), &config),
            cache.clone(),
            config.retry_after,
        );
        let version_servers = run_watch_cache(
            watched_api::<VersionServer>(client, &config),
            cache.clone(),
            config.retry_after,
        );
        tokio::select! {
            _ = clock_servers => {},
            _ = version_servers => {},
            _ = report_cache(cache, config.report_interval) => {},
            _ = tokio::signal::ctrl_c() => info!("received shutdown signal"),
        }
        info!("operator terminated");
    } else {
        warn!("wrong command; please use \"export\" or \"run\"");
    }
    Ok(())
}
