//! `resolver-ops` -- resolver operation generator.
//!
//! Reads the registrar, resolver and reverse-resolution snapshots from a
//! data directory, computes the corrective resolver operations and writes
//! them as `ImportResolverRecordOperations.csv` for the import routine.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default                   | Description                         |
//! |-------------------------|----------|---------------------------|-------------------------------------|
//! | `RESOLVER_OPS_DATA_DIR` | no       | `./scripts/features/data` | Snapshot directory                  |
//! | `RESOLVER_OPS_OUTPUT`   | no       | `<data dir>/ImportResolverRecordOperations.csv` | Operation log path |
//! | `RESOLVER_OPS_VERIFY`   | no       | `false`                   | Replay the log and report leftovers |

use resolver_ops_generator::{generate, GeneratorConfig};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "resolver_ops_generator=info,resolver_ops_snapshot=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GeneratorConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        data_dir = %config.data_dir.display(),
        output = %config.output.display(),
        verify = config.verify,
        "Generating resolver operations",
    );

    match generate(&config).await {
        Ok(report) => {
            tracing::info!(
                operations = report.operations,
                output = %report.output.display(),
                "Resolver operations generated",
            );
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Resolver operation generation failed");
            std::process::exit(1);
        }
    }
}
