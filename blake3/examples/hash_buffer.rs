use arbor_blake3::{Hasher, HasherError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, info_span};
use tracing_forest::ForestLayer;
use tracing_forest::util::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

const INPUT_LEN: usize = 1 << 24;

fn main() -> Result<(), HasherError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let mut input = vec![0u8; INPUT_LEN];
    SmallRng::seed_from_u64(0).fill(&mut input[..]);

    let mut hasher = Hasher::new();
    let serial = info_span!("serial update").in_scope(|| {
        hasher.update(&input)?;
        hasher.finalize()
    })?;

    hasher.reset();
    let parallel = info_span!("parallel hash").in_scope(|| {
        hasher.update_parallel(&input)?;
        hasher.finalize()
    })?;

    hasher.reset();
    hasher.update(&input)?;
    let extended = hasher.finalize_extended(128)?;

    info!(%serial, %parallel, len = INPUT_LEN, "digests");
    info!(extended = ?&extended[..16], "first bytes of 128-byte extended output");
    assert_eq!(serial, parallel);
    Ok(())
}
