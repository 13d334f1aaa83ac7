//! The fixed set of queues, workers and cron jobs this deployment
//! supports.
//!
//! Queues are Redis streams with a shared `workers` consumer group;
//! workers read their queue's stream in a spawned loop; cron jobs are
//! spawned interval loops. All of them exist only when the broker
//! connected during boot.

use crate::broker::RedisHandle;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use typetempo_boot::{CronDescriptor, QueueDescriptor, SubsystemRegistry, WorkerDescriptor};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);
const HOUR: Duration = Duration::from_secs(60 * 60);

/// Build the subsystem registry for this deployment.
pub fn registry() -> SubsystemRegistry<RedisHandle> {
    SubsystemRegistry::new()
        .with_queue(stream_queue("email-tasks"))
        .with_queue(stream_queue("deferred-tasks"))
        .with_worker(stream_worker("email-worker", "email-tasks"))
        .with_worker(stream_worker("deferred-worker", "deferred-tasks"))
        .with_cron(interval_cron("daily-leaderboard-rollover", DAY))
        .with_cron(interval_cron("stale-session-sweep", HOUR))
}

fn stream_key(queue: &str) -> String {
    format!("queue:{queue}")
}

/// A queue backed by a Redis stream with a `workers` consumer group.
fn stream_queue(name: &'static str) -> QueueDescriptor<RedisHandle> {
    QueueDescriptor::new(name, move |handle: RedisHandle| async move {
        let mut conn = handle.connection();
        let created: redis::RedisResult<()> = redis::cmd("XGROUP")
            .arg("CREATE")
            .arg(stream_key(name))
            .arg("workers")
            .arg("$")
            .arg("MKSTREAM")
            .query_async(&mut conn)
            .await;

        match created {
            Ok(()) => Ok(()),
            // The group survives restarts; an existing one is fine.
            Err(error) if error.code() == Some("BUSYGROUP") => Ok(()),
            Err(error) => Err(error.into()),
        }
    })
}

/// A worker consuming one queue's stream in a spawned loop.
///
/// `start` returns once the loop is running; job failures stay inside
/// the loop and never reach the boot sequence.
fn stream_worker(name: &'static str, queue: &'static str) -> WorkerDescriptor<RedisHandle> {
    WorkerDescriptor::new(name, move |handle: RedisHandle| async move {
        let mut conn = handle.connection();
        tokio::spawn(async move {
            loop {
                // The connection manager multiplexes one connection
                // across all clones, so BLOCK must not be used here.
                let batch: redis::RedisResult<redis::Value> = redis::cmd("XREADGROUP")
                    .arg("GROUP")
                    .arg("workers")
                    .arg(name)
                    .arg("COUNT")
                    .arg(10)
                    .arg("STREAMS")
                    .arg(stream_key(queue))
                    .arg(">")
                    .query_async(&mut conn)
                    .await;

                match batch {
                    Ok(redis::Value::Nil) => {
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                    Ok(_) => debug!(worker = name, "processed job batch"),
                    Err(error) => {
                        warn!(worker = name, %error, "queue read failed");
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                }
            }
        });
        info!(worker = name, queue, "worker running");
        Ok(())
    })
}

/// A cron job firing on a fixed interval in a spawned loop.
fn interval_cron(name: &'static str, period: Duration) -> CronDescriptor {
    CronDescriptor::new(name, move || {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; skip it so the job
            // first runs one full period after boot.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                debug!(job = name, "cron job fired");
            }
        });
        Ok(())
    })
}
