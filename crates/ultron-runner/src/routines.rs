use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{error, info, warn};

use ultron_client::client::{ArrivalParams, GameQueryClient};
use ultron_client::client::constants::DEFAULT_GOTO_TOLERANCE;

use crate::log_watcher::{wait_for_any, LogWatcher};

/// Pause between consecutive automation chat commands, so the mod
/// processes them in order
const SETTINGS_PAUSE: Duration = Duration::from_millis(500);

/// How long to give `#follow` before checking the log for failure
const FOLLOW_GRACE: Duration = Duration::from_secs(2);

/// How much recent log output to inspect for follow failures
const FOLLOW_TAIL_BYTES: u64 = 1000;

/// Shared inputs for the scripted routines
pub struct RoutineContext<'a> {
    pub client: &'a GameQueryClient,
    pub log_path: &'a Path,
    pub home: [f64; 3],
    pub farm_timeout: Duration,
    pub goto_timeout: Duration,
}

impl RoutineContext<'_> {
    async fn goto(&self, [x, y, z]: [f64; 3]) -> Result<bool> {
        Ok(self
            .client
            .goto_within(x, y, z, DEFAULT_GOTO_TOLERANCE, self.goto_timeout)
            .await?)
    }
}

/// Full farm routine: walk to the farm, let the automation mod work the
/// crops, deposit at the chest, and come home. Home is always reached,
/// even when farming itself fails; the return value reflects farming.
pub async fn farm(ctx: &RoutineContext<'_>, player: &str, farm: [f64; 3]) -> Result<bool> {
    info!(target: "routines", "starting farm routine for {}", player);

    let [fx, fy, fz] = farm;
    info!(target: "routines", "walking to farm at ({}, {}, {})", fx, fy, fz);
    ctx.goto(farm).await?;

    info!(target: "routines", "enabling farming settings");
    ctx.client.send_chat("#settings allowBreak true").await?;
    sleep(SETTINGS_PAUSE).await;
    ctx.client.send_chat("#settings allowPlace true").await?;
    sleep(SETTINGS_PAUSE).await;

    info!(target: "routines", "starting farming");
    ctx.client.send_chat("#farm").await?;

    let farming_success = wait_for_farm_completion(ctx.log_path, ctx.farm_timeout).await?;

    info!(target: "routines", "disabling farming settings");
    ctx.client.send_chat("#settings allowBreak false").await?;
    sleep(SETTINGS_PAUSE).await;
    ctx.client.send_chat("#settings allowPlace false").await?;
    sleep(SETTINGS_PAUSE).await;

    info!(target: "routines", "returning to farm to deposit items");
    ctx.goto(farm).await?;
    info!(target: "routines", "going to chest");
    ctx.client.send_chat("#goto chest").await?;
    ctx.client
        .wait_for_arrival(ArrivalParams::with_stability(2))
        .await?;

    info!(target: "routines", "returning home");
    ctx.goto(ctx.home).await?;

    if farming_success {
        info!(target: "routines", "farming complete for {}", player);
    } else {
        warn!(target: "routines", "farming failed for {}, but returned home safely", player);
    }
    Ok(farming_success)
}

/// Wait for the automation mod to report farm completion in the log
pub async fn wait_for_farm_completion(log_path: &Path, timeout: Duration) -> Result<bool> {
    info!(target: "routines", "monitoring farming progress via log file");
    match wait_for_any(log_path, &["Farm failed", "goal reached"], timeout).await? {
        None => {
            warn!(target: "routines", "farming did not complete within {:?}", timeout);
            Ok(false)
        }
        Some(sentinel) if sentinel.contains("Farm failed") => {
            warn!(target: "routines", "farming failed");
            Ok(false)
        }
        Some(_) => {
            info!(target: "routines", "farming completed successfully");
            Ok(true)
        }
    }
}

/// Collect crops from the chest at the farm and come home, without
/// running the farming pass.
pub async fn crops_home(ctx: &RoutineContext<'_>, player: &str, farm: [f64; 3]) -> Result<()> {
    info!(target: "routines", "starting crops home routine for {}", player);

    ctx.goto(farm).await?;
    info!(target: "routines", "going to chest");
    ctx.client.send_chat("#goto chest").await?;
    ctx.client
        .wait_for_arrival(ArrivalParams::with_stability(2))
        .await?;

    info!(target: "routines", "returning home");
    ctx.goto(ctx.home).await?;

    info!(target: "routines", "crops home complete for {}", player);
    Ok(())
}

/// Walk to the nearest bed of the given type and try to sleep in it.
/// Bed interaction is best-effort: scan failures fall back to a bare
/// use_bed, and interaction errors never fail the routine once arrival
/// succeeded.
pub async fn sleep_in_bed(ctx: &RoutineContext<'_>, bed_type: &str) -> Result<bool> {
    info!(target: "routines", "going to nearest {}", bed_type.replace('_', " "));
    ctx.client.send_chat(&format!("#goto {}", bed_type)).await?;

    info!(target: "routines", "waiting for arrival at bed");
    let arrived = ctx
        .client
        .wait_for_arrival(ArrivalParams::with_stability(2))
        .await?;
    if !arrived {
        warn!(target: "routines", "failed to arrive at bed in time");
        return Ok(false);
    }

    if let Err(e) = interact_with_bed(ctx.client, bed_type).await {
        warn!(target: "routines", "error during bed interaction: {}", e);
        // Fall back to using whatever bed the player is looking at
        if let Err(e2) = ctx.client.use_bed(None).await {
            error!(target: "routines", "fallback bed use also failed: {}", e2);
        }
    }

    Ok(true)
}

async fn interact_with_bed(client: &GameQueryClient, bed_type: &str) -> Result<()> {
    info!(target: "routines", "searching for bed to look at and use");
    let pos = client.position().await?;

    // Keep the scan radius small; larger ranges overload the mod
    let blocks = client.blocks_in_range(3).await?;
    if blocks.is_empty() {
        warn!(target: "routines", "could not scan for blocks, trying simple bed use");
        client.use_bed(None).await?;
        return Ok(());
    }

    let wanted = format!("block{{minecraft:{}}}", bed_type);
    let nearest = blocks
        .iter()
        .filter(|b| b.kind.to_lowercase() == wanted)
        .min_by(|a, b| {
            let da = dist_sq(pos.coords(), (a.x, a.y, a.z));
            let db = dist_sq(pos.coords(), (b.x, b.y, b.z));
            da.total_cmp(&db)
        });

    match nearest {
        Some(bed) => {
            client.send_chat("Zzzz").await?;
            info!(
                target: "routines",
                "looking at {} at ({}, {}, {})",
                bed_type.replace('_', " "),
                bed.x,
                bed.y,
                bed.z
            );
            client.look_at(bed.x, bed.y, bed.z).await?;
            sleep(Duration::from_millis(500)).await;
            info!(target: "routines", "using bed");
            client.use_bed(Some([bed.x, bed.y, bed.z])).await?;
        }
        None => {
            warn!(
                target: "routines",
                "no {} found nearby, trying simple bed use",
                bed_type.replace('_', " ")
            );
            client.use_bed(None).await?;
        }
    }
    Ok(())
}

/// Walk home and wait until the player settles there
pub async fn go_home(ctx: &RoutineContext<'_>) -> Result<bool> {
    let [hx, hy, hz] = ctx.home;
    info!(target: "routines", "going home to ({}, {}, {})", hx, hy, hz);
    ctx.goto(ctx.home).await?;

    info!(target: "routines", "waiting for arrival at home");
    let arrived = ctx
        .client
        .wait_for_arrival(ArrivalParams::with_stability(3))
        .await?;
    if arrived {
        info!(target: "routines", "arrived at home");
    } else {
        warn!(target: "routines", "failed to arrive at home in time");
    }
    Ok(arrived)
}

/// Follow the sender. If the automation mod cannot see them, fall back
/// to walking to their coordinates from the player list.
pub async fn follow(ctx: &RoutineContext<'_>, sender: &str) -> Result<()> {
    ctx.client
        .send_chat(&format!("#follow player {}", sender))
        .await?;
    ctx.client.send_chat("Ok komrad").await?;

    // Give the follow command a moment to take effect before checking
    sleep(FOLLOW_GRACE).await;

    let recent = LogWatcher::new(ctx.log_path).read_tail(FOLLOW_TAIL_BYTES)?;
    if recent.contains("No valid entities in range!") {
        warn!(target: "routines", "follow failed for {}, trying to find player location", sender);
        match ctx.client.player_coords(sender).await? {
            Some((x, y, z)) => {
                info!(target: "routines", "found {} at ({}, {}, {}), going there", sender, x, y, z);
                ctx.client
                    .send_chat(&format!("#goto {} {} {}", x, y, z))
                    .await?;
            }
            None => {
                warn!(target: "routines", "could not find player {} in the world", sender);
            }
        }
    } else {
        info!(target: "routines", "following {}", sender);
    }
    Ok(())
}

/// Enable block breaking and mine the named block until told to stop
pub async fn mine(ctx: &RoutineContext<'_>, block: &str) -> Result<()> {
    ctx.client.send_chat("#allowBreak true").await?;
    info!(target: "routines", "mining {}", block);
    ctx.client.send_chat(&format!("#mine {}", block)).await?;
    ctx.client
        .send_chat(&format!("Mining {} away (till you say stop)!", block))
        .await?;
    Ok(())
}

/// Halt automation and revoke block breaking
pub async fn stop(ctx: &RoutineContext<'_>) -> Result<()> {
    ctx.client.send_chat("#stop").await?;
    ctx.client.send_chat("#allowBreak false").await?;
    Ok(())
}

fn dist_sq(a: (f64, f64, f64), b: (f64, f64, f64)) -> f64 {
    (b.0 - a.0).powi(2) + (b.1 - a.1).powi(2) + (b.2 - a.2).powi(2)
}
