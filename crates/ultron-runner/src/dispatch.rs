use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use ultron_client::client::constants::DEFAULT_GOTO_TOLERANCE;
use ultron_client::client::GameQueryClient;
use ultron_client::config::UltronConfig;
use ultron_events::{Command, GotoTarget};

use crate::routines::{self, RoutineContext};
use crate::store::{Farms, Waypoints};

/// Maps parsed chat commands onto routines and GameQuery calls.
///
/// Dispatch is sequential: each command runs to completion before the
/// next log poll is processed.
pub struct Dispatcher {
    client: GameQueryClient,
    config: UltronConfig,
    farms_path: PathBuf,
    waypoints_path: PathBuf,
}

impl Dispatcher {
    pub fn new(client: GameQueryClient, config: UltronConfig) -> Self {
        Self {
            client,
            config,
            farms_path: Farms::default_path(),
            waypoints_path: Waypoints::default_path(),
        }
    }

    /// Override store locations, mainly for tests
    pub fn with_store_paths(mut self, farms: PathBuf, waypoints: PathBuf) -> Self {
        self.farms_path = farms;
        self.waypoints_path = waypoints;
        self
    }

    fn routine_ctx(&self) -> RoutineContext<'_> {
        RoutineContext {
            client: &self.client,
            log_path: &self.config.bot.log_path,
            home: self.config.bot.home,
            farm_timeout: Duration::from_secs(self.config.watcher.farm_timeout_secs),
            goto_timeout: Duration::from_secs(self.config.watcher.goto_timeout_secs),
        }
    }

    /// Look up the sender's farm, warning when they never registered one
    fn farm_for(&self, sender: &str) -> Result<Option<[f64; 3]>> {
        let farms = Farms::load(&self.farms_path)?;
        let farm = farms.get(sender);
        if farm.is_none() {
            warn!(target: "dispatch", "player '{}' has no registered farm", sender);
        }
        Ok(farm)
    }

    pub async fn dispatch(&self, sender: &str, command: Command) -> Result<()> {
        let ctx = self.routine_ctx();
        match command {
            Command::SetFarm { coords } => {
                let mut farms = Farms::load(&self.farms_path)?;
                farms.set(sender, coords)?;
                info!(target: "dispatch", "set farm for {} to {:?}", sender, coords);
                self.client
                    .send_chat(&format!(
                        "Your farm is at ({}, {}, {})",
                        coords[0], coords[1], coords[2]
                    ))
                    .await?;
            }
            Command::RawFarm => {
                self.client.send_chat("#farm").await?;
            }
            Command::FarmHome => {
                if let Some(farm) = self.farm_for(sender)? {
                    routines::farm(&ctx, sender, farm).await?;
                }
            }
            Command::CropsHome => {
                if let Some(farm) = self.farm_for(sender)? {
                    routines::crops_home(&ctx, sender, farm).await?;
                }
            }
            Command::Sleep { bed_type } => {
                routines::sleep_in_bed(&ctx, &bed_type).await?;
            }
            Command::GoTo { target } => {
                self.goto_target(target).await?;
            }
            Command::GoHome => {
                routines::go_home(&ctx).await?;
            }
            Command::Stop => {
                routines::stop(&ctx).await?;
            }
            Command::FollowMe => {
                routines::follow(&ctx, sender).await?;
            }
            Command::Find { thing } => {
                self.client.send_chat(&format!("#goto {}", thing)).await?;
            }
            Command::Mine { block } => {
                routines::mine(&ctx, &block).await?;
            }
            Command::SetWaypoint { name, coords } => {
                let mut waypoints = Waypoints::load(&self.waypoints_path)?;
                waypoints.set(&name, coords)?;
                info!(target: "dispatch", "set waypoint '{}' to {:?}", name, coords);
                self.client
                    .send_chat(&format!(
                        "'{}' is set to ({}, {}, {})",
                        name, coords[0], coords[1], coords[2]
                    ))
                    .await?;
            }
        }
        Ok(())
    }

    async fn goto_target(&self, target: GotoTarget) -> Result<()> {
        match target {
            GotoTarget::Coords([x, y, z]) => {
                info!(target: "dispatch", "going to coordinates ({}, {}, {})", x, y, z);
                let max_wait = Duration::from_secs(self.config.watcher.goto_timeout_secs);
                if self
                    .client
                    .goto_within(x, y, z, DEFAULT_GOTO_TOLERANCE, max_wait)
                    .await?
                {
                    info!(target: "dispatch", "arrived at ({}, {}, {})", x, y, z);
                }
            }
            GotoTarget::Waypoint(name) => {
                // Always reload in case waypoints were updated externally
                let waypoints = Waypoints::load(&self.waypoints_path)?;
                info!(target: "dispatch", "available waypoints: {:?}", waypoints.names());
                match waypoints.get(&name) {
                    Some([x, y, z]) => {
                        info!(target: "dispatch", "going to waypoint '{}' at ({}, {}, {})", name, x, y, z);
                        self.client
                            .send_chat(&format!("#goto {} {} {}", x, y, z))
                            .await?;
                    }
                    None => {
                        warn!(target: "dispatch", "no such waypoint or invalid coordinates: {}", name);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Short name for a command, for routine lifecycle events
pub fn command_name(command: &Command) -> &'static str {
    match command {
        Command::SetFarm { .. } => "set_farm",
        Command::RawFarm => "farm",
        Command::FarmHome => "farm_home",
        Command::CropsHome => "crops_home",
        Command::Sleep { .. } => "sleep",
        Command::GoTo { .. } => "go_to",
        Command::GoHome => "go_home",
        Command::Stop => "stop",
        Command::FollowMe => "follow",
        Command::Find { .. } => "find",
        Command::Mine { .. } => "mine",
        Command::SetWaypoint { .. } => "set_waypoint",
    }
}
