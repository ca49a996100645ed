use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use crate::client::connection::GameQueryServer;
use crate::client::constants::{GOTO_MAX_WAIT, GOTO_POLL_INTERVAL, QUERY_TIMEOUT};
use crate::client::query::{ActionResult, BlockInfo, PlayerEntry, PlayerStatus, Query, Response};
use crate::error::ClientError;

/// Parameters for position-stability arrival detection
#[derive(Debug, Clone)]
pub struct ArrivalParams {
    /// Displacement below which the player counts as stationary
    pub tolerance: f64,
    /// Consecutive stationary checks required
    pub stable_required: u32,
    /// Interval between position polls
    pub check_interval: Duration,
    /// Overall deadline
    pub max_wait: Duration,
}

impl Default for ArrivalParams {
    fn default() -> Self {
        Self {
            tolerance: 0.2,
            stable_required: 1,
            check_interval: Duration::from_secs(1),
            max_wait: Duration::from_secs(60),
        }
    }
}

impl ArrivalParams {
    pub fn with_stability(stable_required: u32) -> Self {
        Self {
            stable_required,
            ..Default::default()
        }
    }
}

/// Synchronous request/response client for the GameQuery mod
///
/// Every query opens a fresh connection: write one JSON line, read one
/// JSON line, close. The mod answers on the same connection, so there is
/// no session state to manage and nothing to reconnect.
#[derive(Clone, Debug)]
pub struct GameQueryClient {
    server: GameQueryServer,
}

impl GameQueryClient {
    pub fn new(server: GameQueryServer) -> Self {
        GameQueryClient { server }
    }

    pub fn server(&self) -> &GameQueryServer {
        &self.server
    }

    /// Send a query and return the raw JSON response value
    pub async fn send_query_raw(&self, query: &Query) -> Result<serde_json::Value, ClientError> {
        let endpoint = self.server.to_string();
        let addr = self.server.addr().await?;

        let mut stream = timeout(QUERY_TIMEOUT, TcpStream::connect(addr))
            .await
            .map_err(|_| ClientError::Timeout {
                endpoint: endpoint.clone(),
            })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::ConnectionRefused {
                    ClientError::ConnectionRefused {
                        endpoint: endpoint.clone(),
                    }
                } else {
                    ClientError::Io(e)
                }
            })?;

        let mut request = serde_json::to_string(query)?;
        request.push('\n');
        debug!(target: "query", "-> {}", request.trim_end());
        stream.write_all(request.as_bytes()).await?;

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        let read = timeout(QUERY_TIMEOUT, reader.read_line(&mut line))
            .await
            .map_err(|_| ClientError::Timeout { endpoint })??;
        if read == 0 {
            return Err(ClientError::EmptyResponse);
        }
        debug!(target: "query", "<- {}", line.trim_end());

        Ok(serde_json::from_str(line.trim())?)
    }

    /// Send a query and decode the response envelope
    pub async fn send_query(&self, query: &Query) -> Result<Response, ClientError> {
        let value = self.send_query_raw(query).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Get a position/status snapshot for the player
    pub async fn position(&self) -> Result<PlayerStatus, ClientError> {
        let response = self.send_query(&Query::Position).await?;
        if let Some(error) = response.error {
            return Err(ClientError::QueryFailed(error));
        }
        response
            .position
            .ok_or_else(|| ClientError::QueryFailed("response carried no position".to_string()))
    }

    /// Send a chat message as the player. `#`-prefixed messages drive the
    /// automation mod; anything else is visible chat.
    pub async fn send_chat(&self, message: &str) -> Result<ActionResult, ClientError> {
        let response = self
            .send_query(&Query::SendChat {
                message: message.to_string(),
            })
            .await?;
        let result = response.result.unwrap_or_default();
        if result.success {
            debug!(target: "query", "chat sent: {}", message);
        } else {
            warn!(
                target: "query",
                "chat send failed for {:?}: {}",
                message,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
        Ok(result)
    }

    pub async fn rotate(
        &self,
        yaw: Option<f64>,
        pitch: Option<f64>,
    ) -> Result<ActionResult, ClientError> {
        let response = self.send_query(&Query::Rotate { yaw, pitch }).await?;
        Ok(response.result.unwrap_or_default())
    }

    /// Point the player's view at a world coordinate
    pub async fn look_at(&self, x: f64, y: f64, z: f64) -> Result<(), ClientError> {
        self.send_query(&Query::PointToXyz { x, y, z }).await?;
        Ok(())
    }

    /// Use the bed the player is looking at, or one at specific coordinates
    pub async fn use_bed(&self, coords: Option<[f64; 3]>) -> Result<ActionResult, ClientError> {
        let query = match coords {
            Some([x, y, z]) => Query::UseBed {
                x: Some(x),
                y: Some(y),
                z: Some(z),
            },
            None => Query::UseBed {
                x: None,
                y: None,
                z: None,
            },
        };
        let response = self.send_query(&query).await?;
        if let Some(error) = response.error {
            return Err(ClientError::QueryFailed(error));
        }
        Ok(response.result.unwrap_or_default())
    }

    pub async fn drop_item_from_slot(&self, slot: u32) -> Result<ActionResult, ClientError> {
        let response = self
            .send_query(&Query::DropItem {
                slot: Some(slot),
                name: None,
            })
            .await?;
        Ok(response.result.unwrap_or_default())
    }

    pub async fn drop_items_by_name(&self, name: &str) -> Result<ActionResult, ClientError> {
        let response = self
            .send_query(&Query::DropItem {
                slot: None,
                name: Some(name.to_string()),
            })
            .await?;
        Ok(response.result.unwrap_or_default())
    }

    pub async fn right_click(&self) -> Result<(), ClientError> {
        self.simple_action(&Query::RightClick).await
    }

    pub async fn left_click(&self) -> Result<(), ClientError> {
        self.simple_action(&Query::LeftClick).await
    }

    pub async fn attack(&self) -> Result<(), ClientError> {
        self.simple_action(&Query::Attack).await
    }

    pub async fn open_container(&self) -> Result<(), ClientError> {
        self.simple_action(&Query::OpenContainer).await
    }

    async fn simple_action(&self, query: &Query) -> Result<(), ClientError> {
        let response = self.send_query(query).await?;
        if let Some(error) = response.error {
            return Err(ClientError::QueryFailed(error));
        }
        Ok(())
    }

    /// Get raw block information at the specified coordinates
    pub async fn get_block(&self, x: f64, y: f64, z: f64) -> Result<serde_json::Value, ClientError> {
        self.send_query_raw(&Query::GetBlock { x, y, z }).await
    }

    /// Get all blocks in a cubic range around the player
    pub async fn blocks_in_range(&self, range: u32) -> Result<Vec<BlockInfo>, ClientError> {
        let response = self.send_query(&Query::Blocks { range }).await?;
        Ok(response.blocks.map(|b| b.blocks).unwrap_or_default())
    }

    /// Get all players currently in the world
    pub async fn players(&self) -> Result<Vec<PlayerEntry>, ClientError> {
        let response = self.send_query(&Query::Players).await?;
        if let Some(error) = response.error {
            return Err(ClientError::QueryFailed(error));
        }
        Ok(response.players.unwrap_or_default())
    }

    /// Look up a specific player's coordinates by name. `Ok(None)` means
    /// the player is absent or the mod reported them without coordinates.
    pub async fn player_coords(&self, name: &str) -> Result<Option<(f64, f64, f64)>, ClientError> {
        let players = self.players().await?;
        for player in &players {
            if player.name() == name {
                if player.coords().is_none() {
                    warn!(target: "query", "player {} found but no coordinates available", name);
                }
                return Ok(player.coords());
            }
        }
        debug!(target: "query", "player {} not found in the world", name);
        Ok(None)
    }

    /// Walk to a target with the default overall deadline
    pub async fn goto(
        &self,
        x: f64,
        y: f64,
        z: f64,
        tolerance: f64,
    ) -> Result<bool, ClientError> {
        self.goto_within(x, y, z, tolerance, GOTO_MAX_WAIT).await
    }

    /// Walk to a target: look at it, hand the pathing off to the
    /// automation mod via `#goto`, then poll position until every axis is
    /// within `tolerance`. Returns false if `max_wait` passes first.
    pub async fn goto_within(
        &self,
        x: f64,
        y: f64,
        z: f64,
        tolerance: f64,
        max_wait: Duration,
    ) -> Result<bool, ClientError> {
        info!(target: "query", "going to ({}, {}, {})", x, y, z);
        self.look_at(x, y, z).await?;
        self.send_chat(&format!("#goto {} {} {}", x, y, z)).await?;

        let deadline = Instant::now() + max_wait;
        loop {
            let pos = self.position().await?;
            if (pos.x - x).abs() <= tolerance
                && (pos.y - y).abs() <= tolerance
                && (pos.z - z).abs() <= tolerance
            {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                warn!(target: "query", "goto ({}, {}, {}) deadline passed", x, y, z);
                return Ok(false);
            }
            sleep(GOTO_POLL_INTERVAL).await;
        }
    }

    /// Wait until the player stops moving: position must stay within
    /// `tolerance` of the previous sample for `stable_required`
    /// consecutive checks. Returns false on timeout.
    pub async fn wait_for_arrival(&self, params: ArrivalParams) -> Result<bool, ClientError> {
        let deadline = Instant::now() + params.max_wait;
        let mut stable_count = 0u32;
        let mut last_pos: Option<(f64, f64, f64)> = None;

        while stable_count < params.stable_required {
            let pos = self.position().await?.coords();
            if let Some(last) = last_pos {
                if displacement(last, pos) < params.tolerance {
                    stable_count += 1;
                } else {
                    stable_count = 0;
                }
            }
            last_pos = Some(pos);

            if Instant::now() >= deadline {
                warn!(target: "query", "timed out waiting for arrival");
                return Ok(false);
            }
            sleep(params.check_interval).await;
        }
        Ok(true)
    }
}

/// Straight-line distance between two position samples
pub(crate) fn displacement(a: (f64, f64, f64), b: (f64, f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2) + (b.2 - a.2).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displacement() {
        assert_eq!(displacement((0.0, 0.0, 0.0), (0.0, 0.0, 0.0)), 0.0);
        assert_eq!(displacement((0.0, 0.0, 0.0), (3.0, 4.0, 0.0)), 5.0);
        assert!((displacement((1.0, 1.0, 1.0), (2.0, 2.0, 2.0)) - 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_arrival_params_defaults() {
        let params = ArrivalParams::default();
        assert_eq!(params.tolerance, 0.2);
        assert_eq!(params.stable_required, 1);
        assert_eq!(params.check_interval, Duration::from_secs(1));
        assert_eq!(params.max_wait, Duration::from_secs(60));
    }

    #[test]
    fn test_arrival_params_with_stability() {
        let params = ArrivalParams::with_stability(3);
        assert_eq!(params.stable_required, 3);
        assert_eq!(params.tolerance, 0.2);
    }
}
