use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::warn;

use ultron_client::config::ProjectPaths;

/// Per-player farm locations, persisted as `player=[x, y, z]` lines.
///
/// Last write wins: saves reload the file first so concurrent external
/// edits are not silently dropped wholesale, then rewrite the whole file.
#[derive(Debug, Clone)]
pub struct Farms {
    path: PathBuf,
    entries: BTreeMap<String, [f64; 3]>,
}

impl Farms {
    pub fn default_path() -> PathBuf {
        data_file("farms.txt")
    }

    /// Load the store; a missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            parse_lines(&fs::read_to_string(&path)?, parse_farm_coords)
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn get(&self, player: &str) -> Option<[f64; 3]> {
        self.entries.get(player).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a player's farm and rewrite the file.
    pub fn set(&mut self, player: &str, coords: [f64; 3]) -> io::Result<()> {
        // Pick up entries added by other writers since we loaded
        self.reload()?;
        self.entries.insert(player.to_string(), coords);
        self.save()
    }

    pub fn reload(&mut self) -> io::Result<()> {
        if self.path.exists() {
            self.entries = parse_lines(&fs::read_to_string(&self.path)?, parse_farm_coords);
        }
        Ok(())
    }

    fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = String::new();
        for (name, [x, y, z]) in &self.entries {
            out.push_str(&format!("{}=[{}, {}, {}]\n", name, x, y, z));
        }
        fs::write(&self.path, out)
    }
}

/// Named waypoints, persisted as `name=x y z` lines.
#[derive(Debug, Clone)]
pub struct Waypoints {
    path: PathBuf,
    entries: BTreeMap<String, [f64; 3]>,
}

impl Waypoints {
    pub fn default_path() -> PathBuf {
        data_file("waypoints.txt")
    }

    pub fn load(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            parse_lines(&fs::read_to_string(&path)?, parse_waypoint_coords)
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn get(&self, name: &str) -> Option<[f64; 3]> {
        self.entries.get(name).copied()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(|k| k.as_str()).collect()
    }

    pub fn set(&mut self, name: &str, coords: [f64; 3]) -> io::Result<()> {
        self.reload()?;
        self.entries.insert(name.to_string(), coords);
        self.save()
    }

    pub fn reload(&mut self) -> io::Result<()> {
        if self.path.exists() {
            self.entries = parse_lines(&fs::read_to_string(&self.path)?, parse_waypoint_coords);
        }
        Ok(())
    }

    fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = String::new();
        for (name, [x, y, z]) in &self.entries {
            out.push_str(&format!("{}={} {} {}\n", name, x, y, z));
        }
        fs::write(&self.path, out)
    }
}

fn data_file(name: &str) -> PathBuf {
    match ProjectPaths::new("ultron") {
        Some(paths) => paths.data_dir().join(name),
        None => PathBuf::from(name),
    }
}

/// Parse `name=<coords>` lines, skipping anything the coordinate parser
/// rejects.
fn parse_lines(
    content: &str,
    parse_coords: fn(&str) -> Option<[f64; 3]>,
) -> BTreeMap<String, [f64; 3]> {
    let mut entries = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parsed = line
            .split_once('=')
            .and_then(|(name, coords)| Some((name, parse_coords(coords)?)));
        match parsed {
            Some((name, coords)) => {
                entries.insert(name.to_string(), coords);
            }
            None => {
                warn!(target: "store", "skipping unparseable store line: {}", line);
            }
        }
    }
    entries
}

/// `[x, y, z]` - bracketed, comma-separated
fn parse_farm_coords(s: &str) -> Option<[f64; 3]> {
    let inner = s.trim().strip_prefix('[')?.strip_suffix(']')?;
    let parts: Vec<f64> = inner
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if parts.len() == 3 {
        Some([parts[0], parts[1], parts[2]])
    } else {
        None
    }
}

/// `x y z` - space-separated
fn parse_waypoint_coords(s: &str) -> Option<[f64; 3]> {
    let parts: Vec<f64> = s
        .trim()
        .split_whitespace()
        .map(|p| p.parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if parts.len() == 3 {
        Some([parts[0], parts[1], parts[2]])
    } else {
        None
    }
}
