//! Chat command grammar
//!
//! Commands arrive as plain chat messages (public or whispered) and are
//! matched by prefix, in the same order the bot has always checked them.

/// Target of a `go to` command
#[derive(Debug, Clone, PartialEq)]
pub enum GotoTarget {
    /// Literal `x y z` coordinates
    Coords([f64; 3]),
    /// Named waypoint, resolved against the waypoint store at dispatch time
    Waypoint(String),
}

/// A recognized chat command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `my farm is at <x> <y> <z>` - remember the sender's farm location
    SetFarm { coords: [f64; 3] },
    /// Bare `farm` - raw `#farm` passthrough, no navigation
    RawFarm,
    /// `farm home` - full farm routine for the sender
    FarmHome,
    /// `crops home` - collect crops and return home
    CropsHome,
    /// `sleep [bed_type]`
    Sleep { bed_type: String },
    /// `go to <x y z | waypoint>`
    GoTo { target: GotoTarget },
    /// `go home`
    GoHome,
    /// `stop` - halt automation and revoke block breaking
    Stop,
    /// `follow me`
    FollowMe,
    /// `find a <thing>`
    Find { thing: String },
    /// `mine <block>`
    Mine { block: String },
    /// `set <name> <x> <y> <z>` - remember a named waypoint
    SetWaypoint { name: String, coords: [f64; 3] },
}

/// Parse a chat message body into a command. Returns None for messages
/// that are not commands (or are malformed enough to be ignored).
pub fn parse_command(msg: &str) -> Option<Command> {
    let lower = msg.to_lowercase();
    if lower.starts_with("my farm is at") {
        let coords = parse_coords(lower.trim_start_matches("my farm is at").trim())?;
        return Some(Command::SetFarm { coords });
    }

    if msg.trim() == "farm" {
        return Some(Command::RawFarm);
    }
    if msg.trim().starts_with("farm home") {
        return Some(Command::FarmHome);
    }
    if msg.trim().starts_with("crops home") {
        return Some(Command::CropsHome);
    }
    if msg.starts_with("sleep") {
        let bed_type = msg
            .split_whitespace()
            .nth(1)
            .unwrap_or("white_bed")
            .to_string();
        return Some(Command::Sleep { bed_type });
    }
    if let Some(arg) = msg.strip_prefix("go to ") {
        let arg = arg.trim();
        let target = match parse_coords(arg) {
            Some(coords) => GotoTarget::Coords(coords),
            None => GotoTarget::Waypoint(arg.to_string()),
        };
        return Some(Command::GoTo { target });
    }
    if msg.starts_with("go home") {
        return Some(Command::GoHome);
    }
    if msg.starts_with("stop") {
        return Some(Command::Stop);
    }
    if msg.starts_with("follow me") {
        return Some(Command::FollowMe);
    }
    if let Some(thing) = msg.strip_prefix("find a ") {
        let thing = thing.trim();
        if !thing.is_empty() {
            return Some(Command::Find {
                thing: thing.to_string(),
            });
        }
        return None;
    }
    if let Some(block) = msg.strip_prefix("mine ") {
        let block = block.trim();
        if !block.is_empty() {
            return Some(Command::Mine {
                block: block.to_string(),
            });
        }
        return None;
    }
    if msg.starts_with("set ") {
        let parts: Vec<&str> = msg.split_whitespace().collect();
        if parts.len() == 5 {
            if let Some(coords) = parse_coords(&parts[2..5].join(" ")) {
                return Some(Command::SetWaypoint {
                    name: parts[1].to_string(),
                    coords,
                });
            }
        }
        return None;
    }

    None
}

/// Parse exactly three whitespace-separated floats.
fn parse_coords(s: &str) -> Option<[f64; 3]> {
    let parts: Vec<f64> = s
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_farm_is_raw_passthrough() {
        assert_eq!(parse_command("farm"), Some(Command::RawFarm));
        assert_eq!(parse_command(" farm "), Some(Command::RawFarm));
    }

    #[test]
    fn test_farm_home() {
        assert_eq!(parse_command("farm home"), Some(Command::FarmHome));
        assert_eq!(parse_command("farm home please"), Some(Command::FarmHome));
    }

    #[test]
    fn test_crops_home() {
        assert_eq!(parse_command("crops home"), Some(Command::CropsHome));
    }

    #[test]
    fn test_sleep_default_bed() {
        assert_eq!(
            parse_command("sleep"),
            Some(Command::Sleep {
                bed_type: "white_bed".to_string()
            })
        );
    }

    #[test]
    fn test_sleep_with_bed_type() {
        assert_eq!(
            parse_command("sleep red_bed"),
            Some(Command::Sleep {
                bed_type: "red_bed".to_string()
            })
        );
    }

    #[test]
    fn test_go_to_coordinates() {
        assert_eq!(
            parse_command("go to 10 64 -20.5"),
            Some(Command::GoTo {
                target: GotoTarget::Coords([10.0, 64.0, -20.5])
            })
        );
    }

    #[test]
    fn test_go_to_waypoint() {
        assert_eq!(
            parse_command("go to quarry"),
            Some(Command::GoTo {
                target: GotoTarget::Waypoint("quarry".to_string())
            })
        );
    }

    #[test]
    fn test_go_home() {
        assert_eq!(parse_command("go home"), Some(Command::GoHome));
    }

    #[test]
    fn test_stop() {
        assert_eq!(parse_command("stop"), Some(Command::Stop));
        assert_eq!(parse_command("stop it now"), Some(Command::Stop));
    }

    #[test]
    fn test_follow_me() {
        assert_eq!(parse_command("follow me"), Some(Command::FollowMe));
    }

    #[test]
    fn test_find_a() {
        assert_eq!(
            parse_command("find a village"),
            Some(Command::Find {
                thing: "village".to_string()
            })
        );
        assert_eq!(parse_command("find a "), None);
    }

    #[test]
    fn test_mine() {
        assert_eq!(
            parse_command("mine diamond_ore"),
            Some(Command::Mine {
                block: "diamond_ore".to_string()
            })
        );
        assert_eq!(parse_command("mine "), None);
    }

    #[test]
    fn test_set_farm_case_insensitive() {
        assert_eq!(
            parse_command("My Farm Is At -100 64 200"),
            Some(Command::SetFarm {
                coords: [-100.0, 64.0, 200.0]
            })
        );
    }

    #[test]
    fn test_set_farm_wrong_arity() {
        assert_eq!(parse_command("my farm is at 1 2"), None);
    }

    #[test]
    fn test_set_waypoint() {
        assert_eq!(
            parse_command("set quarry 100 64 -200"),
            Some(Command::SetWaypoint {
                name: "quarry".to_string(),
                coords: [100.0, 64.0, -200.0]
            })
        );
    }

    #[test]
    fn test_set_waypoint_bad_usage() {
        assert_eq!(parse_command("set quarry here"), None);
        assert_eq!(parse_command("set quarry 1 2"), None);
    }

    #[test]
    fn test_unrecognized_messages() {
        assert_eq!(parse_command("hello there"), None);
        assert_eq!(parse_command(""), None);
    }
}
