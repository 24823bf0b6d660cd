use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Direction in which objects must move across the counting line to be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Objects enter from the right (larger x) and leave to the left
    #[default]
    RightToLeft,
    /// Objects enter from the left (smaller x) and leave to the right
    LeftToRight,
}

impl Direction {
    /// Whether a move from `prev_x` to `cur_x` crosses `line` in this direction.
    ///
    /// The previous position must be strictly on the entry side; the current
    /// position may sit exactly on the line.
    #[inline]
    pub fn crosses(self, prev_x: i32, cur_x: i32, line: i32) -> bool {
        match self {
            Direction::RightToLeft => prev_x > line && cur_x <= line,
            Direction::LeftToRight => prev_x < line && cur_x >= line,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::RightToLeft => "right_to_left",
            Direction::LeftToRight => "left_to_right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right_to_left" => Ok(Direction::RightToLeft),
            "left_to_right" => Ok(Direction::LeftToRight),
            other => Err(format!(
                "unknown direction '{other}', expected 'right_to_left' or 'left_to_right'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_to_left() {
        let d = Direction::RightToLeft;
        assert!(d.crosses(320, 280, 300));
        assert!(d.crosses(301, 300, 300));
        assert!(!d.crosses(300, 280, 300));
        assert!(!d.crosses(280, 320, 300));
    }

    #[test]
    fn test_left_to_right() {
        let d = Direction::LeftToRight;
        assert!(d.crosses(280, 320, 300));
        assert!(d.crosses(299, 300, 300));
        assert!(!d.crosses(300, 320, 300));
        assert!(!d.crosses(320, 280, 300));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("left_to_right".parse::<Direction>(), Ok(Direction::LeftToRight));
        assert_eq!(Direction::RightToLeft.to_string(), "right_to_left");
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::default(), Direction::RightToLeft);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Direction::LeftToRight).unwrap();
        assert_eq!(json, "\"left_to_right\"");
        let d: Direction = serde_json::from_str("\"right_to_left\"").unwrap();
        assert_eq!(d, Direction::RightToLeft);
    }
}
