use crate::tracker::{ObjectId, Point};

/// Direction of a line crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossingDirection {
    /// Moved downwards across the line (increasing y)
    In,
    /// Moved upwards across the line (decreasing y)
    Out,
}

impl CrossingDirection {
    /// Classify a vertical move against a horizontal line at `line_y`.
    ///
    /// Landing exactly on the line counts as crossing it.
    pub fn classify(prev_y: i32, curr_y: i32, line_y: i32) -> Option<Self> {
        if prev_y < line_y && curr_y >= line_y {
            Some(Self::In)
        } else if prev_y > line_y && curr_y <= line_y {
            Some(Self::Out)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl std::fmt::Display for CrossingDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A counted crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossingEvent {
    pub id: ObjectId,
    pub direction: CrossingDirection,
    /// Counter frame number (1-based) the crossing was seen on.
    pub frame: u64,
    /// Position right after the crossing.
    pub position: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(CrossingDirection::classify(40, 55, 50), Some(CrossingDirection::In));
        assert_eq!(CrossingDirection::classify(55, 40, 50), Some(CrossingDirection::Out));
        assert_eq!(CrossingDirection::classify(40, 45, 50), None);
        assert_eq!(CrossingDirection::classify(60, 55, 50), None);
    }

    #[test]
    fn test_classify_on_line() {
        assert_eq!(CrossingDirection::classify(49, 50, 50), Some(CrossingDirection::In));
        assert_eq!(CrossingDirection::classify(51, 50, 50), Some(CrossingDirection::Out));
        // Starting on the line is neither side.
        assert_eq!(CrossingDirection::classify(50, 60, 50), None);
        assert_eq!(CrossingDirection::classify(50, 40, 50), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CrossingDirection::In.to_string(), "IN");
        assert_eq!(CrossingDirection::Out.to_string(), "OUT");
    }
}
