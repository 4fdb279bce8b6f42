//! Lane layout for many-to-many conversion
//!
//! Places a source table, its join table and the target table along one
//! horizontal lane. Purely cosmetic: it only reads and returns positions.

use ddlforge_core::Position;

/// Center used when neither table has been placed
pub const DEFAULT_LANE_ORIGIN: Position = Position { x: 400.0, y: 200.0 };

/// Positions for the three tables of a converted relationship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanePositions {
    pub source: Position,
    pub join: Position,
    pub target: Position,
}

/// Lay out source, join and target tables.
///
/// - both placed: the join table sits at their midpoint; when they are
///   closer than two spacings horizontally they are pushed apart to one
///   spacing either side of the midpoint
/// - one placed: the other two follow it along the lane
/// - neither placed: symmetric around [`DEFAULT_LANE_ORIGIN`]
pub fn lane_layout(source: Option<Position>, target: Option<Position>, spacing: f32) -> LanePositions {
    match (source, target) {
        (Some(mut source), Some(mut target)) => {
            let mid = source.midpoint(&target);
            if (target.x - source.x).abs() < 2.0 * spacing {
                let direction = if source.x <= target.x { 1.0 } else { -1.0 };
                source.x = mid.x - direction * spacing;
                target.x = mid.x + direction * spacing;
            }
            LanePositions {
                source,
                join: mid,
                target,
            }
        }
        (Some(source), None) => LanePositions {
            source,
            join: source.offset(spacing, 0.0),
            target: source.offset(2.0 * spacing, 0.0),
        },
        (None, Some(target)) => LanePositions {
            source: target.offset(-2.0 * spacing, 0.0),
            join: target.offset(-spacing, 0.0),
            target,
        },
        (None, None) => LanePositions {
            source: DEFAULT_LANE_ORIGIN.offset(-spacing, 0.0),
            join: DEFAULT_LANE_ORIGIN,
            target: DEFAULT_LANE_ORIGIN.offset(spacing, 0.0),
        },
    }
}

/// Layout for a self-referencing relationship: the join table goes one
/// spacing to the right of the table.
pub fn self_reference_layout(table: Option<Position>, spacing: f32) -> (Position, Position) {
    let table = table.unwrap_or(DEFAULT_LANE_ORIGIN);
    (table, table.offset(spacing, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_far_apart_tables_keep_positions() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(1000.0, 100.0);
        let lane = lane_layout(Some(a), Some(b), 320.0);
        assert_eq!(lane.source, a);
        assert_eq!(lane.target, b);
        assert_eq!(lane.join, Position::new(500.0, 50.0));
    }

    #[test]
    fn test_close_tables_pushed_apart() {
        let a = Position::new(100.0, 0.0);
        let b = Position::new(200.0, 0.0);
        let lane = lane_layout(Some(a), Some(b), 320.0);
        assert_eq!(lane.join, Position::new(150.0, 0.0));
        assert_eq!(lane.source, Position::new(-170.0, 0.0));
        assert_eq!(lane.target, Position::new(470.0, 0.0));
    }

    #[test]
    fn test_close_tables_keep_their_side() {
        let a = Position::new(200.0, 0.0);
        let b = Position::new(100.0, 0.0);
        let lane = lane_layout(Some(a), Some(b), 320.0);
        assert!(lane.source.x > lane.target.x);
    }

    #[test]
    fn test_one_side_placed() {
        let a = Position::new(10.0, 20.0);
        let lane = lane_layout(Some(a), None, 100.0);
        assert_eq!(lane.join, Position::new(110.0, 20.0));
        assert_eq!(lane.target, Position::new(210.0, 20.0));

        let lane = lane_layout(None, Some(a), 100.0);
        assert_eq!(lane.source, Position::new(-190.0, 20.0));
        assert_eq!(lane.join, Position::new(-90.0, 20.0));
    }

    #[test]
    fn test_nothing_placed() {
        let lane = lane_layout(None, None, 320.0);
        assert_eq!(lane.join, DEFAULT_LANE_ORIGIN);
        assert_eq!(lane.source, Position::new(80.0, 200.0));
        assert_eq!(lane.target, Position::new(720.0, 200.0));
    }

    #[test]
    fn test_self_reference() {
        let (table, join) = self_reference_layout(None, 320.0);
        assert_eq!(table, DEFAULT_LANE_ORIGIN);
        assert_eq!(join, Position::new(720.0, 200.0));
    }
}
