//! Axis-aligned rectangle predicates, bottom-left origin.

use crate::types::{Opening, PanelPlacement, Wall};
use serde::{Deserialize, Serialize};

/// Widest wall (cm) the wall editor accepts.
pub const MAX_WALL_WIDTH: f64 = 1000.0;
/// Tallest wall (cm) the wall editor accepts.
pub const MAX_WALL_HEIGHT: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Same rectangle expressed relative to `origin`.
    pub fn translate_into(&self, origin: &Rect) -> Rect {
        Rect::new(self.x - origin.x, self.y - origin.y, self.width, self.height)
    }
}

impl From<&Opening> for Rect {
    fn from(opening: &Opening) -> Self {
        Rect::new(opening.x, opening.y, opening.width, opening.height)
    }
}

impl From<&PanelPlacement> for Rect {
    fn from(placement: &PanelPlacement) -> Self {
        Rect::new(placement.x, placement.y, placement.width, placement.height)
    }
}

/// True unless the rectangles are separated along either axis.
/// Touching edges do not count as overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.top() <= b.y || b.top() <= a.y)
}

/// True iff `inner` lies entirely within `outer`.
pub fn contains(outer: &Rect, inner: &Rect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.right() <= outer.right()
        && inner.top() <= outer.top()
}

/// Overlap of two rectangles.
///
/// Only meaningful when [`overlaps`] holds: disjoint inputs give negative
/// extents, which callers must treat as "no cut".
pub fn intersect(a: &Rect, b: &Rect) -> Rect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    Rect::new(
        x,
        y,
        a.right().min(b.right()) - x,
        a.top().min(b.top()) - y,
    )
}

/// Overlap predicate for the external validation layer.
pub fn rectangles_overlap(a: &Rect, b: &Rect) -> bool {
    overlaps(a, b)
}

pub fn openings_overlap(a: &Opening, b: &Opening) -> bool {
    overlaps(&a.into(), &b.into())
}

/// True when the opening pokes out of the wall on any side.
pub fn opening_out_of_bounds(opening: &Opening, wall: &Wall) -> bool {
    opening.x < 0.0
        || opening.y < 0.0
        || opening.x + opening.width > wall.width
        || opening.y + opening.height > wall.height
}

/// Problem found by [`validate_wall`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WallIssue {
    /// Wider than [`MAX_WALL_WIDTH`]
    WallTooWide,
    /// Taller than [`MAX_WALL_HEIGHT`]
    WallTooTall,
    NegativeOpeningPosition { opening_id: String },
    OpeningOutOfBounds { opening_id: String },
    OverlappingOpenings { first: String, second: String },
}

/// Runs the editor's wall limits and every opening predicate over a wall.
/// The optimizer assumes an empty result.
pub fn validate_wall(wall: &Wall) -> Vec<WallIssue> {
    let mut issues = Vec::new();

    if wall.width > MAX_WALL_WIDTH {
        issues.push(WallIssue::WallTooWide);
    }
    if wall.height > MAX_WALL_HEIGHT {
        issues.push(WallIssue::WallTooTall);
    }

    for opening in &wall.openings {
        if opening.x < 0.0 || opening.y < 0.0 {
            issues.push(WallIssue::NegativeOpeningPosition {
                opening_id: opening.id.clone(),
            });
        } else if opening_out_of_bounds(opening, wall) {
            issues.push(WallIssue::OpeningOutOfBounds {
                opening_id: opening.id.clone(),
            });
        }
    }

    for (i, first) in wall.openings.iter().enumerate() {
        for second in &wall.openings[i + 1..] {
            if openings_overlap(first, second) {
                issues.push(WallIssue::OverlappingOpenings {
                    first: first.id.clone(),
                    second: second.id.clone(),
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opening(id: &str, x: f64, y: f64, width: f64, height: f64) -> Opening {
        Opening {
            id: id.into(),
            x,
            y,
            width,
            height,
            kind: "window".into(),
        }
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(5.0, 5.0, 10.0, 10.0)),
            (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(10.0, 0.0, 10.0, 10.0)),
            (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(2.0, 2.0, 3.0, 3.0)),
            (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(0.0, 20.0, 10.0, 10.0)),
        ];
        for (a, b) in cases {
            assert_eq!(rectangles_overlap(&a, &b), rectangles_overlap(&b, &a));
        }
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 120.0, 250.0);
        let right = Rect::new(120.0, 0.0, 120.0, 250.0);
        let above = Rect::new(0.0, 250.0, 120.0, 250.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &above));
        assert!(overlaps(&a, &Rect::new(119.0, 249.0, 5.0, 5.0)));
    }

    #[test]
    fn rectangle_contains_itself() {
        let r = Rect::new(3.0, 4.0, 5.0, 6.0);
        assert!(contains(&r, &r));
        assert!(contains(&r, &Rect::new(4.0, 5.0, 1.0, 1.0)));
        assert!(!contains(&r, &Rect::new(2.0, 5.0, 2.0, 1.0)));
        assert!(!contains(&Rect::new(4.0, 5.0, 1.0, 1.0), &r));
    }

    #[test]
    fn intersect_returns_overlap_region() {
        let panel = Rect::new(0.0, 0.0, 120.0, 250.0);
        let door = Rect::new(50.0, 0.0, 90.0, 210.0);
        assert_eq!(intersect(&panel, &door), Rect::new(50.0, 0.0, 70.0, 210.0));
        assert_eq!(intersect(&door, &panel), intersect(&panel, &door));
    }

    #[test]
    fn intersect_of_disjoint_rectangles_is_negative() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        let r = intersect(&a, &b);
        assert!(r.width < 0.0);
    }

    #[test]
    fn detects_out_of_bounds_openings() {
        let wall = Wall {
            id: "w".into(),
            name: "North".into(),
            width: 300.0,
            height: 250.0,
            openings: vec![],
        };
        assert!(!opening_out_of_bounds(&opening("a", 0.0, 0.0, 300.0, 250.0), &wall));
        assert!(opening_out_of_bounds(&opening("b", -1.0, 0.0, 10.0, 10.0), &wall));
        assert!(opening_out_of_bounds(&opening("c", 250.0, 0.0, 60.0, 10.0), &wall));
        assert!(opening_out_of_bounds(&opening("d", 0.0, 200.0, 10.0, 60.0), &wall));
    }

    #[test]
    fn validate_wall_reports_every_issue() {
        let wall = Wall {
            id: "w".into(),
            name: String::new(),
            width: 300.0,
            height: 250.0,
            openings: vec![
                opening("a", 10.0, 10.0, 50.0, 50.0),
                opening("b", 40.0, 40.0, 50.0, 50.0),
                opening("c", 280.0, 10.0, 50.0, 50.0),
            ],
        };

        let issues = validate_wall(&wall);
        assert_eq!(
            issues,
            vec![
                WallIssue::OpeningOutOfBounds {
                    opening_id: "c".into()
                },
                WallIssue::OverlappingOpenings {
                    first: "a".into(),
                    second: "b".into()
                },
            ]
        );
    }

    #[test]
    fn validate_wall_enforces_editor_limits() {
        let wall = Wall {
            id: "w".into(),
            name: String::new(),
            width: 1200.0,
            height: 520.0,
            openings: vec![opening("a", -5.0, 10.0, 50.0, 50.0)],
        };

        assert_eq!(
            validate_wall(&wall),
            vec![
                WallIssue::WallTooWide,
                WallIssue::WallTooTall,
                WallIssue::NegativeOpeningPosition {
                    opening_id: "a".into()
                },
            ]
        );

        let at_limits = Wall {
            width: MAX_WALL_WIDTH,
            height: MAX_WALL_HEIGHT,
            openings: vec![],
            ..wall
        };
        assert!(validate_wall(&at_limits).is_empty());
    }
}
