//! Pool of reusable offcuts shared by every wall of one optimization run.

use crate::geometry::{overlaps, Rect};
use crate::types::{Offcut, OffcutOrigin, OffcutPosition, PanelDimensions, PanelPlacement};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::trace;

/// Absorbs float noise when comparing derived lengths (cm).
const EPSILON: f64 = 1e-9;

/// Leftover rectangle found on a placement, not yet registered in the pool
#[derive(Debug, Clone, PartialEq)]
pub struct OffcutCandidate {
    pub width: f64,
    pub height: f64,
    pub position: OffcutPosition,
    /// Position relative to the original panel's bottom-left corner
    pub local_x: f64,
    pub local_y: f64,
}

impl OffcutCandidate {
    fn new(position: OffcutPosition, local_x: f64, local_y: f64, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            position,
            local_x,
            local_y,
        }
    }

    fn rect(&self) -> Rect {
        Rect::new(self.local_x, self.local_y, self.width, self.height)
    }

    fn key(&self) -> (i64, i64, i64, i64) {
        let q = |v: f64| (v * 100.0).round() as i64;
        (q(self.width), q(self.height), q(self.local_x), q(self.local_y))
    }
}

/// Finds the reusable leftovers of one placement.
///
/// `source` is the piece the placement was cut from: the effective panel for
/// fresh panels, the offcut itself otherwise. Trim strips lie outside the
/// placement (right, top, corner); with `around_cuts` the four rectangles
/// framing each cut region inside the placement are added as well. Only
/// candidates whose smaller side exceeds `min_side` and that cover no cut
/// region (a margin crossing another opening's hole is not solid material)
/// survive, deduplicated by size and position.
pub fn identify_offcuts(
    placement: &PanelPlacement,
    source: PanelDimensions,
    min_side: f64,
    around_cuts: bool,
) -> Vec<OffcutCandidate> {
    let (w, h) = (placement.width, placement.height);
    let extra_w = source.width - w;
    let extra_h = source.height - h;

    let mut candidates = Vec::new();
    if extra_w > EPSILON {
        candidates.push(OffcutCandidate::new(OffcutPosition::Right, w, 0.0, extra_w, h));
    }
    if extra_h > EPSILON {
        candidates.push(OffcutCandidate::new(OffcutPosition::Top, 0.0, h, w, extra_h));
    }
    if extra_w > EPSILON && extra_h > EPSILON {
        candidates.push(OffcutCandidate::new(
            OffcutPosition::Corner,
            w,
            h,
            extra_w,
            extra_h,
        ));
    }

    let holes: Vec<Rect> = placement
        .cuts
        .iter()
        .map(|cut| Rect::new(cut.x, cut.y, cut.width, cut.height))
        .collect();

    if around_cuts {
        for cut in &holes {
            candidates.push(OffcutCandidate::new(
                OffcutPosition::LeftOfCut,
                0.0,
                0.0,
                cut.x,
                h,
            ));
            candidates.push(OffcutCandidate::new(
                OffcutPosition::RightOfCut,
                cut.right(),
                0.0,
                w - cut.right(),
                h,
            ));
            candidates.push(OffcutCandidate::new(
                OffcutPosition::BelowCut,
                cut.x,
                0.0,
                cut.width,
                cut.y,
            ));
            candidates.push(OffcutCandidate::new(
                OffcutPosition::AboveCut,
                cut.x,
                cut.top(),
                cut.width,
                h - cut.top(),
            ));
        }
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| c.width.min(c.height) > min_side)
        .filter(|c| !holes.iter().any(|hole| overlaps(&c.rect(), hole)))
        .filter(|c| seen.insert(c.key()))
        .collect()
}

/// Offcut pool, kept ordered by area (largest first).
///
/// Entries are never removed: consuming an offcut only flips its `consumed`
/// flag, and a consumed offcut is never handed out again.
#[derive(Debug, Clone)]
pub struct OffcutInventory {
    offcuts: Vec<Offcut>,
    next_id: u64,
}

impl Default for OffcutInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl OffcutInventory {
    pub fn new() -> Self {
        Self {
            offcuts: Vec::new(),
            next_id: 1,
        }
    }

    /// Registers candidates produced by [`identify_offcuts`]. Returns the new ids.
    pub fn add(&mut self, origin: &OffcutOrigin, candidates: Vec<OffcutCandidate>) -> Vec<u64> {
        let mut ids = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let id = self.next_id;
            self.next_id += 1;
            ids.push(id);
            self.offcuts.push(Offcut {
                id,
                width: candidate.width,
                height: candidate.height,
                area: candidate.width * candidate.height,
                origin: origin.clone(),
                position: candidate.position,
                local_x: candidate.local_x,
                local_y: candidate.local_y,
                consumed: false,
            });
        }

        // Stable: equal areas keep insertion order
        self.offcuts
            .sort_by(|a, b| b.area.partial_cmp(&a.area).unwrap_or(Ordering::Equal));
        ids
    }

    /// Unconsumed offcut at least `width` x `height` that wastes the least area.
    pub fn find_fit(&self, width: f64, height: f64) -> Option<&Offcut> {
        let requested = width * height;
        let mut best: Option<&Offcut> = None;

        for offcut in self.available() {
            if offcut.width + EPSILON < width || offcut.height + EPSILON < height {
                continue;
            }
            match best {
                Some(current) if current.area - requested <= offcut.area - requested => {}
                _ => best = Some(offcut),
            }
        }

        best
    }

    /// Like [`find_fit`](Self::find_fit), but marks the match consumed.
    pub fn consume_fit(&mut self, width: f64, height: f64) -> Option<Offcut> {
        let id = self.find_fit(width, height)?.id;
        let offcut = self.offcuts.iter_mut().find(|o| o.id == id)?;
        offcut.consumed = true;
        trace!(
            offcut = id,
            width = offcut.width,
            height = offcut.height,
            requested_width = width,
            requested_height = height,
            "offcut consumed"
        );
        Some(offcut.clone())
    }

    pub fn get(&self, id: u64) -> Option<&Offcut> {
        self.offcuts.iter().find(|o| o.id == id)
    }

    pub fn available(&self) -> impl Iterator<Item = &Offcut> {
        self.offcuts.iter().filter(|o| !o.consumed)
    }

    pub fn consumed(&self) -> impl Iterator<Item = &Offcut> {
        self.offcuts.iter().filter(|o| o.consumed)
    }

    pub fn len(&self) -> usize {
        self.offcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offcuts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cut, Orientation};

    fn placement(width: f64, height: f64, cuts: Vec<Cut>) -> PanelPlacement {
        PanelPlacement {
            wall_id: "w1".into(),
            x: 0.0,
            y: 0.0,
            width,
            height,
            orientation: Orientation::Normal,
            needs_trim: true,
            cuts,
            offcut_id: None,
        }
    }

    fn origin() -> OffcutOrigin {
        OffcutOrigin {
            wall_id: "w1".into(),
            placement_index: 0,
            x: 0.0,
            y: 0.0,
        }
    }

    fn candidate(width: f64, height: f64) -> OffcutCandidate {
        OffcutCandidate::new(OffcutPosition::Right, 0.0, 0.0, width, height)
    }

    #[test]
    fn trimmed_panel_yields_right_top_and_corner_strips() {
        let p = placement(68.0, 238.0, vec![]);
        let found = identify_offcuts(&p, PanelDimensions::new(120.0, 250.0), 10.0, true);

        assert_eq!(
            found,
            vec![
                OffcutCandidate::new(OffcutPosition::Right, 68.0, 0.0, 52.0, 238.0),
                OffcutCandidate::new(OffcutPosition::Top, 0.0, 238.0, 68.0, 12.0),
                OffcutCandidate::new(OffcutPosition::Corner, 68.0, 238.0, 52.0, 12.0),
            ]
        );
    }

    #[test]
    fn strips_below_threshold_are_dropped() {
        let p = placement(68.0, 245.0, vec![]);
        let found = identify_offcuts(&p, PanelDimensions::new(120.0, 250.0), 10.0, true);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position, OffcutPosition::Right);
    }

    #[test]
    fn cut_margins_become_candidates() {
        let cut = Cut {
            x: 30.0,
            y: 100.0,
            width: 40.0,
            height: 50.0,
            kind: "window".into(),
        };
        let p = placement(120.0, 250.0, vec![cut]);
        let found = identify_offcuts(&p, PanelDimensions::new(120.0, 250.0), 10.0, true);

        let positions: Vec<_> = found.iter().map(|c| c.position).collect();
        assert_eq!(
            positions,
            vec![
                OffcutPosition::LeftOfCut,
                OffcutPosition::RightOfCut,
                OffcutPosition::BelowCut,
                OffcutPosition::AboveCut,
            ]
        );
        assert_eq!(found[1].width, 50.0);
        assert_eq!(found[3].height, 100.0);

        assert!(identify_offcuts(&p, PanelDimensions::new(120.0, 250.0), 10.0, false).is_empty());
    }

    #[test]
    fn stacked_cuts_share_deduplicated_margins() {
        let socket = Cut {
            x: 30.0,
            y: 20.0,
            width: 40.0,
            height: 20.0,
            kind: "socket".into(),
        };
        let window = Cut {
            x: 30.0,
            y: 120.0,
            width: 40.0,
            height: 60.0,
            kind: "window".into(),
        };
        let p = placement(120.0, 250.0, vec![socket, window]);
        let found = identify_offcuts(&p, PanelDimensions::new(120.0, 250.0), 10.0, true);

        let lefts = found
            .iter()
            .filter(|c| c.position == OffcutPosition::LeftOfCut)
            .count();
        assert_eq!(lefts, 1);
    }

    #[test]
    fn margins_crossing_another_cut_are_dropped() {
        let socket = Cut {
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 30.0,
            kind: "socket".into(),
        };
        let window = Cut {
            x: 60.0,
            y: 100.0,
            width: 40.0,
            height: 50.0,
            kind: "window".into(),
        };
        let p = placement(120.0, 250.0, vec![socket, window]);
        let found = identify_offcuts(&p, PanelDimensions::new(120.0, 250.0), 10.0, true);

        for candidate in &found {
            for cut in &p.cuts {
                let hole = Rect::new(cut.x, cut.y, cut.width, cut.height);
                assert!(
                    !overlaps(&candidate.rect(), &hole),
                    "{:?} covers the {} hole",
                    candidate,
                    cut.kind
                );
            }
        }

        // Right of the socket and left of the window both cross the other hole;
        // left of the socket is only 10 cm wide
        assert_eq!(
            found,
            vec![
                OffcutCandidate::new(OffcutPosition::BelowCut, 10.0, 0.0, 30.0, 20.0),
                OffcutCandidate::new(OffcutPosition::AboveCut, 10.0, 50.0, 30.0, 200.0),
                OffcutCandidate::new(OffcutPosition::RightOfCut, 100.0, 0.0, 20.0, 250.0),
                OffcutCandidate::new(OffcutPosition::BelowCut, 60.0, 0.0, 40.0, 100.0),
                OffcutCandidate::new(OffcutPosition::AboveCut, 60.0, 150.0, 40.0, 100.0),
            ]
        );
    }

    #[test]
    fn pool_is_ordered_by_area_and_ids_are_unique() {
        let mut inventory = OffcutInventory::new();
        assert!(inventory.is_empty());
        let first = inventory.add(&origin(), vec![candidate(20.0, 20.0)]);
        let second = inventory.add(&origin(), vec![candidate(50.0, 50.0), candidate(30.0, 30.0)]);

        assert_eq!(first, vec![1]);
        assert_eq!(second, vec![2, 3]);
        let areas: Vec<f64> = inventory.available().map(|o| o.area).collect();
        assert_eq!(areas, vec![2500.0, 900.0, 400.0]);
    }

    #[test]
    fn find_fit_picks_least_waste() {
        let mut inventory = OffcutInventory::new();
        inventory.add(
            &origin(),
            vec![candidate(100.0, 100.0), candidate(60.0, 40.0), candidate(45.0, 45.0)],
        );

        let fit = inventory.find_fit(40.0, 40.0).unwrap();
        assert_eq!((fit.width, fit.height), (45.0, 45.0));

        let fit = inventory.find_fit(50.0, 40.0).unwrap();
        assert_eq!((fit.width, fit.height), (60.0, 40.0));

        assert!(inventory.find_fit(101.0, 10.0).is_none());
    }

    #[test]
    fn find_fit_does_not_rotate_offcuts() {
        let mut inventory = OffcutInventory::new();
        inventory.add(&origin(), vec![candidate(50.0, 20.0)]);

        assert!(inventory.find_fit(20.0, 50.0).is_none());
        assert!(inventory.find_fit(50.0, 20.0).is_some());
    }

    #[test]
    fn consumed_offcut_is_never_returned_again() {
        let mut inventory = OffcutInventory::new();
        inventory.add(&origin(), vec![candidate(50.0, 50.0)]);

        let taken = inventory.consume_fit(50.0, 50.0).unwrap();
        assert!(taken.consumed);
        assert!(inventory.get(taken.id).unwrap().consumed);
        assert!(inventory.find_fit(10.0, 10.0).is_none());
        assert!(inventory.consume_fit(10.0, 10.0).is_none());
        assert_eq!(inventory.available().count(), 0);
        assert_eq!(inventory.consumed().count(), 1);
        assert_eq!(inventory.len(), 1);
    }
}
