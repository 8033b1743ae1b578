//! Edge-box outlines for room shells
//!
//! [`RoomOutlines`] turns wall, floor and ceiling anchors into four edge boxes
//! each and keeps track of what it spawned, so the boxes can be removed again
//! when the anchor changes or its room goes away.

use crate::anchor::{Anchor, AnchorId, RoomId};
use crate::event::SceneEventListener;
use crate::label::SceneLabel;
use crate::procedural::MaterialSpec;
use outline::{DegeneratePolicy, EdgeBoxInstance, OutlineError};
use std::collections::BTreeMap;

/// Default edge thickness in meters (2cm)
pub const EDGE_THICKNESS: f32 = 0.02;

/// Handle of a spawned edge box, issued by the [`EdgeSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeHandle(pub u64);

/// Receiver of edge boxes, usually the renderer's scene graph
pub trait EdgeSink {
    /// Create a renderable box and return a handle that can remove it later
    fn spawn_edge(&mut self, name: &str, edge: &EdgeBoxInstance, material: &MaterialSpec)
        -> EdgeHandle;

    fn despawn_edge(&mut self, handle: EdgeHandle);
}

/// Appearance of room-shell outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    pub thickness: f32,
    pub material: MaterialSpec,
    pub policy: DegeneratePolicy,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            thickness: EDGE_THICKNESS,
            material: MaterialSpec::default(),
            policy: DegeneratePolicy::Reject,
        }
    }
}

/// Why an anchor did not get an outline
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Not a wall, floor or ceiling
    NotRoomBounds,
    /// Room-shell anchor without plane bounds
    NoPlane,
    Degenerate(OutlineError),
}

/// Result of offering an anchor to [`RoomOutlines`]
#[derive(Debug, Clone, PartialEq)]
pub enum OutlineOutcome {
    Created([EdgeBoxInstance; 4]),
    Skipped(SkipReason),
}

impl OutlineOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, OutlineOutcome::Created(_))
    }
}

#[derive(Debug, Clone)]
struct TrackedOutline {
    room: RoomId,
    labels: Vec<SceneLabel>,
    edges: [EdgeBoxInstance; 4],
    handles: [EdgeHandle; 4],
}

/// Outline bookkeeping for all room-shell anchors
#[derive(Debug, Default)]
pub struct RoomOutlines {
    style: OutlineStyle,
    tracked: BTreeMap<AnchorId, TrackedOutline>,
}

impl RoomOutlines {
    pub fn new(style: OutlineStyle) -> Self {
        Self {
            style,
            tracked: BTreeMap::new(),
        }
    }

    pub fn style(&self) -> &OutlineStyle {
        &self.style
    }

    /// Number of anchors with an outline
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Number of live edge boxes
    pub fn edge_count(&self) -> usize {
        self.tracked.len() * 4
    }

    pub fn contains(&self, anchor: AnchorId) -> bool {
        self.tracked.contains_key(&anchor)
    }

    /// Edge boxes currently spawned for `anchor`
    pub fn edges(&self, anchor: AnchorId) -> Option<&[EdgeBoxInstance; 4]> {
        self.tracked.get(&anchor).map(|t| &t.edges)
    }

    /// Outlined anchors in id order
    pub fn anchors(&self) -> impl Iterator<Item = AnchorId> + '_ {
        self.tracked.keys().copied()
    }

    /// Outline a newly detected anchor.
    ///
    /// An anchor that already has an outline always loses its old boxes,
    /// even when the new data is skipped. Anchors that are not room shells,
    /// have no plane, or have degenerate dimensions are skipped.
    pub fn add_anchor<S: EdgeSink + ?Sized>(
        &mut self,
        anchor: &Anchor,
        sink: &mut S,
    ) -> OutlineOutcome {
        self.remove_anchor(anchor.id, sink);

        if !anchor.has_room_bounds_label() {
            return OutlineOutcome::Skipped(SkipReason::NotRoomBounds);
        }

        let Some(plane) = anchor.plane_descriptor() else {
            tracing::info!(
                "Anchor has no plane bounds, skipping: {} {:?}",
                anchor.id,
                anchor.labels
            );
            return OutlineOutcome::Skipped(SkipReason::NoPlane);
        };

        let edges = match plane.outline_with(self.style.thickness, self.style.policy) {
            Ok(edges) => edges,
            Err(e) => {
                tracing::warn!("Skipping outline for {}: {}", anchor.id, e);
                return OutlineOutcome::Skipped(SkipReason::Degenerate(e));
            }
        };

        tracing::info!(
            "Creating edges for anchor: labels={:?}, size={}x{}",
            anchor.labels,
            plane.width,
            plane.height
        );

        let material = self.style.material;
        let handles = edges.map(|edge| {
            let name = format!("roomEdge_{}", edge.side.index());
            sink.spawn_edge(&name, &edge, &material)
        });

        self.tracked.insert(
            anchor.id,
            TrackedOutline {
                room: anchor.room,
                labels: anchor.labels.clone(),
                edges,
                handles,
            },
        );

        OutlineOutcome::Created(edges)
    }

    /// Rebuild the outline of an anchor whose pose or bounds changed.
    ///
    /// If the updated anchor no longer qualifies, its old outline is removed.
    pub fn update_anchor<S: EdgeSink + ?Sized>(
        &mut self,
        anchor: &Anchor,
        sink: &mut S,
    ) -> OutlineOutcome {
        self.add_anchor(anchor, sink)
    }

    /// Despawn the outline of one anchor. Returns false if it had none.
    pub fn remove_anchor<S: EdgeSink + ?Sized>(&mut self, anchor: AnchorId, sink: &mut S) -> bool {
        match self.tracked.remove(&anchor) {
            Some(tracked) => {
                tracing::debug!("Removing edges for {} {:?}", anchor, tracked.labels);
                for handle in tracked.handles {
                    sink.despawn_edge(handle);
                }
                true
            }
            None => false,
        }
    }

    /// Despawn every outline that belongs to `room`, returning how many
    /// anchors were cleared
    pub fn clear_room<S: EdgeSink + ?Sized>(&mut self, room: RoomId, sink: &mut S) -> usize {
        let anchors: Vec<AnchorId> = self
            .tracked
            .iter()
            .filter(|(_, t)| t.room == room)
            .map(|(id, _)| *id)
            .collect();

        for id in &anchors {
            self.remove_anchor(*id, sink);
        }
        if !anchors.is_empty() {
            tracing::info!("Cleared {} room outlines for {}", anchors.len(), room);
        }
        anchors.len()
    }

    /// Despawn every outline
    pub fn clear<S: EdgeSink + ?Sized>(&mut self, sink: &mut S) {
        for (_, tracked) in std::mem::take(&mut self.tracked) {
            for handle in tracked.handles {
                sink.despawn_edge(handle);
            }
        }
    }

    /// Listener that applies scene events to these outlines through `sink`
    pub fn listener<'a, S: EdgeSink + ?Sized>(
        &'a mut self,
        sink: &'a mut S,
    ) -> OutlineListener<'a, S> {
        OutlineListener {
            outlines: self,
            sink,
        }
    }
}

/// [`SceneEventListener`] adapter over [`RoomOutlines`]
pub struct OutlineListener<'a, S: EdgeSink + ?Sized> {
    outlines: &'a mut RoomOutlines,
    sink: &'a mut S,
}

impl<S: EdgeSink + ?Sized> SceneEventListener for OutlineListener<'_, S> {
    fn on_room_removed(&mut self, room: RoomId) {
        self.outlines.clear_room(room, &mut *self.sink);
    }

    fn on_anchor_added(&mut self, anchor: &Anchor) {
        self.outlines.add_anchor(anchor, &mut *self.sink);
    }

    fn on_anchor_updated(&mut self, anchor: &Anchor) {
        self.outlines.update_anchor(anchor, &mut *self.sink);
    }

    fn on_anchor_removed(&mut self, _room: RoomId, anchor: AnchorId) {
        self.outlines.remove_anchor(anchor, &mut *self.sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::PlaneBounds;
    use crate::event::{SceneEvent, SceneEventQueue};
    use glam::{Quat, Vec3};
    use outline::{DimensionFault, Pose};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeSink {
        next: u64,
        live: HashMap<EdgeHandle, String>,
        despawned: Vec<EdgeHandle>,
    }

    impl EdgeSink for FakeSink {
        fn spawn_edge(
            &mut self,
            name: &str,
            _edge: &EdgeBoxInstance,
            _material: &MaterialSpec,
        ) -> EdgeHandle {
            self.next += 1;
            let handle = EdgeHandle(self.next);
            self.live.insert(handle, name.to_string());
            handle
        }

        fn despawn_edge(&mut self, handle: EdgeHandle) {
            assert!(self.live.remove(&handle).is_some(), "double despawn");
            self.despawned.push(handle);
        }
    }

    fn wall(id: u64, room: u64, width: f32, height: f32) -> Anchor {
        Anchor::new(
            AnchorId(id),
            RoomId(room),
            vec![SceneLabel::WallFace],
            Pose::new(Vec3::new(0.0, 1.25, -2.0), Quat::IDENTITY),
        )
        .with_plane(PlaneBounds::centered(width, height))
    }

    #[test]
    fn test_wall_gets_four_named_edges() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();

        let outcome = outlines.add_anchor(&wall(1, 1, 3.0, 2.5), &mut sink);

        assert!(outcome.is_created());
        assert_eq!(outlines.edge_count(), 4);
        let mut names: Vec<_> = sink.live.values().cloned().collect();
        names.sort();
        assert_eq!(
            names,
            vec!["roomEdge_0", "roomEdge_1", "roomEdge_2", "roomEdge_3"]
        );
    }

    #[test]
    fn test_furniture_is_ignored() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();
        let couch = Anchor::new(AnchorId(2), RoomId(1), vec![SceneLabel::Couch], Pose::IDENTITY)
            .with_plane(PlaneBounds::centered(2.0, 0.8));

        let outcome = outlines.add_anchor(&couch, &mut sink);

        assert_eq!(outcome, OutlineOutcome::Skipped(SkipReason::NotRoomBounds));
        assert!(sink.live.is_empty());
    }

    #[test]
    fn test_room_bounds_without_plane_is_skipped() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();
        let floor = Anchor::new(AnchorId(3), RoomId(1), vec![SceneLabel::Floor], Pose::IDENTITY);

        let outcome = outlines.add_anchor(&floor, &mut sink);

        assert_eq!(outcome, OutlineOutcome::Skipped(SkipReason::NoPlane));
        assert!(outlines.is_empty());
    }

    #[test]
    fn test_degenerate_plane_is_skipped() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();

        let outcome = outlines.add_anchor(&wall(4, 1, 1.0, 0.01), &mut sink);

        match outcome {
            OutlineOutcome::Skipped(SkipReason::Degenerate(e)) => {
                assert_eq!(e.fault(), DimensionFault::ThicknessExceedsHeight)
            }
            other => panic!("expected degenerate skip, got {:?}", other),
        }
        assert!(sink.live.is_empty());
    }

    #[test]
    fn test_clamp_policy_outlines_thin_plane() {
        let style = OutlineStyle {
            policy: DegeneratePolicy::Clamp,
            ..OutlineStyle::default()
        };
        let mut outlines = RoomOutlines::new(style);
        let mut sink = FakeSink::default();

        assert!(outlines.add_anchor(&wall(4, 1, 1.0, 0.01), &mut sink).is_created());
        let edges = outlines.edges(AnchorId(4)).unwrap();
        assert_eq!(edges[2].half_extents.y, 0.0);
    }

    #[test]
    fn test_readding_replaces_edges() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();

        outlines.add_anchor(&wall(1, 1, 3.0, 2.5), &mut sink);
        outlines.add_anchor(&wall(1, 1, 4.0, 2.5), &mut sink);

        assert_eq!(outlines.len(), 1);
        assert_eq!(sink.live.len(), 4);
        assert_eq!(sink.despawned.len(), 4);
        let edges = outlines.edges(AnchorId(1)).unwrap();
        assert!((edges[0].half_extents.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_readding_degenerate_drops_outline() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();
        outlines.add_anchor(&wall(1, 1, 3.0, 2.5), &mut sink);

        let outcome = outlines.add_anchor(&wall(1, 1, 3.0, 0.01), &mut sink);

        assert!(!outcome.is_created());
        assert!(!outlines.contains(AnchorId(1)));
        assert!(outlines.edges(AnchorId(1)).is_none());
        assert!(sink.live.is_empty());
        assert_eq!(sink.despawned.len(), 4);
    }

    #[test]
    fn test_readded_event_without_plane_drops_outline() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();
        let mut queue = SceneEventQueue::new();
        queue.push(SceneEvent::AnchorAdded {
            anchor: wall(1, 1, 3.0, 2.5),
        });
        queue.dispatch_all(&mut outlines.listener(&mut sink));
        assert_eq!(sink.live.len(), 4);

        let mut planeless = wall(1, 1, 3.0, 2.5);
        planeless.plane = None;
        queue.push(SceneEvent::AnchorAdded { anchor: planeless });
        queue.dispatch_all(&mut outlines.listener(&mut sink));

        assert!(outlines.is_empty());
        assert!(sink.live.is_empty());
    }

    #[test]
    fn test_update_to_non_room_bounds_drops_outline() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();
        outlines.add_anchor(&wall(1, 1, 3.0, 2.5), &mut sink);

        let mut relabelled = wall(1, 1, 3.0, 2.5);
        relabelled.labels = vec![SceneLabel::WallArt];
        let outcome = outlines.update_anchor(&relabelled, &mut sink);

        assert_eq!(outcome, OutlineOutcome::Skipped(SkipReason::NotRoomBounds));
        assert!(outlines.is_empty());
        assert!(sink.live.is_empty());
    }

    #[test]
    fn test_clear_room_only_touches_that_room() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();
        outlines.add_anchor(&wall(1, 1, 3.0, 2.5), &mut sink);
        outlines.add_anchor(&wall(2, 1, 3.0, 2.5), &mut sink);
        outlines.add_anchor(&wall(3, 2, 3.0, 2.5), &mut sink);

        assert_eq!(outlines.clear_room(RoomId(1), &mut sink), 2);
        assert_eq!(outlines.anchors().collect::<Vec<_>>(), vec![AnchorId(3)]);
        assert_eq!(sink.live.len(), 4);

        outlines.clear(&mut sink);
        assert!(outlines.is_empty());
        assert!(sink.live.is_empty());
    }

    #[test]
    fn test_remove_unknown_anchor() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();
        assert!(!outlines.remove_anchor(AnchorId(99), &mut sink));
    }

    #[test]
    fn test_listener_applies_events() {
        let mut outlines = RoomOutlines::default();
        let mut sink = FakeSink::default();
        let mut queue = SceneEventQueue::new();
        queue.push(SceneEvent::RoomAdded { room: RoomId(1) });
        queue.push(SceneEvent::AnchorAdded {
            anchor: wall(1, 1, 3.0, 2.5),
        });
        queue.push(SceneEvent::AnchorAdded {
            anchor: wall(2, 1, 3.0, 2.5),
        });
        queue.push(SceneEvent::AnchorRemoved {
            room: RoomId(1),
            anchor: AnchorId(1),
        });

        queue.dispatch_all(&mut outlines.listener(&mut sink));
        assert_eq!(outlines.anchors().collect::<Vec<_>>(), vec![AnchorId(2)]);

        queue.push(SceneEvent::RoomRemoved { room: RoomId(1) });
        queue.dispatch_all(&mut outlines.listener(&mut sink));
        assert!(outlines.is_empty());
        assert!(sink.live.is_empty());
    }
}
