//! Room lifecycle tests
//!
//! Feeds a JSON room description through the event queue and checks which
//! anchors end up outlined and where their edge boxes land.

use outline::{EdgeBoxInstance, EdgeSide};
use scene::{
    AnchorId, EdgeHandle, EdgeSink, MaterialSpec, Room, RoomOutlines, SceneEvent, SceneEventQueue,
};

/// Sink that keeps every live box by handle
#[derive(Default)]
struct RecordingSink {
    next: u64,
    live: Vec<(EdgeHandle, EdgeBoxInstance)>,
}

impl EdgeSink for RecordingSink {
    fn spawn_edge(
        &mut self,
        _name: &str,
        edge: &EdgeBoxInstance,
        _material: &MaterialSpec,
    ) -> EdgeHandle {
        self.next += 1;
        self.live.push((EdgeHandle(self.next), *edge));
        EdgeHandle(self.next)
    }

    fn despawn_edge(&mut self, handle: EdgeHandle) {
        self.live.retain(|(h, _)| *h != handle);
    }
}

/// 4m x 3m room, 2.5m high, one table
const ROOM_JSON: &str = r#"{
    "id": 1,
    "anchors": [
        { "id": 10, "room": 1, "labels": ["FLOOR"],
          "pose": { "position": [0.0, 0.0, 0.0], "orientation": [-0.70710677, 0.0, 0.0, 0.70710677] },
          "plane": { "min": [-2.0, -1.5], "max": [2.0, 1.5] } },
        { "id": 11, "room": 1, "labels": ["CEILING"],
          "pose": { "position": [0.0, 2.5, 0.0], "orientation": [0.70710677, 0.0, 0.0, 0.70710677] },
          "plane": { "min": [-2.0, -1.5], "max": [2.0, 1.5] } },
        { "id": 12, "room": 1, "labels": ["WALL_FACE"],
          "pose": { "position": [0.0, 1.25, -1.5], "orientation": [0.0, 0.0, 0.0, 1.0] },
          "plane": { "min": [-2.0, -1.25], "max": [2.0, 1.25] } },
        { "id": 13, "room": 1, "labels": ["WALL_FACE"],
          "pose": { "position": [2.0, 1.25, 0.0], "orientation": [0.0, -0.70710677, 0.0, 0.70710677] },
          "plane": { "min": [-1.5, -1.25], "max": [1.5, 1.25] } },
        { "id": 20, "room": 1, "labels": ["TABLE"],
          "pose": { "position": [0.5, 0.75, 0.0], "orientation": [-0.70710677, 0.0, 0.0, 0.70710677] },
          "plane": { "min": [-0.6, -0.4], "max": [0.6, 0.4] } }
    ]
}"#;

fn load_room() -> Room {
    serde_json::from_str(ROOM_JSON).expect("room fixture should parse")
}

fn added_events(room: &Room) -> SceneEventQueue {
    let mut queue = SceneEventQueue::new();
    queue.push(SceneEvent::RoomAdded { room: room.id });
    queue.extend(room.anchors.iter().cloned().map(|anchor| SceneEvent::AnchorAdded { anchor }));
    queue
}

#[test]
fn test_only_room_shell_is_outlined() {
    let room = load_room();
    let mut outlines = RoomOutlines::default();
    let mut sink = RecordingSink::default();

    added_events(&room).dispatch_all(&mut outlines.listener(&mut sink));

    assert_eq!(room.room_bounds().count(), 4);
    assert_eq!(
        outlines.anchors().collect::<Vec<_>>(),
        vec![AnchorId(10), AnchorId(11), AnchorId(12), AnchorId(13)]
    );
    assert_eq!(sink.live.len(), 16);
}

#[test]
fn test_floor_edges_lie_on_floor() {
    let room = load_room();
    let mut outlines = RoomOutlines::default();
    let mut sink = RecordingSink::default();
    added_events(&room).dispatch_all(&mut outlines.listener(&mut sink));

    let floor = outlines.edges(AnchorId(10)).unwrap();
    for edge in floor {
        assert!(edge.world_pose.position.y.abs() < 1e-5);
    }
    // Local +Y of the floor points to world -Z
    let top = floor.iter().find(|e| e.side == EdgeSide::Top).unwrap();
    assert!((top.world_pose.position.z + 1.5).abs() < 1e-5);
    assert!((top.half_extents.x - 2.0).abs() < 1e-6);
}

#[test]
fn test_side_wall_edges_follow_rotation() {
    let room = load_room();
    let mut outlines = RoomOutlines::default();
    let mut sink = RecordingSink::default();
    added_events(&room).dispatch_all(&mut outlines.listener(&mut sink));

    let wall = outlines.edges(AnchorId(13)).unwrap();
    // Wall faces -X; its local X axis maps onto world +Z
    for edge in wall {
        assert!((edge.world_pose.position.x - 2.0).abs() < 1e-5);
    }
    let left = wall.iter().find(|e| e.side == EdgeSide::Left).unwrap();
    assert!((left.world_pose.position.z + 1.5).abs() < 1e-5);
}

#[test]
fn test_room_removal_clears_all_edges() {
    let room = load_room();
    let mut outlines = RoomOutlines::default();
    let mut sink = RecordingSink::default();
    added_events(&room).dispatch_all(&mut outlines.listener(&mut sink));

    let mut queue = SceneEventQueue::new();
    queue.push(SceneEvent::RoomRemoved { room: room.id });
    queue.dispatch_all(&mut outlines.listener(&mut sink));

    assert!(outlines.is_empty());
    assert!(sink.live.is_empty());
}
