//! Unit tests for the object and agent-body data model.

#[cfg(test)]
mod object {
    use gw_core::{Coord, ObjectId, Tick, TypeTag};

    use crate::object::{PropertyValue, WorldObject};

    #[test]
    fn standard_constructors_set_capabilities() {
        let wall = WorldObject::wall("w", Coord::new(1, 1));
        assert!(!wall.is_traversable);
        assert!(!wall.is_movable);
        assert!(wall.blocks_placement);
        assert!(wall.is_kind(TypeTag::Wall));
        assert!(wall.is_kind(TypeTag::Object));

        let tile = WorldObject::area_tile("a", Coord::new(1, 1));
        assert!(tile.is_traversable);
        assert!(!tile.blocks_placement);

        let block = WorldObject::block("b", Coord::new(1, 1));
        assert!(block.is_movable);
        assert_eq!(block.most_specific_tag(), TypeTag::Block);
    }

    #[test]
    fn unregistered_objects_have_invalid_id() {
        let obj = WorldObject::new("x", Coord::new(0, 0));
        assert_eq!(obj.id, ObjectId::INVALID);
        assert!(!obj.is_carried());
    }

    #[test]
    fn door_traversability_tracks_open_state() {
        let mut door = WorldObject::door("d", Coord::new(2, 2), false);
        assert!(!door.is_traversable);
        assert!(door.set_door_open(true));
        assert!(door.is_traversable);
        assert!(door.door.unwrap().is_open);
        assert!(door.set_door_open(false));
        assert!(!door.is_traversable);
    }

    #[test]
    fn set_door_open_rejects_non_doors() {
        let mut wall = WorldObject::wall("w", Coord::new(0, 0));
        assert!(!wall.set_door_open(true));
        assert!(wall.door.is_none());
    }

    #[test]
    fn battery_decays_to_zero_and_stops() {
        let mut battery = WorldObject::battery("bat", Coord::new(0, 0), 2);
        let hook = battery.on_tick.unwrap();
        hook(&mut battery, Tick(1));
        assert_eq!(battery.properties["charge"].as_int(), Some(1));
        hook(&mut battery, Tick(2));
        hook(&mut battery, Tick(3));
        assert_eq!(battery.properties["charge"].as_int(), Some(0));
    }

    #[test]
    fn property_conversions() {
        assert_eq!(PropertyValue::from(3i64).as_int(), Some(3));
        assert_eq!(PropertyValue::from(3i64).as_float(), Some(3.0));
        assert_eq!(PropertyValue::from("hi").as_text(), Some("hi"));
        assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
        assert_eq!(PropertyValue::from(1.5).as_int(), None);
    }
}

#[cfg(test)]
mod busy {
    use gw_core::{ActionArgs, ActionKind, Tick};

    use crate::busy::BusyState;

    #[test]
    fn idle_never_blocks() {
        let state = BusyState::Idle;
        assert!(!state.blocks(Tick(0)));
        assert!(!state.blocks(Tick(100)));
        assert_eq!(state.commit_tick(), None);
    }

    #[test]
    fn zero_duration_commits_same_tick() {
        let mut state = BusyState::Idle;
        state.begin(Tick(5), Some((ActionKind::MoveNorth, ActionArgs::none())), 0);
        assert!(state.blocks(Tick(5)));
        assert!(state.commits_at(Tick(5)));
        assert!(!state.blocks(Tick(6)));
    }

    #[test]
    fn duration_blocks_inclusive_window() {
        let mut state = BusyState::Idle;
        state.begin(Tick(10), Some((ActionKind::MoveEast, ActionArgs::none())), 3);
        for t in 10..=13 {
            assert!(state.blocks(Tick(t)), "tick {t} should block");
        }
        assert!(!state.blocks(Tick(14)));
        assert!(state.commits_at(Tick(13)));
        assert!(!state.commits_at(Tick(12)));
    }

    #[test]
    fn take_decided_consumes_once() {
        let mut state = BusyState::Idle;
        state.begin(Tick(0), Some((ActionKind::GrabObject, ActionArgs::none())), 0);
        assert!(state.take_decided().is_some());
        assert!(state.take_decided().is_none());
        state.clear();
        assert!(state.is_idle());
    }

    #[test]
    fn idle_decision_still_occupies_the_tick() {
        let mut state = BusyState::Idle;
        state.begin(Tick(4), None, 0);
        assert!(state.blocks(Tick(4)));
        assert!(state.take_decided().is_none());
    }
}

#[cfg(test)]
mod sense {
    use gw_core::{Coord, TypeTag};

    use crate::sense::{SenseCapability, SenseRange};

    #[test]
    fn bounded_range_is_inclusive() {
        let range = SenseRange::Bounded(5.0);
        let from = Coord::new(0, 0);
        assert!(range.covers(from, Coord::new(3, 4))); // exactly 5.0
        assert!(!range.covers(from, Coord::new(3, 5)));
    }

    #[test]
    fn specific_tag_overrides_wildcard() {
        let sense = SenseCapability::uniform(2.0)
            .with_range(TypeTag::Door, SenseRange::Unbounded)
            .with_range(TypeTag::Agent, SenseRange::Bounded(0.0));
        let from = Coord::new(0, 0);
        let far = Coord::new(50, 50);

        assert!(sense.perceives(from, far, TypeTag::Door));
        assert!(!sense.perceives(from, far, TypeTag::Wall));
        assert!(!sense.perceives(from, Coord::new(1, 0), TypeTag::Agent));
        assert!(sense.perceives(from, from, TypeTag::Agent));
    }

    #[test]
    fn default_is_omniscient() {
        let sense = SenseCapability::default();
        assert!(sense.perceives(Coord::new(0, 0), Coord::new(999, 999), TypeTag::Wall));
    }

    #[test]
    fn without_a_wildcard_unlisted_kinds_are_invisible() {
        let sense = SenseCapability::selective()
            .with_range(TypeTag::Door, SenseRange::Unbounded);
        let from = Coord::new(0, 0);

        assert!(sense.perceives(from, Coord::new(9, 9), TypeTag::Door));
        assert!(!sense.perceives(from, from, TypeTag::Wall));
        assert_eq!(sense.range_for(TypeTag::Block), None);
    }
}

#[cfg(test)]
mod agent {
    use gw_core::{ActionKind, Coord, ObjectId, TypeTag};

    use crate::agent::AgentBody;
    use crate::object::WorldObject;

    #[test]
    fn agents_block_cells_and_cannot_be_carried() {
        let body = AgentBody::new("scout", Coord::new(3, 3));
        assert!(!body.is_traversable);
        assert!(!body.is_movable);
        assert!(body.is_kind(TypeTag::Agent));
        assert_eq!(body.location, Coord::new(3, 3));
    }

    #[test]
    fn default_action_set_is_complete() {
        let body = AgentBody::new("scout", Coord::new(0, 0));
        for kind in ActionKind::ALL {
            assert!(body.can_perform(kind));
        }
        let limited = body.with_action_set(vec![ActionKind::MoveNorth]);
        assert!(limited.can_perform(ActionKind::MoveNorth));
        assert!(!limited.can_perform(ActionKind::GrabObject));
    }

    #[test]
    fn take_carried_removes_by_id() {
        let mut body = AgentBody::new("mover", Coord::new(0, 0));
        let mut block = WorldObject::block("b", Coord::new(0, 0));
        block.id = ObjectId(7);
        body.carrying.push(block);
        assert_eq!(body.carry_count(), 1);

        assert!(body.take_carried(ObjectId(8)).is_none());
        let taken = body.take_carried(ObjectId(7)).unwrap();
        assert_eq!(taken.name, "b");
        assert_eq!(body.carry_count(), 0);
    }
}
