//! Token decoding, fan-out, and inbox delivery.

use std::collections::BTreeMap;

use gw_core::{MessageId, ObjectId, RoomId, Tick};
use tracing::warn;

use crate::message::{Address, Message};
use crate::room::{Chatroom, RoomKind};

/// Name of the always-present world-wide room.
pub const GLOBAL_ROOM: &str = "global";

/// Sender name used for messages injected from outside any agent.
const WORLD_SENDER: &str = "god";

// ── AgentDirectory ────────────────────────────────────────────────────────────

/// The router's per-tick view of who exists: unique agent names and team
/// rosters.  Built fresh from the registry each routing pass so removed
/// agents stop resolving immediately.
#[derive(Clone, Debug, Default)]
pub struct AgentDirectory {
    pub by_name: BTreeMap<String, ObjectId>,
    pub teams: BTreeMap<String, Vec<ObjectId>>,
}

impl AgentDirectory {
    pub fn new(
        by_name: BTreeMap<String, ObjectId>,
        teams: BTreeMap<String, Vec<ObjectId>>,
    ) -> Self {
        Self { by_name, teams }
    }

    pub fn name_of(&self, id: ObjectId) -> Option<&str> {
        self.by_name
            .iter()
            .find(|&(_, &agent)| agent == id)
            .map(|(name, _)| name.as_str())
    }
}

// ── RouteReport ───────────────────────────────────────────────────────────────

/// Outcome of routing one message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteReport {
    /// Number of inbox copies delivered.
    pub delivered: usize,
    /// Tokens that resolved to neither a team (with the sender a member)
    /// nor an agent.  Delivery to the remaining tokens still happened.
    pub unroutable: Vec<String>,
}

// ── MessageRouter ─────────────────────────────────────────────────────────────

/// Decodes addresses, keeps durable chatroom histories, and queues inbox
/// copies for the scheduler to hand out.
///
/// Decoding rules per name token:
///
/// - a team name fans out to every member, but only when the sender is a
///   member itself;
/// - an agent name delivers privately and logs to the pair's private room;
/// - a token that is both (the default one-member-team case) does both, but
///   the recipient gets a single inbox copy, via the team fan-out;
/// - anything else is dropped with a warning, other tokens of the same
///   message still deliver.
///
/// Every stored copy, whether in an inbox or a room log, gets a fresh
/// [`MessageId`] and the routing tick.
pub struct MessageRouter {
    next_message_id: u64,
    next_room_id: u32,
    global_room: RoomId,
    rooms: BTreeMap<RoomId, Chatroom>,
    rooms_by_name: BTreeMap<String, RoomId>,
    inboxes: BTreeMap<ObjectId, Vec<Message>>,
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageRouter {
    pub fn new() -> Self {
        let mut router = Self {
            next_message_id: 0,
            next_room_id: 0,
            global_room: RoomId::INVALID,
            rooms: BTreeMap::new(),
            rooms_by_name: BTreeMap::new(),
            inboxes: BTreeMap::new(),
        };
        router.global_room = router.ensure_room(GLOBAL_ROOM, RoomKind::Global);
        router
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Decode and deliver one message against the current directory.
    pub fn route(&mut self, message: &Message, tick: Tick, dir: &AgentDirectory) -> RouteReport {
        let mut report = RouteReport::default();
        match message.to.clone() {
            Address::Global => {
                let copy = self.stamped(message, Address::Global, tick);
                self.room_mut(self.global_room).append(copy);
                for (name, &recipient) in &dir.by_name {
                    if recipient != message.from {
                        let copy = self.stamped(message, Address::To(name.clone()), tick);
                        self.deliver(recipient, copy, &mut report);
                    }
                }
            }
            Address::To(token) => self.route_token(message, &token, tick, dir, &mut report),
            Address::Many(tokens) => {
                for token in tokens {
                    self.route_token(message, &token, tick, dir, &mut report);
                }
            }
        }
        report
    }

    fn route_token(
        &mut self,
        message: &Message,
        token: &str,
        tick: Tick,
        dir: &AgentDirectory,
        report: &mut RouteReport,
    ) {
        // Team fan-out, only when the sender belongs to the team.
        let mut handled_as_team = false;
        if let Some(members) = dir.teams.get(token)
            && members.contains(&message.from)
        {
            handled_as_team = true;
            let room_id = self.ensure_room(token, RoomKind::Team);
            let copy = self.stamped(message, Address::To(token.to_owned()), tick);
            {
                let room = self.room_mut(room_id);
                room.members.extend(members.iter().copied());
                room.append(copy);
            }
            for &member in members {
                let copy = self.stamped(message, Address::To(token.to_owned()), tick);
                self.deliver(member, copy, report);
            }
        }

        // The same token may also name an agent.  The private room is logged
        // either way, but the inbox copy is skipped when the team fan-out
        // above already delivered one.
        if let Some(&recipient) = dir.by_name.get(token) {
            let sender_name = dir.name_of(message.from).unwrap_or(WORLD_SENDER).to_owned();
            let room_name = Chatroom::private_name(&sender_name, token);
            let room_id = self.ensure_room(&room_name, RoomKind::Private);
            let copy = self.stamped(message, Address::To(token.to_owned()), tick);
            {
                let room = self.room_mut(room_id);
                room.members.insert(recipient);
                if message.from != ObjectId::INVALID {
                    room.members.insert(message.from);
                }
                room.append(copy);
            }
            if !handled_as_team {
                let copy = self.stamped(message, Address::To(token.to_owned()), tick);
                self.deliver(recipient, copy, report);
            }
        } else if !handled_as_team {
            warn!(token, "message token matches no team or agent, dropping");
            report.unroutable.push(token.to_owned());
        }
    }

    // ── Inboxes ───────────────────────────────────────────────────────────

    /// Drain everything queued for `agent` since the last call.
    pub fn take_inbox(&mut self, agent: ObjectId) -> Vec<Message> {
        self.inboxes.remove(&agent).unwrap_or_default()
    }

    /// Drop the inbox of a removed agent.
    pub fn forget_agent(&mut self, agent: ObjectId) {
        self.inboxes.remove(&agent);
    }

    // ── Rooms ─────────────────────────────────────────────────────────────

    pub fn room(&self, id: RoomId) -> Option<&Chatroom> {
        self.rooms.get(&id)
    }

    pub fn room_by_name(&self, name: &str) -> Option<&Chatroom> {
        self.rooms_by_name.get(name).and_then(|id| self.rooms.get(id))
    }

    pub fn global(&self) -> &Chatroom {
        &self.rooms[&self.global_room]
    }

    /// Rooms `agent` may read, ascending room id.  The global room always
    /// qualifies.
    pub fn rooms_for(&self, agent: ObjectId) -> Vec<&Chatroom> {
        self.rooms
            .values()
            .filter(|room| room.is_member(agent))
            .collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn ensure_room(&mut self, name: &str, kind: RoomKind) -> RoomId {
        if let Some(&id) = self.rooms_by_name.get(name) {
            return id;
        }
        let id = RoomId(self.next_room_id);
        self.next_room_id += 1;
        self.rooms.insert(id, Chatroom::new(id, name, kind));
        self.rooms_by_name.insert(name.to_owned(), id);
        id
    }

    fn room_mut(&mut self, id: RoomId) -> &mut Chatroom {
        // Room ids are only minted by ensure_room, so the lookup cannot miss.
        self.rooms.get_mut(&id).expect("room id minted by ensure_room")
    }

    fn stamped(&mut self, base: &Message, to: Address, tick: Tick) -> Message {
        let mut copy = base.clone();
        copy.id = MessageId(self.next_message_id);
        self.next_message_id += 1;
        copy.to = to;
        copy.tick = tick;
        copy
    }

    fn deliver(&mut self, recipient: ObjectId, copy: Message, report: &mut RouteReport) {
        self.inboxes.entry(recipient).or_default().push(copy);
        report.delivered += 1;
    }
}
