//! In-process chat rooms. One room per project; each websocket connection
//! registers an unbounded sender keyed by a connection id.

use axum::extract::ws::Message;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct ChatRegistry {
    rooms: Arc<RwLock<HashMap<Uuid, HashMap<Uuid, mpsc::UnboundedSender<Message>>>>>,
}

impl ChatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection in a project room. Returns the connection id
    /// used for `leave`.
    pub async fn join(&self, project_id: Uuid, tx: mpsc::UnboundedSender<Message>) -> Uuid {
        let conn_id = Uuid::new_v4();
        self.rooms
            .write()
            .await
            .entry(project_id)
            .or_default()
            .insert(conn_id, tx);
        conn_id
    }

    /// Drop a connection; empty rooms are purged.
    pub async fn leave(&self, project_id: Uuid, conn_id: Uuid) {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get_mut(&project_id) {
            room.remove(&conn_id);
            if room.is_empty() {
                rooms.remove(&project_id);
            }
        }
    }

    /// Send a frame to every connection in the room except the sender's
    /// own. Connections whose channel is closed are skipped; their receive
    /// loop cleans them up.
    pub async fn broadcast_from(&self, project_id: Uuid, sender_conn: Uuid, message: Message) {
        let rooms = self.rooms.read().await;
        if let Some(room) = rooms.get(&project_id) {
            for (conn_id, tx) in room {
                if *conn_id == sender_conn {
                    continue;
                }
                let _ = tx.send(message.clone());
            }
        }
    }

    pub async fn room_size(&self, project_id: Uuid) -> usize {
        self.rooms
            .read()
            .await
            .get(&project_id)
            .map_or(0, HashMap::len)
    }
}
