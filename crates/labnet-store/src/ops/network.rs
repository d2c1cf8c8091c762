//! Connection requests and the connection graph.

use std::collections::BTreeSet;

use labnet_core::{ConnectionRequest, NotificationKind, RequestStatus};
use labnet_storage::Collection;

use crate::clock::stamp_id;
use crate::mutation::Mutation;

impl Mutation<'_> {
    /// Ask `to_id` to connect. Returns the new request id.
    ///
    /// The mutual-connection count is fixed at send time. Sending twice to
    /// the same user creates two pending requests.
    pub fn send_connection_request(&mut self, to_id: &str) -> Option<String> {
        if to_id == self.state.current_user.id {
            return None;
        }
        let target = self.state.all_users.iter().find(|u| u.id == to_id)?;
        let mutual_connections = self.state.current_user.mutual_connections(target);

        let timestamp = self.timeline.next();
        let id = stamp_id("req", timestamp);
        self.state.connection_requests.push(ConnectionRequest {
            id: id.clone(),
            from: self.me(),
            to: to_id.to_string(),
            timestamp,
            status: RequestStatus::Pending,
            mutual_connections,
        });
        self.touch(Collection::ConnectionRequests);

        self.notify(
            stamp_id("notif", timestamp),
            NotificationKind::Connection,
            None,
            "sent you a connection request",
            timestamp,
        );
        Some(id)
    }

    /// Link both ends of a pending request and mark it accepted.
    pub fn accept_connection_request(&mut self, id: &str) -> bool {
        let Some(request) = self.pending_request(id) else {
            return false;
        };
        let (a, b) = (request.from.id.clone(), request.to.clone());
        self.set_status(id, RequestStatus::Accepted);
        self.set_connection(&a, &b, true);
        true
    }

    /// Mark a pending request rejected. The record is kept.
    pub fn reject_connection_request(&mut self, id: &str) -> bool {
        if self.pending_request(id).is_none() {
            return false;
        }
        self.set_status(id, RequestStatus::Rejected);
        true
    }

    /// Drop a pending request entirely.
    pub fn withdraw_connection_request(&mut self, id: &str) -> bool {
        if self.pending_request(id).is_none() {
            return false;
        }
        self.state.connection_requests.retain(|r| r.id != id);
        self.touch(Collection::ConnectionRequests);
        true
    }

    /// Unlink the current user and `user_id` on both sides. Past requests
    /// between them keep their status.
    pub fn remove_connection(&mut self, user_id: &str) -> bool {
        let me = self.current_user_id();
        if !self.state.current_user.is_connected_to(user_id) {
            return false;
        }
        self.set_connection(&me, user_id, false);
        true
    }

    fn pending_request(&self, id: &str) -> Option<&ConnectionRequest> {
        self.state
            .connection_requests
            .iter()
            .find(|r| r.id == id && r.is_pending())
    }

    fn set_status(&mut self, id: &str, status: RequestStatus) {
        if let Some(request) = self.state.connection_requests.iter_mut().find(|r| r.id == id) {
            request.status = status;
            self.touch(Collection::ConnectionRequests);
        }
    }

    /// Add or remove the edge between `a` and `b` on every stored copy of
    /// either user.
    fn set_connection(&mut self, a: &str, b: &str, linked: bool) {
        if a == b {
            return;
        }
        let edit = |connections: &mut BTreeSet<String>, other: &str| {
            if linked {
                connections.insert(other.to_string())
            } else {
                connections.remove(other)
            }
        };

        for (this, other) in [(a, b), (b, a)] {
            let current = &mut self.state.current_user;
            if current.id == this && edit(&mut current.connections, other) {
                self.touch(Collection::CurrentUser);
            }
            if let Some(user) = self.state.all_users.iter_mut().find(|u| u.id == this) {
                if edit(&mut user.connections, other) {
                    self.touch(Collection::AllUsers);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use labnet_core::{ConnectionRequest, NotificationKind, RequestStatus, Snapshot};

    use crate::seed;
    use crate::test_support::store;

    #[test]
    fn request_counts_mutual_connections_at_send_time() {
        let (mut store, _clock) = store();
        let id = store.mutate(|m| m.send_connection_request("4")).unwrap();

        let request = &store.connection_requests()[0];
        assert_eq!(request.id, id);
        assert_eq!(request.to, "4");
        assert_eq!(request.from.id, "1");
        assert_eq!(request.status, RequestStatus::Pending);
        // User 4 has no connections in the seed.
        assert_eq!(request.mutual_connections, 0);

        let n = &store.notifications()[0];
        assert_eq!(n.kind, NotificationKind::Connection);
        assert!(n.post_id.is_none());
    }

    #[test]
    fn request_to_self_or_unknown_user_is_ignored() {
        let (mut store, _clock) = store();
        assert!(store.mutate(|m| m.send_connection_request("1")).is_none());
        assert!(store.mutate(|m| m.send_connection_request("99")).is_none());
        assert!(store.connection_requests().is_empty());
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn duplicate_pending_requests_are_permitted() {
        let (mut store, _clock) = store();
        let (a, b) = store.mutate(|m| {
            (
                m.send_connection_request("5").unwrap(),
                m.send_connection_request("5").unwrap(),
            )
        });
        assert_ne!(a, b);
        assert_eq!(store.connection_requests().len(), 2);
        assert!(store.connection_requests().iter().all(|r| r.is_pending()));
    }

    #[test]
    fn accept_links_both_sides() {
        let (mut store, _clock) = store();
        let id = store.mutate(|m| m.send_connection_request("4")).unwrap();
        assert!(store.mutate(|m| m.accept_connection_request(&id)));

        assert!(store.current_user().is_connected_to("4"));
        let four = store.state().find_user("4").unwrap();
        assert!(four.is_connected_to("1"));
        assert_eq!(store.connection_requests()[0].status, RequestStatus::Accepted);
    }

    #[test]
    fn accepting_a_received_request_links_the_sender() {
        let (mut store, clock) = store();
        let sender = seed::other_users().into_iter().find(|u| u.id == "5").unwrap();
        clock.advance(Duration::minutes(1));
        store.mutate(|m| {
            let timestamp = m.timeline.next();
            m.state.connection_requests.push(ConnectionRequest {
                id: "req-incoming".to_string(),
                from: Snapshot::from(sender),
                to: "1".to_string(),
                timestamp,
                status: RequestStatus::Pending,
                mutual_connections: 0,
            });
        });

        assert!(store.mutate(|m| m.accept_connection_request("req-incoming")));
        assert!(store.current_user().is_connected_to("5"));
        assert!(store.state().find_user("5").unwrap().is_connected_to("1"));
    }

    #[test]
    fn only_pending_requests_can_be_resolved() {
        let (mut store, _clock) = store();
        let id = store.mutate(|m| m.send_connection_request("4")).unwrap();
        assert!(store.mutate(|m| m.reject_connection_request(&id)));
        assert_eq!(store.connection_requests()[0].status, RequestStatus::Rejected);

        assert!(!store.mutate(|m| m.accept_connection_request(&id)));
        assert!(!store.mutate(|m| m.withdraw_connection_request(&id)));
        assert!(!store.current_user().is_connected_to("4"));
        assert_eq!(store.connection_requests().len(), 1);
    }

    #[test]
    fn withdraw_removes_the_record() {
        let (mut store, _clock) = store();
        let id = store.mutate(|m| m.send_connection_request("5")).unwrap();
        assert!(store.mutate(|m| m.withdraw_connection_request(&id)));
        assert!(store.connection_requests().is_empty());
    }

    #[test]
    fn remove_connection_unlinks_and_keeps_history() {
        let (mut store, _clock) = store();
        let id = store.mutate(|m| m.send_connection_request("4")).unwrap();
        store.mutate(|m| m.accept_connection_request(&id));

        assert!(store.mutate(|m| m.remove_connection("4")));
        assert!(!store.current_user().is_connected_to("4"));
        assert!(!store.state().find_user("4").unwrap().is_connected_to("1"));
        assert_eq!(store.connection_requests()[0].status, RequestStatus::Accepted);
    }

    #[test]
    fn remove_unknown_connection_is_a_noop() {
        let (mut store, _clock) = store();
        let before = store.state().clone();
        assert!(!store.mutate(|m| m.remove_connection("5")));
        assert_eq!(store.state(), &before);
    }
}
