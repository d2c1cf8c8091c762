use labnet_storage::Collection;

use crate::mutation::Mutation;

impl Mutation<'_> {
    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        let Some(notification) = self.state.notifications.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        if !notification.read {
            notification.read = true;
            self.touch(Collection::Notifications);
        }
        true
    }

    /// Returns how many notifications changed.
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut flipped = 0;
        for notification in self.state.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            flipped += 1;
        }
        if flipped > 0 {
            self.touch(Collection::Notifications);
        }
        flipped
    }
}
