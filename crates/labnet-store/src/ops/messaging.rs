//! Direct messages.

use labnet_core::{conversation_id, Conversation, Message};
use labnet_storage::Collection;

use crate::clock::stamp_id;
use crate::mutation::Mutation;

impl Mutation<'_> {
    /// Send `content` from the current user to `to`, opening the pair's
    /// conversation if needed. Returns the message id, or `None` when `to`
    /// is the current user or unknown.
    ///
    /// Every message after the first bumps the conversation's unread
    /// counter. The first one counts only when
    /// `messaging.count_first_message_unread` is set.
    pub fn send_message(&mut self, to: &str, content: String) -> Option<String> {
        let me = self.current_user_id();
        if to == me || self.state.find_user(to).is_none() {
            return None;
        }

        let timestamp = self.timeline.next();
        let id = stamp_id("msg", timestamp);
        let conversation = conversation_id(&me, to);
        let message = Message {
            id: id.clone(),
            conversation_id: conversation.clone(),
            from: me.clone(),
            to: to.to_string(),
            content,
            timestamp,
            read: false,
        };
        self.state.messages.push(message.clone());
        self.touch(Collection::Messages);

        match self
            .state
            .conversations
            .iter()
            .position(|c| c.id == conversation)
        {
            Some(index) => {
                let existing = &mut self.state.conversations[index];
                existing.last_message = message;
                existing.unread_count += 1;
            }
            None => {
                let unread_count = u32::from(self.config.messaging.count_first_message_unread);
                self.state.conversations.push(Conversation {
                    id: conversation,
                    participants: [me, to.to_string()],
                    last_message: message,
                    unread_count,
                });
            }
        }
        self.touch(Collection::Conversations);
        Some(id)
    }

    /// Zero the unread counter and mark every message in the conversation
    /// read.
    pub fn mark_conversation_read(&mut self, id: &str) -> bool {
        let Some(conversation) = self.state.conversations.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        conversation.unread_count = 0;
        conversation.last_message.read = true;
        self.touch(Collection::Conversations);

        let mut any = false;
        for message in self
            .state
            .messages
            .iter_mut()
            .filter(|m| m.conversation_id == id && !m.read)
        {
            message.read = true;
            any = true;
        }
        if any {
            self.touch(Collection::Messages);
        }
        true
    }
}
