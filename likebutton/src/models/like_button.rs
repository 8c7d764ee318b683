use crate::models::action::{Action, DisplayState};
use crate::models::action_url::ActionUrl;
use crate::models::item_id::ItemId;

/// Snapshot of a like button as rendered on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeButton {
    pub item_id: ItemId,
    pub current_action: Action,
    pub action_url: ActionUrl,
    pub display_state: DisplayState,
}

impl LikeButton {
    pub fn new(item_id: ItemId, action_url: ActionUrl) -> Self {
        let current_action = action_url.action();

        Self {
            item_id,
            current_action,
            action_url,
            display_state: DisplayState::for_action(current_action),
        }
    }

    /// Button state after the server reported `liked`. All three fields move together.
    pub fn settled(&self, liked: bool) -> Self {
        let current_action = Action::from_liked(liked);

        Self {
            item_id: self.item_id.clone(),
            current_action,
            action_url: self.action_url.with_action(current_action),
            display_state: DisplayState::for_action(current_action),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.display_state.is_liked() == (self.current_action == Action::Unlike)
            && self.action_url.action() == self.current_action
    }
}
