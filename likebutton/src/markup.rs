use serde::Deserialize;

use crate::constants::{
    ACTION_ATTRIBUTE, ACTION_MARKER, COUNTER_ATTRIBUTE, COUNTER_PREFIX, ICON_TAG, ITEM_ID_ATTRIBUTE,
    LIKED_ICON_CLASS, UNLIKED_ICON_CLASS, URL_ATTRIBUTE,
};
use crate::dom::Selector;
use crate::models::action::DisplayState;
use crate::models::item_id::ItemId;

/// Attribute names and classes the server-rendered markup uses for like buttons.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MarkupConfig {
    pub action_attribute: String,
    pub action_marker: String,
    pub item_id_attribute: String,
    pub url_attribute: String,
    pub counter_attribute: String,
    pub counter_prefix: String,
    pub icon_tag: String,
    pub liked_icon_class: String,
    pub unliked_icon_class: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            action_attribute: ACTION_ATTRIBUTE.to_string(),
            action_marker: ACTION_MARKER.to_string(),
            item_id_attribute: ITEM_ID_ATTRIBUTE.to_string(),
            url_attribute: URL_ATTRIBUTE.to_string(),
            counter_attribute: COUNTER_ATTRIBUTE.to_string(),
            counter_prefix: COUNTER_PREFIX.to_string(),
            icon_tag: ICON_TAG.to_string(),
            liked_icon_class: LIKED_ICON_CLASS.to_string(),
            unliked_icon_class: UNLIKED_ICON_CLASS.to_string(),
        }
    }
}

impl MarkupConfig {
    pub fn button_selector(&self) -> Selector {
        Selector::attribute(&self.action_attribute, &self.action_marker)
    }

    pub fn counter_selector(&self, item_id: &ItemId) -> Selector {
        Selector::attribute(&self.counter_attribute, format!("{}{}", self.counter_prefix, item_id))
    }

    pub fn icon_class(&self, state: DisplayState) -> &str {
        match state {
            DisplayState::Liked => &self.liked_icon_class,
            DisplayState::Unliked => &self.unliked_icon_class,
        }
    }

    pub fn display_state_from_class(&self, class: &str) -> Option<DisplayState> {
        if class == self.liked_icon_class {
            Some(DisplayState::Liked)
        } else if class == self.unliked_icon_class {
            Some(DisplayState::Unliked)
        } else {
            None
        }
    }
}
