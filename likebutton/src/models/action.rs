use serde::{Deserialize, Serialize};

/// The action the next activation of a button performs.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Like,
    Unlike,
}

impl Action {
    pub fn inverse(self) -> Self {
        match self {
            Action::Like => Action::Unlike,
            Action::Unlike => Action::Like,
        }
    }

    /// An item the user already likes can only be unliked next.
    pub fn from_liked(liked: bool) -> Self {
        if liked {
            Action::Unlike
        } else {
            Action::Like
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum DisplayState {
    Liked,
    Unliked,
}

impl DisplayState {
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::Like => DisplayState::Unliked,
            Action::Unlike => DisplayState::Liked,
        }
    }

    pub fn is_liked(self) -> bool {
        self == DisplayState::Liked
    }
}
