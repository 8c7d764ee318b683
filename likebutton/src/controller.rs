use std::sync::Arc;

use dashmap::{DashMap, DashSet};

use crate::dom::{Document, ElementId};
use crate::errors::LikeButtonError;
use crate::markup::MarkupConfig;
use crate::models::action::DisplayState;
use crate::models::action_url::ActionUrl;
use crate::models::item_id::ItemId;
use crate::models::like_button::LikeButton;
use crate::models::toggle_response::{TogglePayload, ToggleResponse};
use crate::request::RequestLayer;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum IgnoreReason {
    Unbound,
    Pending,
}

#[derive(Debug)]
pub enum Settlement {
    Success(ToggleResponse),
    Failure(LikeButtonError),
}

#[derive(Debug)]
pub enum Activation {
    Ignored(IgnoreReason),
    Settled(Settlement),
}

impl Activation {
    pub fn is_success(&self) -> bool {
        matches!(self, Activation::Settled(Settlement::Success(_)))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Activation::Settled(Settlement::Failure(_)))
    }
}

/// Marks an item IDLE again when the activation that claimed it ends, whether it settled or
/// its future was dropped.
struct PendingGuard<'a> {
    pending: &'a DashSet<ItemId>,
    item_id: ItemId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.remove(&self.item_id);
    }
}

/// Drives the click -> request -> settlement cycle of every like button on a page.
///
/// Buttons are IDLE or PENDING, keyed by item id: an activation for an item that already has a
/// request in flight is dropped. Button attributes, icons and counters are only touched once
/// the server has answered successfully.
pub struct ToggleController<D: Document, T: Transport> {
    document: Arc<D>,
    requests: RequestLayer<T>,
    markup: MarkupConfig,
    bound: DashMap<ElementId, ItemId>,
    pending: DashSet<ItemId>,
}

impl<D: Document, T: Transport> ToggleController<D, T> {
    pub fn new(document: Arc<D>, requests: RequestLayer<T>, markup: MarkupConfig) -> Self {
        Self {
            document,
            requests,
            markup,
            bound: DashMap::new(),
            pending: DashSet::new(),
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn requests(&self) -> &RequestLayer<T> {
        &self.requests
    }

    pub fn markup(&self) -> &MarkupConfig {
        &self.markup
    }

    /// Discovers like buttons through the marker attribute. Returns how many are bound.
    pub fn bind(&self) -> usize {
        for element in self.document.query_all(&self.markup.button_selector()) {
            match self.document.attribute(element, &self.markup.item_id_attribute) {
                Some(item_id) => {
                    self.bound.insert(element, ItemId::from(item_id));
                }
                None => log::warn!(
                    "Like button {} has no {} attribute, not binding it",
                    element,
                    self.markup.item_id_attribute
                ),
            }
        }

        self.bound.len()
    }

    pub fn is_bound(&self, element: ElementId) -> bool {
        self.bound.contains_key(&element)
    }

    pub fn is_pending(&self, item_id: &ItemId) -> bool {
        self.pending.contains(item_id)
    }

    /// Current state of a button as rendered.
    pub fn button(&self, element: ElementId) -> Result<LikeButton, LikeButtonError> {
        let item_id = match self.bound.get(&element) {
            Some(item_id) => item_id.value().clone(),
            None => self
                .document
                .attribute(element, &self.markup.item_id_attribute)
                .map(ItemId::from)
                .ok_or_else(|| {
                    LikeButtonError::MissingAttribute(self.markup.item_id_attribute.clone(), element.to_string())
                })?,
        };

        let url = self
            .document
            .attribute(element, &self.markup.url_attribute)
            .ok_or_else(|| {
                LikeButtonError::MissingAttribute(self.markup.url_attribute.clone(), element.to_string())
            })?;

        let mut button = LikeButton::new(item_id, ActionUrl::parse(&url)?);

        if let Some(state) = self.rendered_display_state(element) {
            button.display_state = state;
        }

        Ok(button)
    }

    /// Counter elements showing the count of `item_id`.
    pub fn counters(&self, item_id: &ItemId) -> Vec<ElementId> {
        self.document.query_all(&self.markup.counter_selector(item_id))
    }

    pub async fn activate(&self, element: ElementId) -> Activation {
        let item_id = match self.bound.get(&element) {
            Some(item_id) => item_id.value().clone(),
            None => {
                log::debug!("Ignoring activation of unbound element {}", element);
                return Activation::Ignored(IgnoreReason::Unbound);
            }
        };

        if !self.pending.insert(item_id.clone()) {
            log::debug!("Ignoring activation of item {}: request already in flight", item_id);
            return Activation::Ignored(IgnoreReason::Pending);
        }

        let _guard = PendingGuard {
            pending: &self.pending,
            item_id: item_id.clone(),
        };

        match self.toggle(element).await {
            Ok(response) => {
                log::info!(
                    "Item {} settled: liked={} count={}",
                    item_id,
                    response.liked,
                    response.count
                );

                Activation::Settled(Settlement::Success(response))
            }
            Err(e) => {
                if e.is_settlement_failure() {
                    log::error!("Failed to toggle like for item {}: {}", item_id, e);
                } else {
                    log::warn!("Like button of item {} is not usable: {}", item_id, e);
                }

                Activation::Settled(Settlement::Failure(e))
            }
        }
    }

    async fn toggle(&self, element: ElementId) -> Result<ToggleResponse, LikeButtonError> {
        // captured before the request; the page is left alone until settlement
        let button = self.button(element)?;
        let payload = TogglePayload {
            post_id: &button.item_id,
        };

        let response = self
            .requests
            .post_json(&button.action_url.to_string(), &payload)
            .await?;

        if !response.is_success() {
            return Err(LikeButtonError::ServerRejection(
                response.status,
                String::from_utf8_lossy(&response.body).into_owned(),
            ));
        }

        let toggle_response = ToggleResponse::from_slice(&response.body)?;

        self.settle(&button, &toggle_response);

        Ok(toggle_response)
    }

    /// Applies a successful response to every bound button of the item and to its counters.
    /// New attribute values are computed up front so the page is never left half-updated.
    fn settle(&self, button: &LikeButton, response: &ToggleResponse) {
        let mut updates: Vec<(ElementId, LikeButton)> = vec![];

        for element in self.buttons_of(&button.item_id) {
            match self.button(element) {
                Ok(sibling) => updates.push((element, sibling.settled(response.liked))),
                Err(e) => log::warn!("Skipping button {} of item {}: {}", element, button.item_id, e),
            }
        }

        for (element, settled) in updates {
            self.render(element, &settled);
        }

        let count = response.count.to_string();
        for counter in self.counters(&button.item_id) {
            self.document.set_text(counter, &count);
        }
    }

    fn render(&self, element: ElementId, button: &LikeButton) {
        self.document
            .set_attribute(element, &self.markup.url_attribute, &button.action_url.to_string());

        for icon in self.document.children(element, &self.markup.icon_tag) {
            self.document
                .set_attribute(icon, "class", self.markup.icon_class(button.display_state));
        }
    }

    /// Bound buttons of `item_id`, in document order.
    pub fn buttons_of(&self, item_id: &ItemId) -> Vec<ElementId> {
        let mut elements: Vec<ElementId> = self
            .bound
            .iter()
            .filter(|entry| entry.value() == item_id)
            .map(|entry| *entry.key())
            .collect();
        elements.sort();

        elements
    }

    fn rendered_display_state(&self, element: ElementId) -> Option<DisplayState> {
        let icon = self.document.children(element, &self.markup.icon_tag).into_iter().next()?;
        let class = self.document.attribute(icon, "class")?;

        self.markup.display_state_from_class(&class)
    }
}
