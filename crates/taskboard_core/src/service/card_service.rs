//! Card use-case service.
//!
//! # Responsibility
//! - Create, update, list and delete cards scoped to one task list.
//! - Re-parent cards between lists (`move_card`).
//!
//! # Invariants
//! - A card is only created under, or moved into, an existing list.
//! - Updates overwrite only supplied fields.
//! - `move_card` validates in a fixed order: target id present, position not
//!   null, card exists, target list exists.
//! - Positions are never validated for uniqueness or contiguity.

use crate::model::card::{normalize_labels, Card, CardId, CardPatch, MoveCard, NewCard};
use crate::model::task_list::{TaskListId, DEFAULT_POSITION};
use crate::repo::card_repo::{CardDraft, CardRepository};
use crate::repo::list_repo::TaskListRepository;
use crate::repo::EntityKind;
use crate::service::{ServiceError, ServiceResult};
use log::{debug, info};

/// Use-case service for cards.
pub struct CardService<C: CardRepository, L: TaskListRepository> {
    cards: C,
    lists: L,
}

impl<C: CardRepository, L: TaskListRepository> CardService<C, L> {
    /// Creates a service from card and task list repositories.
    pub fn new(cards: C, lists: L) -> Self {
        Self { cards, lists }
    }

    /// Lists a task list's cards by ascending position.
    ///
    /// An unknown list yields an empty result rather than an error.
    pub fn list_by_list(&self, list_id: TaskListId) -> ServiceResult<Vec<Card>> {
        Ok(self.cards.list_by_list(list_id)?)
    }

    /// Creates a card under `list_id`.
    pub fn create_card(&self, list_id: TaskListId, input: NewCard) -> ServiceResult<Card> {
        self.require_list(list_id)?;

        let draft = CardDraft {
            list_id,
            title: input.title.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            position: input.position.unwrap_or(DEFAULT_POSITION),
            due_date: input.due_date,
            labels: input
                .labels
                .as_deref()
                .map(normalize_labels)
                .unwrap_or_default(),
        };
        let card = self.cards.create_card(&draft)?;
        info!(
            "event=card_create module=service status=ok card_id={} list_id={} position={}",
            card.id, list_id, card.position
        );
        Ok(card)
    }

    /// Applies a partial update to one card.
    pub fn update_card(&self, id: CardId, patch: &CardPatch) -> ServiceResult<Card> {
        let mut card = self.require_card(id)?;
        patch.apply_to(&mut card);
        self.cards.update_card(&card)?;
        info!(
            "event=card_update module=service status=ok card_id={} position={}",
            id, card.position
        );
        Ok(card)
    }

    /// Moves a card into another list, optionally setting its position.
    pub fn move_card(&self, id: CardId, request: &MoveCard) -> ServiceResult<Card> {
        let new_list_id = request
            .new_list_id
            .ok_or(ServiceError::BadRequest("newListId is required"))?;
        let position = match request.position {
            None => None,
            Some(Some(position)) => Some(position),
            Some(None) => return Err(ServiceError::BadRequest("position must not be null")),
        };

        let mut card = self.require_card(id)?;
        self.require_list(new_list_id)?;

        let old_list_id = card.list_id;
        card.list_id = new_list_id;
        if let Some(position) = position {
            card.position = position;
        }
        self.cards.update_card(&card)?;
        info!(
            "event=card_move module=service status=ok card_id={} from_list_id={} to_list_id={} position={}",
            id, old_list_id, new_list_id, card.position
        );
        Ok(card)
    }

    /// Deletes one card.
    pub fn delete_card(&self, id: CardId) -> ServiceResult<()> {
        if self.cards.delete_card(id)? {
            info!("event=card_delete module=service status=ok card_id={id}");
        } else {
            debug!("event=card_delete module=service status=noop card_id={id}");
        }
        Ok(())
    }

    fn require_card(&self, id: CardId) -> ServiceResult<Card> {
        self.cards.get_card(id)?.ok_or(ServiceError::NotFound {
            kind: EntityKind::Card,
            id,
        })
    }

    fn require_list(&self, id: TaskListId) -> ServiceResult<()> {
        if self.lists.get_list(id)?.is_none() {
            debug!("event=list_lookup module=service status=miss list_id={id}");
            return Err(ServiceError::NotFound {
                kind: EntityKind::TaskList,
                id,
            });
        }
        Ok(())
    }
}
