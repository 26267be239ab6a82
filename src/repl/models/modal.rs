//! Dialog visibility state
//!
//! Every dialog has its own flag. Opening one never closes another; the only
//! way back to a clean screen is [`ModalState::close_all`].

use super::card::Card;

/// Identifies one of the boolean-gated dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modal {
    EditProfile,
    AddPlace,
    EditAvatar,
    SuccessTooltip,
    FailTooltip,
}

impl Modal {
    pub const ALL: [Modal; 5] = [
        Modal::EditProfile,
        Modal::AddPlace,
        Modal::EditAvatar,
        Modal::SuccessTooltip,
        Modal::FailTooltip,
    ];
}

/// Visibility flags for all dialogs plus the image preview slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    edit_profile: bool,
    add_place: bool,
    edit_avatar: bool,
    success_tooltip: bool,
    fail_tooltip: bool,
    selected_card: Option<Card>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, modal: Modal) {
        *self.flag_mut(modal) = true;
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        match modal {
            Modal::EditProfile => self.edit_profile,
            Modal::AddPlace => self.add_place,
            Modal::EditAvatar => self.edit_avatar,
            Modal::SuccessTooltip => self.success_tooltip,
            Modal::FailTooltip => self.fail_tooltip,
        }
    }

    /// Show `card` in the image preview
    pub fn select_card(&mut self, card: Card) {
        self.selected_card = Some(card);
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.selected_card.as_ref()
    }

    /// Drop the preview if it shows the card with `card_id`
    pub fn deselect_card(&mut self, card_id: &str) -> bool {
        if self.selected_card.as_ref().is_some_and(|c| c.id == card_id) {
            self.selected_card = None;
            true
        } else {
            false
        }
    }

    /// Close every dialog and the image preview at once
    pub fn close_all(&mut self) {
        for modal in Modal::ALL {
            *self.flag_mut(modal) = false;
        }
        self.selected_card = None;
    }

    /// Whether anything is currently shown on top of the page
    pub fn any_open(&self) -> bool {
        Modal::ALL.iter().any(|m| self.is_open(*m)) || self.selected_card.is_some()
    }

    /// Dialogs that are currently open, in declaration order
    pub fn open_modals(&self) -> Vec<Modal> {
        Modal::ALL
            .into_iter()
            .filter(|m| self.is_open(*m))
            .collect()
    }

    fn flag_mut(&mut self, modal: Modal) -> &mut bool {
        match modal {
            Modal::EditProfile => &mut self.edit_profile,
            Modal::AddPlace => &mut self.add_place,
            Modal::EditAvatar => &mut self.edit_avatar,
            Modal::SuccessTooltip => &mut self.success_tooltip,
            Modal::FailTooltip => &mut self.fail_tooltip,
        }
    }
}
