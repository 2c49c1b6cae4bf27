use common::{ContentStatus, UserRole};

use crate::entity::content;

/// The user on whose behalf an operation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub role: UserRole,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Whether `actor` may see a content item with the given status and author.
///
/// Published items are public. Drafts and archived items are visible only to
/// their author and to admins.
pub fn can_view(status: ContentStatus, author_id: Option<i32>, actor: Option<&Actor>) -> bool {
    if status == ContentStatus::Published {
        return true;
    }
    match actor {
        Some(actor) => actor.is_admin() || author_id == Some(actor.user_id),
        None => false,
    }
}

/// Drop items the actor may not see. Order is preserved.
pub fn filter_visible(items: Vec<content::Model>, actor: Option<&Actor>) -> Vec<content::Model> {
    items
        .into_iter()
        .filter(|c| can_view(c.status, c.author_id, actor))
        .collect()
}

/// Whether `actor` may edit or delete a content item.
pub fn can_modify(author_id: Option<i32>, actor: &Actor) -> bool {
    actor.role.is_staff() || author_id == Some(actor.user_id)
}
