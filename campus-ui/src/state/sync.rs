//! Local list synchronization
//!
//! Every page keeps its own copy of the records it shows. After a mutation
//! succeeds the returned record is folded into that copy by id instead of
//! re-fetching the list.

use crate::api::HasId;

/// Append a freshly created record
pub fn apply_created<T: HasId>(list: &mut Vec<T>, record: T) {
    list.push(record);
}

/// Replace the element with the same id. Unknown ids leave the list alone.
pub fn apply_updated<T: HasId>(list: &mut Vec<T>, record: T) {
    if let Some(slot) = list.iter_mut().find(|item| item.id() == record.id()) {
        *slot = record;
    }
}

/// Drop every element with this id
pub fn apply_removed<T: HasId>(list: &mut Vec<T>, id: i64) {
    list.retain(|item| item.id() != id);
}

/// Mutate one element in place. Returns whether an element matched.
pub fn patch_by_id<T: HasId>(list: &mut [T], id: i64, patch: impl FnOnce(&mut T)) -> bool {
    match list.iter_mut().find(|item| item.id() == id) {
        Some(item) => {
            patch(item);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChatMessage, Member};

    fn member(id: i64, name: &str, role: &str) -> Member {
        Member {
            id,
            name: name.to_string(),
            role: role.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_created_appends() {
        let mut list = vec![member(1, "Ana", "member")];
        apply_created(&mut list, member(2, "Ben", "member"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "Ben");
    }

    #[test]
    fn test_apply_updated_replaces_by_id() {
        let mut list = vec![member(1, "Ana", "member"), member(2, "Ben", "member")];
        apply_updated(&mut list, member(2, "Benjamin", "admin"));
        assert_eq!(list[1].name, "Benjamin");
        assert_eq!(list[1].role, "admin");
        assert_eq!(list[0].name, "Ana");
    }

    #[test]
    fn test_apply_updated_unknown_id_is_noop() {
        let mut list = vec![member(1, "Ana", "member")];
        let before = list.clone();
        apply_updated(&mut list, member(9, "Ghost", "member"));
        assert_eq!(list, before);
    }

    #[test]
    fn test_apply_removed_filters() {
        let mut list = vec![member(1, "Ana", "member"), member(2, "Ben", "member")];
        apply_removed(&mut list, 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 2);

        apply_removed(&mut list, 42);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_patch_by_id() {
        let mut messages = vec![ChatMessage {
            id: 5,
            message: "hi".into(),
            ..Default::default()
        }];
        assert!(patch_by_id(&mut messages, 5, |m| m.message = "hello".into()));
        assert_eq!(messages[0].message, "hello");
        assert!(!patch_by_id(&mut messages, 6, |m| m.message = "nope".into()));
    }
}
