use std::ops::Deref;

use tracing::instrument;

use super::{Entity, Log};
use crate::DocumentSource;
use crate::error::ErrorKind;

/// The logs of a cache, in the order the listing shows them.
pub type LogList = EntityList<Log>;

/// An ordered collection of entities of one kind, in document order.
///
/// Dereferences to a slice for reading; members are fetched individually or
/// all at once with [`fetch_all`](Self::fetch_all).
#[derive(Debug, Clone)]
pub struct EntityList<E> {
    items: Vec<E>,
}

impl<E> EntityList<E> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, entity: E) {
        self.items.push(entity);
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.items.iter_mut()
    }
}

impl<E: Entity> EntityList<E> {
    /// Fetches every member in order and reports whether all of them ended
    /// up fetched.
    ///
    /// A failing member does not stop the others and is not raised; it simply
    /// stays unfetched. Inspect members individually for details.
    #[instrument(skip_all, fields(kind = E::KIND, len = self.items.len()))]
    pub fn fetch_all(&mut self, source: &dyn DocumentSource) -> bool {
        for entity in &mut self.items {
            if let Err(err) = entity.fetch(source) {
                let kind: &ErrorKind = &err;
                tracing::debug!(error = %kind, "Member fetch failed");
            }
        }
        let unfetched = self.items.iter().filter(|entity| !entity.is_fetched()).count();
        if unfetched > 0 {
            tracing::warn!(unfetched, "Bulk fetch left members unfetched");
        }
        unfetched == 0
    }
}

impl<E> Default for EntityList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Deref for EntityList<E> {
    type Target = [E];
    fn deref(&self) -> &[E] {
        &self.items
    }
}

impl<E> FromIterator<E> for EntityList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<E> From<Vec<E>> for EntityList<E> {
    fn from(items: Vec<E>) -> Self {
        Self { items }
    }
}

impl<E> IntoIterator for EntityList<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a EntityList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::{LogParams, MockSource, User, UserParams};
    use rstest::rstest;

    const GUIDS: [&str; 3] = [
        "00000000-0000-4000-8000-000000000001",
        "00000000-0000-4000-8000-000000000002",
        "00000000-0000-4000-8000-000000000003",
    ];

    fn users() -> EntityList<User> {
        GUIDS.iter().map(|guid| User::with_guid(*guid)).collect()
    }

    fn profile(name: &str) -> String {
        format!(r#"<span id="ctl00_ContentBody_ProfilePanel1_lblMemberName">{name}</span>"#)
    }

    fn source_failing(failing: &[usize]) -> MockSource {
        let mut source = MockSource::with_pages(
            GUIDS.iter().enumerate().map(|(i, guid)| (format!("/profile/?guid={guid}"), profile(&format!("user{i}")))),
        );
        for i in failing {
            source = source.with_failure(format!("/profile/?guid={}", GUIDS[*i]), ErrorKind::TransportTimeout);
        }
        source
    }

    #[rstest]
    #[case(&[], true)]
    #[case(&[1], false)]
    #[case(&[0, 2], false)]
    #[case(&[0, 1, 2], false)]
    fn test_fetch_all_reports_aggregate(#[case] failing: &[usize], #[case] expected: bool) {
        let source = source_failing(failing);
        let mut list = users();
        assert_eq!(list.fetch_all(&source), expected);
        assert_eq!(source.requests().len(), GUIDS.len());
        for (i, user) in list.iter().enumerate() {
            if failing.contains(&i) {
                assert!(!user.is_fetched());
                assert_eq!(&*user.name().unwrap_err(), &ErrorKind::NotFetched);
            } else {
                assert!(user.is_fetched());
                assert_eq!(user.name().unwrap(), format!("user{i}"));
            }
        }
    }

    #[test]
    fn test_fetch_all_empty_is_true() {
        let mut list: LogList = EntityList::new();
        assert!(list.is_empty());
        assert!(list.fetch_all(&MockSource::default()));
    }

    #[test]
    fn test_member_without_key_stays_unfetched() {
        let mut list: LogList = [LogParams::default()].into_iter().map(Log::new).collect();
        assert!(!list.fetch_all(&MockSource::default()));
        assert!(!list[0].is_fetched());
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut list = EntityList::new();
        for guid in GUIDS.iter().rev() {
            list.push(User::new(UserParams {
                guid: Some(guid.to_string()),
                name: None,
            }));
        }
        let order: Vec<&str> = list.iter().map(|user| user.guid().unwrap()).collect();
        assert_eq!(order, GUIDS.iter().rev().copied().collect::<Vec<_>>());
    }
}
