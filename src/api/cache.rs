use leptos::prelude::*;

/// Labels grouping cached reads. A mutation declares which labels it
/// invalidates; every read subscribed under those labels refetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// The full collection (`GET /articles`).
    ArticleList,
    /// Single-article reads (`GET /articles/{id}`).
    Article,
}

/// Every read tag. Mutations invalidate all of them: list and get
/// subscribers alike must refetch after a local create/update/delete.
pub const READ_TAGS: &[Tag] = &[Tag::ArticleList, Tag::Article];

/// Tag-based invalidation over reactive epochs.
///
/// One monotonically increasing epoch per tag. A read subscribes by
/// calling [`QueryCache::track`] inside its resource source; bumping the
/// epoch re-runs every subscribed resource before the next render.
///
/// Constructed once at startup and provided through context; there is
/// no module-level cache state.
#[derive(Debug, Clone)]
pub struct QueryCache {
    list_epoch: ArcRwSignal<u64>,
    item_epoch: ArcRwSignal<u64>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            list_epoch: ArcRwSignal::new(0),
            item_epoch: ArcRwSignal::new(0),
        }
    }

    fn epoch(&self, tag: Tag) -> &ArcRwSignal<u64> {
        match tag {
            Tag::ArticleList => &self.list_epoch,
            Tag::Article => &self.item_epoch,
        }
    }

    /// Reactive read of a tag's epoch. Calling this inside a resource
    /// source subscribes the resource to the tag.
    pub fn track(&self, tag: Tag) -> u64 {
        self.epoch(tag).get()
    }

    /// Current epoch without subscribing.
    pub fn peek(&self, tag: Tag) -> u64 {
        self.epoch(tag).get_untracked()
    }

    /// Bump the epoch of each tag, forcing subscribed reads to refetch.
    pub fn invalidate(&self, tags: &[Tag]) {
        for &tag in tags {
            self.epoch(tag).update(|epoch| *epoch += 1);
        }
    }
}
