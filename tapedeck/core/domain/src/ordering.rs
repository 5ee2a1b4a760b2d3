use ::std::cmp::Ordering;

use crate::errors::RegistryError;
use crate::registry::MediaRegistry;
use crate::registry::NodeLookup;
use crate::video::Video;
use crate::Node;
use crate::NodeId;

/// How a container orders its children. Every rule is a total preorder and children that compare
/// equal keep their previous relative order.
///
/// A key only one side carries does not fall through to the next rule: the video with a playlist
/// index sorts before the one without, and likewise for upload time. Falling through on a single
/// missing key would make the order intransitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOrder {
    /// Newest upload first, then earliest received first.
    Channel,
    /// Playlist index ascending, then as a channel.
    Playlist,
    /// Folders, then channels and playlists, then videos. Containers by case-insensitive name,
    /// videos as a channel, except a private folder lists the latest received first.
    Folder { private: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

impl ChildOrder {
    pub fn of(node: &Node) -> Option<Self> {
        match node {
            Node::Video(_) => None,
            Node::Channel(_) => Some(ChildOrder::Channel),
            Node::Playlist(_) => Some(ChildOrder::Playlist),
            Node::Folder(folder) => Some(ChildOrder::Folder { private: folder.is_private() }),
        }
    }

    pub fn compare(&self, a: &Node, b: &Node) -> Ordering {
        stratum(a).cmp(&stratum(b)).then_with(|| match (a, b) {
            (Node::Video(a), Node::Video(b)) => self.compare_videos(a, b),
            _ => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        })
    }

    fn compare_videos(&self, a: &Video, b: &Video) -> Ordering {
        let by_index = match self {
            ChildOrder::Playlist => present_first(a.playlist_index(), b.playlist_index(), Direction::Ascending),
            ChildOrder::Channel | ChildOrder::Folder { .. } => Ordering::Equal,
        };

        let receive_direction = match self {
            ChildOrder::Folder { private: true } => Direction::Descending,
            _ => Direction::Ascending,
        };

        by_index
            .then_with(|| present_first(a.upload_time(), b.upload_time(), Direction::Descending))
            .then_with(|| present_first(a.receive_time(), b.receive_time(), receive_direction))
    }
}

fn stratum(node: &Node) -> u8 {
    match node {
        Node::Folder(_) => 0,
        Node::Channel(_) | Node::Playlist(_) => 1,
        Node::Video(_) => 2,
    }
}

fn present_first<T: Ord>(a: Option<T>, b: Option<T>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            Direction::Ascending => a.cmp(&b),
            Direction::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl MediaRegistry {
    /// Re-derives the child order of container `id`.
    ///
    /// The new order is computed against a snapshot of the child list and swapped in afterwards.
    /// Ids that no longer resolve sink to the end.
    pub fn sort_children(&mut self, id: NodeId) -> Result<(), RegistryError> {
        let node = self.lookup(id).ok_or(RegistryError::NotFound(id))?;
        let order = ChildOrder::of(node).ok_or(RegistryError::NotAContainer(id))?;
        let snapshot = self.require_container(id)?.children().to_vec();

        let mut sorted = snapshot.clone();
        sorted.sort_by(|a, b| match (self.lookup(*a), self.lookup(*b)) {
            (Some(a), Some(b)) => order.compare(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        let core = self.require_container_mut(id)?.core_mut();
        debug_assert_eq!(core.children, snapshot, "children of #{id} changed while sorting");
        core.children = sorted;

        ::tracing::trace!(%id, ?order, "sorted children");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::containers::Folder;
    use crate::containers::RemoteContainer;

    fn video(id: u64, upload: Option<i64>, receive: Option<i64>) -> Node {
        let mut video = Video::new(NodeId(id), format!("video {id}"), NodeId(0));
        video.set_upload_time(upload);
        video.set_receive_time(receive);
        Node::Video(video)
    }

    #[test]
    fn present_keys_come_first() {
        assert_eq!(present_first(Some(1), None, Direction::Descending), Ordering::Less);
        assert_eq!(present_first(None, Some(1), Direction::Ascending), Ordering::Greater);
        assert_eq!(present_first::<i64>(None, None, Direction::Ascending), Ordering::Equal);
        assert_eq!(present_first(Some(1), Some(2), Direction::Descending), Ordering::Greater);
    }

    #[test]
    fn newest_upload_wins_then_earliest_receive() {
        let order = ChildOrder::Channel;

        assert_eq!(order.compare(&video(1, Some(200), None), &video(2, Some(100), None)), Ordering::Less);
        assert_eq!(order.compare(&video(1, Some(100), Some(5)), &video(2, Some(100), Some(3))), Ordering::Greater);
        assert_eq!(order.compare(&video(1, None, None), &video(2, None, None)), Ordering::Equal);
    }

    #[test]
    fn a_single_missing_key_does_not_fall_through() {
        let mut indexed = video(1, Some(100), None);
        if let Node::Video(video) = &mut indexed {
            video.set_playlist_index(Some(7));
        }

        assert_eq!(ChildOrder::Playlist.compare(&indexed, &video(2, Some(900), None)), Ordering::Less);
        assert_eq!(ChildOrder::Channel.compare(&video(1, Some(100), Some(9)), &video(2, None, Some(1))), Ordering::Less);
    }

    #[test]
    fn private_folders_flip_receive_order() {
        let public = ChildOrder::Folder { private: false };
        let private = ChildOrder::Folder { private: true };

        let earlier = video(1, Some(100), Some(3));
        let later = video(2, Some(100), Some(5));

        assert_eq!(public.compare(&earlier, &later), Ordering::Less);
        assert_eq!(private.compare(&earlier, &later), Ordering::Greater);
    }

    #[test]
    fn strata_beat_names() {
        let order = ChildOrder::Folder { private: false };

        let folder = Node::Folder(Folder::new(NodeId(1), "zzz", None));
        let channel = Node::Channel(RemoteContainer::new(NodeId(2), "aaa", None));
        let playlist = Node::Playlist(RemoteContainer::new(NodeId(3), "BBB", None));

        assert_eq!(order.compare(&folder, &channel), Ordering::Less);
        assert_eq!(order.compare(&channel, &playlist), Ordering::Less);
        assert_eq!(order.compare(&playlist, &video(4, Some(1), None)), Ordering::Less);
    }
}
