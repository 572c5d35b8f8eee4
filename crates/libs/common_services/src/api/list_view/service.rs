use super::interfaces::{ListView, ListViewItem};
use crate::api::list_view::error::ListViewError;
use crate::database::DocStore;
use app_state::StorageSettings;
use common_types::{UNCATEGORIZED, VoteChoice};
use thumbnails::ThumbnailCache;
use tracing::instrument;

/// The joined, grouped read-side view of one list.
///
/// Votes referencing deleted items are filtered out, not reported. An
/// unknown list yields an empty view. Thumbnails are re-derived on the way
/// out, so a wiped thumbs folder heals itself on the next read.
///
/// The cross-list annotation makes this O(votes x lists): every wanted vote
/// scans every other list. That is fine at the intended household scale and
/// is the first thing to restructure if lists ever number in the thousands.
#[instrument(skip(store, storage, cache))]
pub async fn get_list_view(
    store: &DocStore,
    storage: &StorageSettings,
    cache: &ThumbnailCache,
    list_name: &str,
) -> Result<ListView, ListViewError> {
    let document = store.load().await?;
    let picks = document.lists.get(list_name).cloned().unwrap_or_default();

    let mut view = ListView::new();
    for (item_id, vote) in picks {
        let Some(item) = document.items.get(&item_id) else {
            // Orphaned vote, the item was deleted after voting.
            continue;
        };

        let mut also_wanted_in = Vec::new();
        if vote.choice == VoteChoice::Want {
            for (other_name, other_votes) in &document.lists {
                if other_name == list_name {
                    continue;
                }
                let other_wants = other_votes
                    .get(&item_id)
                    .is_some_and(|other| other.choice == VoteChoice::Want);
                if other_wants {
                    also_wanted_in.push(other_name.clone());
                }
            }
        }

        let thumbnail = cache.ensure(&storage.photo_path(&item_id));
        let bucket = item
            .collection
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        view.entry(bucket).or_default().push(ListViewItem {
            id: item_id,
            caption: item.caption.clone(),
            thumbnail,
            choice: vote.choice,
            comment: vote.comment,
            voted_at: vote.voted_at,
            collection: item.collection.clone(),
            also_wanted_in,
        });
    }

    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_state::ThumbnailSettings;
    use chrono::Utc;
    use color_eyre::eyre::Result;
    use common_types::{Item, Vote};
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;
    use thumbnails::ThumbnailCodec;

    struct TouchCodec;

    impl ThumbnailCodec for TouchCodec {
        fn render(
            &self,
            _source: &Path,
            target: &Path,
            _max_dimension: u32,
        ) -> color_eyre::eyre::Result<()> {
            fs::create_dir_all(target.parent().expect("target has a parent"))?;
            fs::write(target, b"")?;
            Ok(())
        }
    }

    struct Fixture {
        _dir: TempDir,
        storage: StorageSettings,
        cache: ThumbnailCache,
        store: DocStore,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().expect("temp dir");
        let storage = StorageSettings {
            data_folder: dir.path().to_path_buf(),
            photo_folder: dir.path().join("photos"),
            thumbnail_folder: dir.path().join("thumbs"),
            photo_extensions: vec!["jpg".to_string()],
            thumbnails: ThumbnailSettings { max_dimension: 400 },
        };
        let cache = ThumbnailCache::new(storage.thumbnail_folder.clone(), 400, Arc::new(TouchCodec));
        Fixture {
            _dir: dir,
            storage,
            cache,
            store: DocStore::in_memory(),
        }
    }

    async fn seed_item(store: &DocStore, id: &str, caption: &str, collection: Option<&str>) {
        let item = Item {
            id: id.to_string(),
            caption: caption.to_string(),
            collection: collection.map(ToString::to_string),
            created_at: Utc::now(),
        };
        store
            .update(|doc| {
                doc.items.insert(item.id.clone(), item);
            })
            .await
            .expect("seed item");
    }

    async fn seed_vote(store: &DocStore, list: &str, item_id: &str, choice: VoteChoice, comment: &str) {
        let vote = Vote {
            choice,
            comment: comment.to_string(),
            voted_at: Utc::now(),
        };
        let item_id = item_id.to_string();
        store
            .update(|doc| {
                doc.lists
                    .entry(list.to_string())
                    .or_default()
                    .insert(item_id, vote);
            })
            .await
            .expect("seed vote");
    }

    #[tokio::test]
    async fn trip_scenario_produces_the_expected_view() -> Result<()> {
        let f = fixture();
        seed_item(&f.store, "p1.jpg", "beach", Some("Summer")).await;
        seed_vote(&f.store, "trip", "p1.jpg", VoteChoice::Want, "yes!").await;

        let view = get_list_view(&f.store, &f.storage, &f.cache, "trip").await?;

        assert_eq!(view.len(), 1);
        let summer = &view["Summer"];
        assert_eq!(summer.len(), 1);
        let record = &summer[0];
        assert_eq!(record.id, "p1.jpg");
        assert_eq!(record.caption, "beach");
        assert_eq!(record.choice, VoteChoice::Want);
        assert_eq!(record.comment, "yes!");
        assert_eq!(record.thumbnail.as_deref(), Some("thumbs/p1.jpg"));
        assert!(record.also_wanted_in.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn cross_list_annotation_is_symmetric() -> Result<()> {
        let f = fixture();
        seed_item(&f.store, "x.jpg", "", None).await;
        seed_vote(&f.store, "a", "x.jpg", VoteChoice::Want, "").await;
        seed_vote(&f.store, "b", "x.jpg", VoteChoice::Want, "").await;

        let view_a = get_list_view(&f.store, &f.storage, &f.cache, "a").await?;
        let view_b = get_list_view(&f.store, &f.storage, &f.cache, "b").await?;

        assert_eq!(view_a["Uncategorized"][0].also_wanted_in, ["b"]);
        assert_eq!(view_b["Uncategorized"][0].also_wanted_in, ["a"]);
        Ok(())
    }

    #[tokio::test]
    async fn pass_votes_suppress_the_annotation_on_both_sides() -> Result<()> {
        let f = fixture();
        seed_item(&f.store, "x.jpg", "", None).await;
        seed_vote(&f.store, "a", "x.jpg", VoteChoice::Want, "").await;
        seed_vote(&f.store, "b", "x.jpg", VoteChoice::Pass, "").await;

        let view_a = get_list_view(&f.store, &f.storage, &f.cache, "a").await?;
        let view_b = get_list_view(&f.store, &f.storage, &f.cache, "b").await?;

        assert!(view_a["Uncategorized"][0].also_wanted_in.is_empty());
        // The pass vote itself never carries the annotation.
        assert!(view_b["Uncategorized"][0].also_wanted_in.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn groups_by_collection_with_uncategorized_default() -> Result<()> {
        let f = fixture();
        seed_item(&f.store, "a.jpg", "", Some("Summer")).await;
        seed_item(&f.store, "b.jpg", "", Some("Summer")).await;
        seed_item(&f.store, "c.jpg", "", None).await;
        for id in ["a.jpg", "b.jpg", "c.jpg"] {
            seed_vote(&f.store, "trip", id, VoteChoice::Want, "").await;
        }

        let view = get_list_view(&f.store, &f.storage, &f.cache, "trip").await?;

        assert_eq!(view.len(), 2);
        let summer_ids: Vec<&str> = view["Summer"].iter().map(|r| r.id.as_str()).collect();
        assert_eq!(summer_ids, ["a.jpg", "b.jpg"]);
        assert_eq!(view["Uncategorized"][0].id, "c.jpg");
        Ok(())
    }

    #[tokio::test]
    async fn orphaned_votes_are_filtered_without_error() -> Result<()> {
        let f = fixture();
        seed_vote(&f.store, "trip", "deleted.jpg", VoteChoice::Want, "").await;

        let view = get_list_view(&f.store, &f.storage, &f.cache, "trip").await?;

        assert!(view.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_list_yields_an_empty_view() -> Result<()> {
        let f = fixture();

        let view = get_list_view(&f.store, &f.storage, &f.cache, "nope").await?;

        assert!(view.is_empty());
        Ok(())
    }
}
